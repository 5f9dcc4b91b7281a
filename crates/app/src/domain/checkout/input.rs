//! Checkout input and its validation.

use std::collections::BTreeMap;

use crate::domain::customers::models::CustomerProfile;

const REQUIRED: &str = "Este campo es obligatorio.";
const INVALID_EMAIL: &str = "Introduzca una dirección de correo electrónico válida.";
const NAME_TOO_SHORT: &str = "El nombre debe tener al menos 3 caracteres";
const PHONE_DIGITS: &str = "El teléfono debe tener 10 dígitos";
const PHONE_MOBILE: &str = "Debe ser un celular colombiano (empezar con 3)";

/// Contact and delivery details as submitted by the shopper.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutInput {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub department: String,
    pub city: String,
    pub neighborhood: Option<String>,
    pub address: String,
    pub note: Option<String>,
}

/// Validation failures keyed by input field, every failing field reported at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    #[must_use]
    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

impl CheckoutInput {
    /// Trim and check every field, producing the profile to store.
    ///
    /// The phone is reduced to its digits; blank optional fields become `None`.
    pub fn validate(&self) -> Result<CustomerProfile, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = required(&mut errors, "customer_name", &self.customer_name, 255);

        if !name.is_empty() && name.chars().count() < 3 {
            errors.add("customer_name", NAME_TOO_SHORT);
        }

        let raw_phone = required(&mut errors, "customer_phone", &self.customer_phone, 20);
        let phone = normalize_phone(raw_phone);

        if !raw_phone.is_empty() {
            if phone.len() != 10 {
                errors.add("customer_phone", PHONE_DIGITS);
            } else if !phone.starts_with('3') {
                errors.add("customer_phone", PHONE_MOBILE);
            }
        }

        let email = optional(self.customer_email.as_deref());

        if email.is_some_and(|email| !is_email(email)) {
            errors.add("customer_email", INVALID_EMAIL);
        }

        let department = required(&mut errors, "department", &self.department, 100);
        let city = required(&mut errors, "city", &self.city, 100);
        let neighborhood = optional(self.neighborhood.as_deref());

        if let Some(neighborhood) = neighborhood {
            check_max(&mut errors, "neighborhood", neighborhood, 100);
        }

        let address = required(&mut errors, "address", &self.address, 255);
        let note = optional(self.note.as_deref());

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(CustomerProfile {
            name: name.to_string(),
            phone,
            email: email.map(str::to_string),
            department: department.to_string(),
            city: city.to_string(),
            neighborhood: neighborhood.map(str::to_string),
            address: address.to_string(),
            note: note.map(str::to_string),
        })
    }
}

/// Digits of a phone number, dropping spaces, dashes, parentheses and the like.
#[must_use]
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

fn required<'a>(errors: &mut FieldErrors, field: &str, value: &'a str, max: usize) -> &'a str {
    let value = value.trim();

    if value.is_empty() {
        errors.add(field, REQUIRED);
    } else {
        check_max(errors, field, value, max);
    }

    value
}

fn optional(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn check_max(errors: &mut FieldErrors, field: &str, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.add(
            field,
            format!("Asegúrese de que este valor tenga como máximo {max} caracteres."),
        );
    }
}

fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> CheckoutInput {
        CheckoutInput {
            customer_name: "  Ana Gómez ".to_string(),
            customer_phone: "300 123-4567".to_string(),
            customer_email: Some("ana@example.com".to_string()),
            department: "Antioquia".to_string(),
            city: "Medellín".to_string(),
            neighborhood: Some("   ".to_string()),
            address: "Calle 10 # 43-12".to_string(),
            note: None,
        }
    }

    #[test]
    fn valid_input_is_normalized_into_a_profile() {
        let profile = valid_input().validate().expect("input should be valid");

        assert_eq!(profile.name, "Ana Gómez");
        assert_eq!(profile.phone, "3001234567");
        assert_eq!(profile.email.as_deref(), Some("ana@example.com"));
        assert_eq!(profile.neighborhood, None);
    }

    #[test]
    fn every_failing_field_is_reported() {
        let input = CheckoutInput {
            customer_name: "Al".to_string(),
            customer_phone: "12345".to_string(),
            customer_email: Some("not-an-email".to_string()),
            department: String::new(),
            city: "c".repeat(101),
            neighborhood: None,
            address: " ".to_string(),
            note: None,
        };

        let errors = input.validate().expect_err("input should be invalid");

        assert_eq!(errors.get("customer_name"), Some(&[NAME_TOO_SHORT.to_string()][..]));
        assert_eq!(errors.get("customer_phone"), Some(&[PHONE_DIGITS.to_string()][..]));
        assert_eq!(errors.get("customer_email"), Some(&[INVALID_EMAIL.to_string()][..]));
        assert_eq!(errors.get("department"), Some(&[REQUIRED.to_string()][..]));
        assert!(errors.get("city").is_some());
        assert_eq!(errors.get("address"), Some(&[REQUIRED.to_string()][..]));
        assert_eq!(errors.get("neighborhood"), None);
    }

    #[test]
    fn phone_must_be_a_mobile_number() {
        let input = CheckoutInput {
            customer_phone: "(601) 555 1234".to_string(),
            ..valid_input()
        };

        let errors = input.validate().expect_err("landline should be rejected");

        assert_eq!(errors.get("customer_phone"), Some(&[PHONE_MOBILE.to_string()][..]));
    }

    #[test]
    fn email_shapes() {
        assert!(is_email("ana@example.com"));
        assert!(is_email("ana.gomez+pedidos@correo.example.co"));
        assert!(!is_email("ana@"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("ana@example"));
        assert!(!is_email("ana@@example.com"));
        assert!(!is_email("ana gomez@example.com"));
        assert!(!is_email("ana@example..com"));
    }

    #[test]
    fn normalize_phone_keeps_only_digits() {
        assert_eq!(normalize_phone("+57 (300) 123-4567"), "573001234567");
    }
}
