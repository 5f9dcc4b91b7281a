//! Customer Models

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Customer UUID
pub type CustomerUuid = TypedUuid<Customer>;

/// Who is placing an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerIdentity {
    /// A signed-in account, identified by its stable key.
    Authenticated(String),

    /// No account bound to the request; the purchaser is keyed by their phone number.
    Guest,
}

impl CustomerIdentity {
    /// The profile key for this identity. Guests are keyed as `guest_{phone}` with the
    /// normalized phone.
    #[must_use]
    pub fn key(&self, normalized_phone: &str) -> String {
        match self {
            CustomerIdentity::Authenticated(key) => key.clone(),
            CustomerIdentity::Guest => format!("guest_{normalized_phone}"),
        }
    }
}

/// Contact and delivery details captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CustomerProfile {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub department: String,
    pub city: String,
    pub neighborhood: Option<String>,
    pub address: String,
    pub note: Option<String>,
}

/// Customer Model
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub uuid: CustomerUuid,
    pub identity_key: String,
    pub profile: CustomerProfile,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guests_are_keyed_by_phone() {
        assert_eq!(CustomerIdentity::Guest.key("3001234567"), "guest_3001234567");
    }

    #[test]
    fn authenticated_identities_keep_their_key() {
        let identity = CustomerIdentity::Authenticated("user_42".to_string());

        assert_eq!(identity.key("3001234567"), "user_42");
    }
}
