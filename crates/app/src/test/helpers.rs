//! Test Helpers

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::domain::{
    catalog::models::{NewVariant, ProductUuid, VariantUuid},
    checkout::input::CheckoutInput,
    customers::models::CustomerProfile,
};

/// A fixed instant on the test day, given as `HH:MM` UTC.
pub(crate) fn at(time: &str) -> Timestamp {
    format!("2026-03-01T{time}:00Z")
        .parse()
        .expect("test timestamps are well formed")
}

pub(crate) fn new_variant(
    product: ProductUuid,
    stock: u32,
    price: Decimal,
    discount_price: Option<Decimal>,
) -> NewVariant {
    let uuid = VariantUuid::new();

    NewVariant {
        uuid,
        product_uuid: product,
        sku: format!("SKU-{uuid}"),
        price,
        discount_price,
        stock,
        is_active: true,
        image_url: None,
        options: Vec::new(),
    }
}

pub(crate) fn checkout_input() -> CheckoutInput {
    CheckoutInput {
        customer_name: "Ana Gómez".to_string(),
        customer_phone: "300 123 4567".to_string(),
        customer_email: Some("ana@example.com".to_string()),
        department: "Antioquia".to_string(),
        city: "Medellín".to_string(),
        neighborhood: Some("Laureles".to_string()),
        address: "Calle 10 # 43-12".to_string(),
        note: None,
    }
}

pub(crate) fn profile(name: &str) -> CustomerProfile {
    CustomerProfile {
        name: name.to_string(),
        phone: "3001234567".to_string(),
        email: Some("ana@example.com".to_string()),
        department: "Antioquia".to_string(),
        city: "Medellín".to_string(),
        neighborhood: Some("Laureles".to_string()),
        address: "Calle 10 # 43-12".to_string(),
        note: Some("Portería".to_string()),
    }
}
