//! Catalog Models

use jiff::Timestamp;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Variant UUID
pub type VariantUuid = TypedUuid<Variant>;

/// Product Model
#[derive(Debug, Clone)]
pub struct Product {
    pub uuid: ProductUuid,
    pub name: String,
    pub slug: String,
    pub sales_count: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub slug: String,
}

/// A selected option label on a variant, e.g. `Color: Rojo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantOption {
    pub option: String,
    pub value: String,
}

/// Variant Model
///
/// A purchasable SKU of a product, carrying its own price and tracked stock.
#[derive(Debug, Clone)]
pub struct Variant {
    pub uuid: VariantUuid,
    pub product_uuid: ProductUuid,
    pub sku: String,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub stock: u32,
    pub is_active: bool,
    pub image_url: Option<String>,
    pub options: Vec<VariantOption>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Variant {
    /// The price a shopper pays per unit: the discount price when set, else the list price.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        effective_price(self.price, self.discount_price)
    }

    #[must_use]
    pub fn discount_percentage(&self) -> u32 {
        discount_percentage(self.price, self.effective_price())
    }
}

/// New Variant Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewVariant {
    pub uuid: VariantUuid,
    pub product_uuid: ProductUuid,
    pub sku: String,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub stock: u32,
    pub is_active: bool,
    pub image_url: Option<String>,
    pub options: Vec<VariantOption>,
}

pub(crate) fn effective_price(price: Decimal, discount_price: Option<Decimal>) -> Decimal {
    discount_price.unwrap_or(price)
}

/// Whole-number percentage taken off `original` to reach `effective`, rounded half away from
/// zero. Zero when there is no discount.
pub(crate) fn discount_percentage(original: Decimal, effective: Decimal) -> u32 {
    if original <= Decimal::ZERO || effective >= original {
        return 0;
    }

    ((original - effective) * Decimal::ONE_HUNDRED / original)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_price_prefers_discount() {
        assert_eq!(effective_price(Decimal::from(100), Some(Decimal::from(80))), Decimal::from(80));
        assert_eq!(effective_price(Decimal::from(100), None), Decimal::from(100));
    }

    #[test]
    fn discount_percentage_rounds_to_whole_percent() {
        assert_eq!(discount_percentage(Decimal::from(100), Decimal::from(80)), 20);
        assert_eq!(discount_percentage(Decimal::from(30000), Decimal::from(19990)), 33);
        assert_eq!(discount_percentage(Decimal::from(3), Decimal::new(2985, 3)), 1);
    }

    #[test]
    fn discount_percentage_is_zero_without_discount() {
        assert_eq!(discount_percentage(Decimal::from(100), Decimal::from(100)), 0);
        assert_eq!(discount_percentage(Decimal::from(100), Decimal::from(120)), 0);
        assert_eq!(discount_percentage(Decimal::ZERO, Decimal::ZERO), 0);
    }
}
