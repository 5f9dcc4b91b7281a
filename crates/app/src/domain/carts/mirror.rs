//! Cart Mirror
//!
//! Display projection of a session's active reservations, joined with the catalog fields a
//! shopper sees. Every derivation here is computed from the lines on each call.

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::domain::catalog::models::{
    ProductUuid, VariantOption, VariantUuid, discount_percentage, effective_price,
};

/// One held variant in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub variant_uuid: VariantUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub product_slug: String,
    pub sku: String,
    pub quantity: u32,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub options: Vec<VariantOption>,
    pub image_url: Option<String>,

    /// Tracked stock of the variant when the cart was read.
    pub stock: u32,

    pub reserved_at: Timestamp,
    pub expires_at: Timestamp,
}

impl CartLine {
    /// Unit price charged: the discount price when set, else the list price.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        effective_price(self.price, self.discount_price)
    }

    #[must_use]
    pub fn original_price(&self) -> Decimal {
        self.price
    }

    #[must_use]
    pub fn discount_percentage(&self) -> u32 {
        discount_percentage(self.price, self.unit_price())
    }

    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price() * Decimal::from(self.quantity)
    }

    #[must_use]
    pub fn line_subtotal(&self) -> Decimal {
        self.original_price() * Decimal::from(self.quantity)
    }

    /// Key the line is addressed by from the outside.
    #[must_use]
    pub fn key(&self) -> String {
        self.variant_uuid.to_string()
    }
}

/// A session's cart, ordered by when each variant was first reserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartMirror {
    lines: Vec<CartLine>,
}

impl CartMirror {
    #[must_use]
    pub fn new(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    #[must_use]
    pub fn items(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn into_items(self) -> Vec<CartLine> {
        self.lines
    }

    #[must_use]
    pub fn get(&self, variant: VariantUuid) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.variant_uuid == variant)
    }

    /// Units of `variant` currently held, zero when absent.
    #[must_use]
    pub fn quantity_of(&self, variant: VariantUuid) -> u32 {
        self.get(variant).map_or(0, |line| line.quantity)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Amount payable, at effective unit prices.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Amount at list prices.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_subtotal).sum()
    }

    /// Amount saved on discounted lines.
    #[must_use]
    pub fn savings(&self) -> Decimal {
        self.lines
            .iter()
            .filter(|line| line.original_price() > line.unit_price())
            .map(|line| line.line_subtotal() - line.line_total())
            .sum()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(price: i64, discount_price: Option<i64>, quantity: u32) -> CartLine {
        let now = Timestamp::UNIX_EPOCH;

        CartLine {
            variant_uuid: VariantUuid::new(),
            product_uuid: ProductUuid::new(),
            product_name: "Camiseta".to_string(),
            product_slug: "camiseta".to_string(),
            sku: "CAM-001".to_string(),
            quantity,
            price: Decimal::from(price),
            discount_price: discount_price.map(Decimal::from),
            options: Vec::new(),
            image_url: None,
            stock: 10,
            reserved_at: now,
            expires_at: now,
        }
    }

    #[test]
    fn totals_over_mixed_discounted_lines() {
        let cart = CartMirror::new(vec![line(100, None, 2), line(100, Some(80), 1)]);

        assert_eq!(cart.subtotal(), Decimal::from(300));
        assert_eq!(cart.total(), Decimal::from(280));
        assert_eq!(cart.savings(), Decimal::from(20));
        assert_eq!(cart.count(), 3);
    }

    #[test]
    fn empty_cart_derives_zeroes() {
        let cart = CartMirror::default();

        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
        assert_eq!(cart.subtotal(), Decimal::ZERO);
        assert_eq!(cart.savings(), Decimal::ZERO);
        assert_eq!(cart.count(), 0);
    }

    #[test]
    fn discount_price_above_list_price_is_not_a_saving() {
        let cart = CartMirror::new(vec![line(100, Some(120), 1)]);

        assert_eq!(cart.total(), Decimal::from(120));
        assert_eq!(cart.savings(), Decimal::ZERO);
    }

    #[test]
    fn lines_are_addressable_by_variant() {
        let first = line(50, None, 4);
        let variant = first.variant_uuid;
        let cart = CartMirror::new(vec![first, line(10, None, 1)]);

        assert_eq!(cart.quantity_of(variant), 4);
        assert_eq!(cart.quantity_of(VariantUuid::new()), 0);
        assert_eq!(
            cart.get(variant).map(CartLine::key),
            Some(variant.to_string())
        );
    }

    #[test]
    fn line_exposes_discount_percentage() {
        let discounted = line(100, Some(75), 1);

        assert_eq!(discounted.unit_price(), Decimal::from(75));
        assert_eq!(discounted.discount_percentage(), 25);
        assert_eq!(line(100, None, 1).discount_percentage(), 0);
    }
}
