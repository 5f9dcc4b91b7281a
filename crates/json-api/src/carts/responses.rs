//! Cart Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::{
    carts::{
        mirror::{CartLine, CartMirror},
        models::CartChange,
    },
    catalog::models::VariantOption,
};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// Held variants, oldest reservation first
    pub items: Vec<CartItemResponse>,

    /// Total number of units in the cart
    pub count: u64,

    /// Sum of the lines at list price
    pub subtotal: String,

    /// Amount payable
    pub total: String,

    /// Amount saved on discounted lines
    pub savings: String,
}

impl From<CartMirror> for CartResponse {
    fn from(cart: CartMirror) -> Self {
        CartResponse {
            count: cart.count(),
            subtotal: cart.subtotal().to_string(),
            total: cart.total().to_string(),
            savings: cart.savings().to_string(),
            items: cart
                .into_items()
                .into_iter()
                .map(CartItemResponse::from)
                .collect(),
        }
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// Key the line is addressed by in item routes
    pub key: String,

    pub variant_uuid: Uuid,
    pub product_uuid: Uuid,
    pub product_name: String,
    pub product_slug: String,
    pub sku: String,
    pub quantity: u32,

    /// Unit price charged
    pub price: String,

    /// Unit list price
    pub original_price: String,

    /// Whole-percent discount off the list price
    pub discount_percentage: u32,

    /// `price` times `quantity`
    pub line_total: String,

    /// Selected option labels, in display order
    pub options: Vec<CartItemOptionResponse>,

    pub image_url: Option<String>,

    /// Tracked stock of the variant when the cart was read
    pub stock: u32,

    /// When the hold lapses unless the line is touched again
    pub expires_at: String,
}

impl From<CartLine> for CartItemResponse {
    fn from(line: CartLine) -> Self {
        Self {
            key: line.key(),
            price: line.unit_price().to_string(),
            original_price: line.original_price().to_string(),
            discount_percentage: line.discount_percentage(),
            line_total: line.line_total().to_string(),
            variant_uuid: line.variant_uuid.into_uuid(),
            product_uuid: line.product_uuid.into_uuid(),
            product_name: line.product_name,
            product_slug: line.product_slug,
            sku: line.sku,
            quantity: line.quantity,
            options: line
                .options
                .into_iter()
                .map(CartItemOptionResponse::from)
                .collect(),
            image_url: line.image_url,
            stock: line.stock,
            expires_at: line.expires_at.to_string(),
        }
    }
}

/// Cart Item Option Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemOptionResponse {
    /// Option name, e.g. "Talla"
    pub option: String,

    /// Selected value, e.g. "M"
    pub value: String,
}

impl From<VariantOption> for CartItemOptionResponse {
    fn from(option: VariantOption) -> Self {
        Self {
            option: option.option,
            value: option.value,
        }
    }
}

/// Cart Changed Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartChangedResponse {
    pub success: bool,

    /// Shopper-facing confirmation
    pub message: String,

    /// The cart after the change
    pub cart: CartResponse,
}

impl From<CartChange> for CartChangedResponse {
    fn from(change: CartChange) -> Self {
        Self {
            success: true,
            message: change.message().to_string(),
            cart: change.cart.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::test_helpers::make_cart_line;

    use super::*;

    #[test]
    fn cart_response_carries_derived_amounts() {
        let cart = CartMirror::new(vec![
            make_cart_line(Decimal::from(100), None, 2),
            make_cart_line(Decimal::from(100), Some(Decimal::from(80)), 1),
        ]);

        let response = CartResponse::from(cart);

        assert_eq!(response.count, 3);
        assert_eq!(response.subtotal, "300");
        assert_eq!(response.total, "280");
        assert_eq!(response.savings, "20");

        let discounted = response.items.get(1).ok_or("expected second line");

        assert!(
            matches!(discounted, Ok(item) if item.price == "80" && item.original_price == "100" && item.discount_percentage == 20),
            "unexpected discounted line: {discounted:?}"
        );
    }
}
