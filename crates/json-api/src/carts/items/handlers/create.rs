//! Add Cart Item Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::catalog::models::VariantUuid;

use crate::{
    carts::{
        errors::{into_status_error, outcome},
        responses::CartChangedResponse,
    },
    extensions::*,
    observability::observe_cart_mutation,
    state::State,
};

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemRequest {
    /// Variant to reserve
    pub variant_uuid: Uuid,

    /// Units to add on top of any already held
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Add Cart Item Handler
#[endpoint(
    tags("carts"),
    summary = "Add Item to Cart",
    responses(
        (status_code = StatusCode::OK, description = "Item reserved"),
        (status_code = StatusCode::NOT_FOUND, description = "Variant not found or inactive"),
        (status_code = StatusCode::CONFLICT, description = "Insufficient stock"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.items.add",
    skip(json, depot),
    fields(
        cart_session = tracing::field::Empty,
        variant_uuid = tracing::field::Empty,
        quantity = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartChangedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_key_or_500()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("cart_session", tracing::field::display(session));
    span.record("variant_uuid", tracing::field::display(request.variant_uuid));
    span.record("quantity", request.quantity);

    let change = state
        .app
        .carts
        .add_item(
            session,
            VariantUuid::from_uuid(request.variant_uuid),
            request.quantity,
            Timestamp::now(),
        )
        .await
        .inspect(|_| observe_cart_mutation("add", "ok"))
        .map_err(|error| {
            observe_cart_mutation("add", outcome(&error));

            into_status_error(error)
        })?;

    tracing::info!(
        variant_uuid = %request.variant_uuid,
        quantity = change.cart.quantity_of(VariantUuid::from_uuid(request.variant_uuid)),
        "reserved cart item"
    );

    Ok(Json(change.into()))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::carts::{
        CartsServiceError, MockCartsService,
        mirror::CartMirror,
        models::{CartAction, CartChange},
    };

    use crate::test_helpers::{
        TEST_SESSION_KEY, carts_service, make_cart_line_for, session_cookie,
    };

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("cart/items").post(handler))
    }

    #[tokio::test]
    async fn test_add_item_success() -> TestResult {
        let variant = VariantUuid::new();
        let cart = CartMirror::new(vec![make_cart_line_for(variant, Decimal::from(100), 3)]);

        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .withf(move |session, v, quantity, _| {
                *session == TEST_SESSION_KEY && *v == variant && *quantity == 3
            })
            .return_once(move |_, _, _, _| {
                Ok(CartChange {
                    action: CartAction::Added,
                    cart,
                })
            });

        let mut res = TestClient::post("http://example.com/cart/items")
            .add_header("cookie", session_cookie(), true)
            .json(&json!({ "variant_uuid": variant.into_uuid(), "quantity": 3 }))
            .send(&make_service(carts))
            .await;

        let body: CartChangedResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.success, "expected success flag");
        assert_eq!(body.message, "Producto agregado al carrito");
        assert_eq!(body.cart.count, 3);
        assert_eq!(body.cart.total, "300");

        Ok(())
    }

    #[tokio::test]
    async fn test_add_item_defaults_to_one_unit() -> TestResult {
        let variant = VariantUuid::new();
        let cart = CartMirror::new(vec![make_cart_line_for(variant, Decimal::from(10), 1)]);

        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .withf(move |_, v, quantity, _| *v == variant && *quantity == 1)
            .return_once(move |_, _, _, _| {
                Ok(CartChange {
                    action: CartAction::Added,
                    cart,
                })
            });

        let res = TestClient::post("http://example.com/cart/items")
            .add_header("cookie", session_cookie(), true)
            .json(&json!({ "variant_uuid": variant.into_uuid() }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_item_insufficient_stock_returns_409_with_available_units() -> TestResult {
        let variant = VariantUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .return_once(|_, _, _, _| Err(CartsServiceError::InsufficientStock { available: 5 }));

        let mut res = TestClient::post("http://example.com/cart/items")
            .add_header("cookie", session_cookie(), true)
            .add_header("accept", "application/json", true)
            .json(&json!({ "variant_uuid": variant.into_uuid(), "quantity": 6 }))
            .send(&make_service(carts))
            .await;

        let body = res.take_string().await?;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
        assert!(
            body.contains("Stock insuficiente. Disponible: 5"),
            "expected actionable message, got {body}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_add_unknown_variant_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .return_once(|_, _, _, _| Err(CartsServiceError::NotFound));

        let res = TestClient::post("http://example.com/cart/items")
            .add_header("cookie", session_cookie(), true)
            .json(&json!({ "variant_uuid": Uuid::now_v7(), "quantity": 1 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_item_with_malformed_body_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_add_item().never();

        let res = TestClient::post("http://example.com/cart/items")
            .add_header("cookie", session_cookie(), true)
            .json(&json!({ "variant_uuid": "not-a-uuid", "quantity": -1 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
