//! Clear Cart Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::prelude::*;

use crate::{
    carts::{
        errors::{into_status_error, outcome},
        responses::CartChangedResponse,
    },
    extensions::*,
    observability::observe_cart_mutation,
    state::State,
};

/// Clear Cart Handler
///
/// Releases every reservation the session holds. Succeeds on an empty cart.
#[endpoint(
    tags("carts"),
    summary = "Clear Cart",
    responses(
        (status_code = StatusCode::OK, description = "Cart cleared"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.clear",
    skip(depot),
    fields(cart_session = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartChangedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_key_or_500()?;

    tracing::Span::current().record("cart_session", tracing::field::display(session));

    let change = state
        .app
        .carts
        .clear_cart(session, Timestamp::now())
        .await
        .inspect(|_| observe_cart_mutation("clear", "ok"))
        .map_err(|error| {
            observe_cart_mutation("clear", outcome(&error));

            into_status_error(error)
        })?;

    Ok(Json(change.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::carts::{
        MockCartsService,
        mirror::CartMirror,
        models::{CartAction, CartChange},
    };

    use crate::test_helpers::{TEST_SESSION_KEY, carts_service, session_cookie};

    use super::*;

    #[tokio::test]
    async fn test_clear_returns_empty_cart_and_message() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_clear_cart()
            .once()
            .withf(|session, _| *session == TEST_SESSION_KEY)
            .return_once(|_, _| {
                Ok(CartChange {
                    action: CartAction::Cleared,
                    cart: CartMirror::default(),
                })
            });

        let mut res = TestClient::delete("http://example.com/cart")
            .add_header("cookie", session_cookie(), true)
            .send(&carts_service(carts, Router::with_path("cart").delete(handler)))
            .await;

        let body: CartChangedResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.success, "expected success flag");
        assert_eq!(body.message, "Carrito vaciado");
        assert_eq!(body.cart.count, 0);

        Ok(())
    }
}
