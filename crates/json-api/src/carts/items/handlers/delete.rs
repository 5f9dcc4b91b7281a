//! Remove Cart Item Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::extract::PathParam, prelude::*};
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

/// Remove Cart Item Handler
#[endpoint(
    tags("carts"),
    summary = "Remove Item from Cart",
    responses(
        (status_code = StatusCode::OK, description = "Item released"),
        (status_code = StatusCode::NOT_FOUND, description = "Variant not in cart"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.items.remove",
    skip(variant, depot),
    fields(
        cart_session = tracing::field::Empty,
        variant_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    variant: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartChangedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_key_or_500()?;
    let variant = variant.into_inner();

    let span = tracing::Span::current();

    span.record("cart_session", tracing::field::display(session));
    span.record("variant_uuid", tracing::field::display(variant));

    let change = state
        .app
        .carts
        .remove_item(session, VariantUuid::from_uuid(variant), Timestamp::now())
        .await
        .inspect(|_| observe_cart_mutation("remove", "ok"))
        .map_err(|error| {
            observe_cart_mutation("remove", outcome(&error));

            into_status_error(error)
        })?;

    Ok(Json(change.into()))
}
