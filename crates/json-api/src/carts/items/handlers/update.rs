//! Update Cart Item Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
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

/// Update Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemRequest {
    /// New held quantity; zero or less removes the line
    pub quantity: i64,
}

/// Update Cart Item Handler
#[endpoint(
    tags("carts"),
    summary = "Update Cart Item Quantity",
    responses(
        (status_code = StatusCode::OK, description = "Quantity updated or line removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Variant not in cart"),
        (status_code = StatusCode::CONFLICT, description = "Insufficient stock"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.items.update",
    skip(variant, json, depot),
    fields(
        cart_session = tracing::field::Empty,
        variant_uuid = tracing::field::Empty,
        quantity = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    variant: PathParam<Uuid>,
    json: JsonBody<UpdateCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartChangedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_key_or_500()?;
    let variant = variant.into_inner();
    let quantity = json.into_inner().quantity;

    let span = tracing::Span::current();

    span.record("cart_session", tracing::field::display(session));
    span.record("variant_uuid", tracing::field::display(variant));
    span.record("quantity", quantity);

    let change = state
        .app
        .carts
        .update_item(
            session,
            VariantUuid::from_uuid(variant),
            quantity,
            Timestamp::now(),
        )
        .await
        .inspect(|_| observe_cart_mutation("update", "ok"))
        .map_err(|error| {
            observe_cart_mutation("update", outcome(&error));

            into_status_error(error)
        })?;

    Ok(Json(change.into()))
}
