//! Get Cart Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::prelude::*;

use crate::{
    carts::{errors::into_status_error, responses::CartResponse},
    extensions::*,
    state::State,
};

/// Get Cart Handler
///
/// Returns the session's cart, rebuilt from its live reservations.
#[endpoint(
    tags("carts"),
    summary = "Get Cart",
    responses(
        (status_code = StatusCode::OK, description = "Current cart"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_key_or_500()?;

    let cart = state
        .app
        .carts
        .get_cart(session, Timestamp::now())
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
