//! Cart Count Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Cart Count Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartCountResponse {
    /// Units in the cart
    pub count: u64,

    /// Amount payable
    pub total: String,
}

/// Cart Count Handler
///
/// Lightweight summary for badges and headers.
#[endpoint(tags("carts"), summary = "Get Cart Count")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartCountResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_key_or_500()?;

    let cart = state
        .app
        .carts
        .get_cart(session, Timestamp::now())
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartCountResponse {
        count: cart.count(),
        total: cart.total().to_string(),
    }))
}
