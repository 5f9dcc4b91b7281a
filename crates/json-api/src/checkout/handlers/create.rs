//! Place Order Handler

use std::{collections::BTreeMap, sync::Arc};

use jiff::Timestamp;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::{
    checkout::{CheckoutServiceError, PlacedOrder, input::CheckoutInput},
    customers::models::CustomerIdentity,
};

use crate::{
    checkout::errors::into_status_error, extensions::*, observability::observe_order_placed,
    state::State,
};

/// Place Order Request
///
/// Missing text fields are treated as blank so they are reported alongside every other
/// invalid field.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct PlaceOrderRequest {
    pub customer_name: String,

    /// Colombian mobile number; spaces and punctuation are ignored
    pub customer_phone: String,

    pub customer_email: Option<String>,
    pub department: String,
    pub city: String,
    pub neighborhood: Option<String>,
    pub address: String,

    /// Delivery instructions
    pub note: Option<String>,
}

impl From<PlaceOrderRequest> for CheckoutInput {
    fn from(request: PlaceOrderRequest) -> Self {
        CheckoutInput {
            customer_name: request.customer_name,
            customer_phone: request.customer_phone,
            customer_email: request.customer_email,
            department: request.department,
            city: request.city,
            neighborhood: request.neighborhood,
            address: request.address,
            note: request.note,
        }
    }
}

/// Order Placed Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderPlacedResponse {
    pub success: bool,
    pub message: String,
    pub order_uuid: Uuid,

    /// Amount payable on delivery
    pub total: String,

    /// Summary text for the outbound notification
    pub confirmation: String,
}

impl From<PlacedOrder> for OrderPlacedResponse {
    fn from(placed: PlacedOrder) -> Self {
        Self {
            success: true,
            message: "Orden creada exitosamente".to_string(),
            order_uuid: placed.order.uuid.into_uuid(),
            total: placed.order.total.to_string(),
            confirmation: placed.confirmation.to_string(),
        }
    }
}

/// Invalid Checkout Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct InvalidCheckoutResponse {
    pub success: bool,
    pub message: String,

    /// Messages for every failing field, keyed by field name
    pub errors: BTreeMap<String, Vec<String>>,
}

/// Place Order Handler
///
/// Records an order for everything in the session's cart. The cart itself is left intact;
/// clear it once the confirmation has been shown.
#[endpoint(
    tags("checkout"),
    summary = "Place Order",
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid customer details"),
        (status_code = StatusCode::CONFLICT, description = "Cart is empty"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "checkout.place_order",
    skip(json, depot, res),
    fields(
        cart_session = tracing::field::Empty,
        order_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<PlaceOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_key_or_500()?;

    let span = tracing::Span::current();

    span.record("cart_session", tracing::field::display(session));

    let result = state
        .app
        .checkout
        .place_order(
            session,
            CustomerIdentity::Guest,
            json.into_inner().into(),
            Timestamp::now(),
        )
        .await;

    let placed = match result {
        Ok(placed) => placed,
        Err(CheckoutServiceError::Validation(errors)) => {
            res.status_code(StatusCode::UNPROCESSABLE_ENTITY);
            res.render(Json(InvalidCheckoutResponse {
                success: false,
                message: "Datos inválidos".to_string(),
                errors: errors.into_inner(),
            }));

            return Ok(());
        }
        Err(error) => return Err(into_status_error(error)),
    };

    let order = placed.order.uuid;

    span.record("order_uuid", tracing::field::display(order));

    observe_order_placed();

    res.add_header(LOCATION, format!("/orders/{order}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    res.render(Json(OrderPlacedResponse::from(placed)));

    Ok(())
}
