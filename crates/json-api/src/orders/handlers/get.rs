//! Get Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::models::{Order, OrderLine, OrderUuid};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,

    /// Fulfilment status, e.g. `pending` or `shipped`
    pub status: String,

    /// Amount payable on delivery
    pub total: String,

    /// Total number of units ordered
    pub count: u64,

    pub provider_order_id: Option<String>,
    pub tracking_number: Option<String>,
    pub shipping_company: Option<String>,

    /// Purchased lines in cart order
    pub lines: Vec<OrderLineResponse>,

    pub created_at: String,
    pub updated_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        OrderResponse {
            uuid: order.uuid.into_uuid(),
            status: order.status.to_string(),
            total: order.total.to_string(),
            count: order.count(),
            provider_order_id: order.provider_order_id,
            tracking_number: order.tracking_number,
            shipping_company: order.shipping_company,
            lines: order.lines.into_iter().map(OrderLineResponse::from).collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Order Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderLineResponse {
    pub uuid: Uuid,

    /// Absent once the product has been deleted from the catalog
    pub product_uuid: Option<Uuid>,

    /// Absent once the variant has been deleted from the catalog
    pub variant_uuid: Option<Uuid>,

    pub sku: String,
    pub product_name: String,
    pub quantity: u32,

    /// Unit price charged at purchase
    pub price: String,

    pub subtotal: String,
}

impl From<OrderLine> for OrderLineResponse {
    fn from(line: OrderLine) -> Self {
        Self {
            uuid: line.uuid.into_uuid(),
            subtotal: line.subtotal().to_string(),
            product_uuid: line.product_uuid.map(|uuid| uuid.into_uuid()),
            variant_uuid: line.variant_uuid.map(|uuid| uuid.into_uuid()),
            sku: line.sku,
            product_name: line.product_name,
            quantity: line.quantity,
            price: line.price.to_string(),
        }
    }
}

/// Get Order Handler
///
/// Returns an order with its lines.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .orders
        .get_order(OrderUuid::from_uuid(order.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
