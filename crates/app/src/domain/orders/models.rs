//! Order Models

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde_json::Value;
use thiserror::Error;

use crate::{
    domain::{
        catalog::models::{ProductUuid, VariantUuid},
        customers::models::CustomerUuid,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Order Line UUID
pub type OrderLineUuid = TypedUuid<OrderLine>;

/// Fulfilment status of an order.
///
/// Orders move forward along `pending → sent_to_provider → accepted → shipped → delivered`,
/// possibly skipping steps. `canceled` and `error` can be entered from any state that is not
/// terminal, and an errored order may still be canceled. `delivered` and `canceled` are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    SentToProvider,
    Accepted,
    Shipped,
    Delivered,
    Canceled,
    Error,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::SentToProvider,
        OrderStatus::Accepted,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Canceled,
        OrderStatus::Error,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::SentToProvider => "sent_to_provider",
            OrderStatus::Accepted => "accepted",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Canceled => "canceled",
            OrderStatus::Error => "error",
        }
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Canceled)
    }

    /// Position along the fulfilment path, `None` for the side exits.
    fn step(self) -> Option<u8> {
        match self {
            OrderStatus::Pending => Some(0),
            OrderStatus::SentToProvider => Some(1),
            OrderStatus::Accepted => Some(2),
            OrderStatus::Shipped => Some(3),
            OrderStatus::Delivered => Some(4),
            OrderStatus::Canceled | OrderStatus::Error => None,
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        if self == next || self.is_terminal() {
            return false;
        }

        match next {
            OrderStatus::Canceled | OrderStatus::Error => true,
            _ => self
                .step()
                .zip(next.step())
                .is_some_and(|(from, to)| to > from),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status: {0}")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownOrderStatus(s.to_string()))
    }
}

/// Order Model
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub uuid: OrderUuid,
    pub customer_uuid: Option<CustomerUuid>,
    pub status: OrderStatus,
    pub total: Decimal,
    pub provider_order_id: Option<String>,
    pub provider_response: Option<Value>,
    pub tracking_number: Option<String>,
    pub shipping_company: Option<String>,
    pub lines: Vec<OrderLine>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Order {
    /// Total units purchased.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }
}

/// Order Line Model
///
/// Product and variant references go `None` if the catalog entry is later deleted; the
/// snapshot fields stay.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub uuid: OrderLineUuid,
    pub order_uuid: OrderUuid,
    pub product_uuid: Option<ProductUuid>,
    pub variant_uuid: Option<VariantUuid>,
    pub sku: String,
    pub product_name: String,
    pub quantity: u32,
    pub price: Decimal,
    pub position: u32,
    pub provider_product_id: Option<String>,
}

impl OrderLine {
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// An externally reported step in an order's fulfilment. Fields left `None` keep their stored
/// value.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderProgress {
    pub status: OrderStatus,
    pub provider_order_id: Option<String>,
    pub provider_response: Option<Value>,
    pub tracking_number: Option<String>,
    pub shipping_company: Option<String>,
}

impl OrderProgress {
    #[must_use]
    pub fn to(status: OrderStatus) -> Self {
        Self {
            status,
            provider_order_id: None,
            provider_response: None,
            tracking_number: None,
            shipping_company: None,
        }
    }
}
