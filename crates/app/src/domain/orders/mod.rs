//! Orders
//!
//! Durable purchase records. Lines snapshot price and quantity at the moment of purchase and
//! never change afterwards; only the order's fulfilment status and provider fields move.

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::OrdersServiceError;
pub use service::*;
