//! Customers
//!
//! Purchaser profiles, keyed by a stable identity string. Checkout overwrites the profile with
//! the latest contact and address details on every order.

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::CustomersServiceError;
pub use service::*;
