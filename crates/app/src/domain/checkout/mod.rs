//! Checkout
//!
//! Turns a session's cart into a durable order. Reservations are left in place: releasing them
//! is a separate cart call made once the shopper has seen the confirmation.

pub mod confirmation;
pub mod errors;
pub mod input;
pub mod service;

pub use errors::CheckoutServiceError;
pub use service::*;
