//! Carts
//!
//! The session-facing cart: every mutation is checked against tracked stock and the holds of
//! other sessions, then written through to the session's reservations. The cart contents are
//! rebuilt from those reservations on every call.

pub mod errors;
pub mod mirror;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::CartsServiceError;
pub use service::*;
