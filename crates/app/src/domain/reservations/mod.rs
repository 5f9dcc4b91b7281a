//! Reservations
//!
//! Time-bounded holds on variant stock, scoped to one cart session. Rows are never deleted:
//! removal, cart clearing and expiry all deactivate.

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::ReservationsServiceError;
pub use service::*;
