//! Catalog
//!
//! The product and variant records the cart reads prices and stock from. Catalog management
//! proper lives elsewhere; this module only exposes lookups, seeding and the sales counter.

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::CatalogServiceError;
pub use service::*;
