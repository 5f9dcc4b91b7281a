//! Storefront Domain Concerns

pub mod carts;
pub mod catalog;
pub mod checkout;
pub(crate) mod columns;
pub mod customers;
pub mod orders;
pub mod reservations;
