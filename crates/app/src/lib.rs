//! Storefront cart reservations, checkout and order records.

pub mod context;
pub mod database;
pub mod domain;
pub mod uuids;

#[cfg(test)]
mod test;
