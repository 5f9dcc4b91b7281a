//! Cart Handlers

pub(crate) mod clear;
pub(crate) mod count;
pub(crate) mod get;
