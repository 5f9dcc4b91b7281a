//! Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NotFound => StatusError::not_found().brief(error.to_string()),
        CartsServiceError::InsufficientStock { .. } => {
            StatusError::conflict().brief(error.to_string())
        }
        CartsServiceError::InvalidQuantity => StatusError::bad_request().brief(error.to_string()),
        CartsServiceError::Sql(source) => {
            error!("cart storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

/// Metric label for a failed cart mutation.
pub(crate) fn outcome(error: &CartsServiceError) -> &'static str {
    match error {
        CartsServiceError::NotFound => "not_found",
        CartsServiceError::InsufficientStock { .. } => "insufficient_stock",
        CartsServiceError::InvalidQuantity => "invalid_quantity",
        CartsServiceError::Sql(_) => "error",
    }
}
