//! Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Orden no encontrada"),
        OrdersServiceError::InvalidTransition { .. } => {
            StatusError::conflict().brief(error.to_string())
        }
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
