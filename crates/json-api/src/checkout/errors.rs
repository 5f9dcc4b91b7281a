//! Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::checkout::CheckoutServiceError;

pub(crate) fn into_status_error(error: CheckoutServiceError) -> StatusError {
    match error {
        CheckoutServiceError::EmptyCart => StatusError::conflict().brief(error.to_string()),
        CheckoutServiceError::Validation(_) => {
            StatusError::unprocessable_entity().brief(error.to_string())
        }
        CheckoutServiceError::InvalidReference | CheckoutServiceError::InvalidData => {
            error!("checkout rejected by storage constraints: {error}");

            StatusError::bad_request().brief("No se pudo crear la orden")
        }
        CheckoutServiceError::Sql(source) => {
            error!("failed to place order: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn empty_cart_is_a_conflict() {
        let error = into_status_error(CheckoutServiceError::EmptyCart);

        assert_eq!(error.code, StatusCode::CONFLICT);
        assert_eq!(error.brief, "El carrito está vacío");
    }

    #[test]
    fn constraint_failures_use_a_generic_message() {
        let error = into_status_error(CheckoutServiceError::InvalidReference);

        assert_eq!(error.code, StatusCode::BAD_REQUEST);
        assert_eq!(error.brief, "No se pudo crear la orden");
    }
}
