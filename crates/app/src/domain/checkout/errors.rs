//! Checkout service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::checkout::input::FieldErrors;

#[derive(Debug, Error)]
pub enum CheckoutServiceError {
    #[error("El carrito está vacío")]
    EmptyCart,

    #[error("Datos inválidos")]
    Validation(FieldErrors),

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CheckoutServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation | ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<FieldErrors> for CheckoutServiceError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}
