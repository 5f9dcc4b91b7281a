//! Carts service errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("Producto no encontrado")]
    NotFound,

    #[error("Stock insuficiente. Disponible: {available}")]
    InsufficientStock { available: u32 },

    #[error("La cantidad debe ser al menos 1")]
    InvalidQuantity,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        match error {
            Error::RowNotFound => Self::NotFound,
            _ => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_stock_message_names_available_units() {
        let error = CartsServiceError::InsufficientStock { available: 5 };

        assert_eq!(error.to_string(), "Stock insuficiente. Disponible: 5");
    }
}
