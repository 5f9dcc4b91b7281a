//! Reservations service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReservationsServiceError {
    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}
