//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};
use tracing::error;

use storefront_app::domain::reservations::models::SessionKey;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_session_key(&mut self, session: SessionKey);

    /// The cart session resolved by the session middleware.
    fn session_key_or_500(&self) -> Result<SessionKey, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_session_key(&mut self, session: SessionKey) {
        self.inject(session);
    }

    fn session_key_or_500(&self) -> Result<SessionKey, StatusError> {
        self.obtain::<SessionKey>().copied().map_err(|_ignored| {
            error!("cart session missing from depot; is the session middleware mounted?");

            StatusError::internal_server_error()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_key_round_trips_through_the_depot() {
        let mut depot = Depot::new();
        let session = SessionKey::new();

        assert!(depot.session_key_or_500().is_err(), "empty depot has no session");

        depot.insert_session_key(session);

        assert_eq!(depot.session_key_or_500().ok(), Some(session));
    }
}
