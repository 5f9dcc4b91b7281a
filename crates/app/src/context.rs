//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db, PoolSettings},
    domain::{
        carts::{CartsService, PgCartsService},
        catalog::{CatalogService, PgCatalogService},
        checkout::{CheckoutService, PgCheckoutService},
        customers::{CustomersService, PgCustomersService},
        orders::{OrdersService, PgOrdersService},
        reservations::{PgReservationsService, ReservationsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub carts: Arc<dyn CartsService>,
    pub catalog: Arc<dyn CatalogService>,
    pub checkout: Arc<dyn CheckoutService>,
    pub customers: Arc<dyn CustomersService>,
    pub orders: Arc<dyn OrdersService>,
    pub reservations: Arc<dyn ReservationsService>,
}

impl AppContext {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            carts: Arc::new(PgCartsService::new(db.clone())),
            catalog: Arc::new(PgCatalogService::new(db.clone())),
            checkout: Arc::new(PgCheckoutService::new(db.clone())),
            customers: Arc::new(PgCustomersService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            reservations: Arc::new(PgReservationsService::new(db)),
        }
    }

    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        Self::from_pool_settings(url, PoolSettings::default()).await
    }

    /// Build application context with explicit pool sizing.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_pool_settings(
        url: &str,
        settings: PoolSettings,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect_with(url, settings)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::new(Db::new(pool)))
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}
