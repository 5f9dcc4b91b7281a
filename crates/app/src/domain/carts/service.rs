//! Carts service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        carts::{
            errors::CartsServiceError,
            mirror::CartMirror,
            models::{CartAction, CartChange},
            repository::PgCartsRepository,
        },
        catalog::{models::VariantUuid, repository::PgCatalogRepository},
        reservations::{
            models::{SessionKey, StockLevel},
            repository::PgReservationsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    catalog_repository: PgCatalogRepository,
    reservations_repository: PgReservationsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            catalog_repository: PgCatalogRepository::new(),
            reservations_repository: PgReservationsRepository::new(),
        }
    }

    /// Deactivate expired holds in a transaction of their own.
    ///
    /// Committed before the cart transaction begins, so no swept row is still locked while that
    /// transaction waits on a variant lock held by another session.
    async fn release_expired(&self, now: Timestamp) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let released = self
            .reservations_repository
            .sweep_expired(&mut tx, now)
            .await?;

        tx.commit().await?;

        if released > 0 {
            debug!(released, "released expired holds");
        }

        Ok(())
    }

    /// Lock the variant row and read what this session may hold of it.
    ///
    /// The lock is held until the transaction ends, so the stock check and the write that
    /// follows it cannot interleave with another session's mutation of the same variant.
    async fn stock_level(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionKey,
        variant: VariantUuid,
        now: Timestamp,
        require_active: bool,
    ) -> Result<StockLevel, CartsServiceError> {
        let locked = self
            .catalog_repository
            .lock_variant(tx, variant)
            .await?
            .filter(|locked| locked.is_active || !require_active)
            .ok_or(CartsServiceError::NotFound)?;

        let reserved_by_others = self
            .reservations_repository
            .reserved_by_others(tx, session, variant, now)
            .await?;

        Ok(StockLevel {
            stock: locked.stock,
            reserved_by_others,
        })
    }

    async fn held_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionKey,
        variant: VariantUuid,
        now: Timestamp,
    ) -> Result<Option<u32>, CartsServiceError> {
        let reservation = self
            .reservations_repository
            .find_active(tx, session, variant, now)
            .await?;

        Ok(reservation.map(|reservation| reservation.quantity))
    }

    async fn finish(
        &self,
        mut tx: Transaction<'_, Postgres>,
        session: SessionKey,
        action: CartAction,
        now: Timestamp,
    ) -> Result<CartChange, CartsServiceError> {
        let lines = self
            .carts_repository
            .get_cart_lines(&mut tx, session, now)
            .await?;

        tx.commit().await?;

        Ok(CartChange {
            action,
            cart: CartMirror::new(lines),
        })
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(
        &self,
        session: SessionKey,
        now: Timestamp,
    ) -> Result<CartMirror, CartsServiceError> {
        self.release_expired(now).await?;

        let mut tx = self.db.begin().await?;

        let lines = self
            .carts_repository
            .get_cart_lines(&mut tx, session, now)
            .await?;

        tx.commit().await?;

        Ok(CartMirror::new(lines))
    }

    async fn add_item(
        &self,
        session: SessionKey,
        variant: VariantUuid,
        quantity: u32,
        now: Timestamp,
    ) -> Result<CartChange, CartsServiceError> {
        if quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        self.release_expired(now).await?;

        let mut tx = self.db.begin().await?;

        let level = self
            .stock_level(&mut tx, session, variant, now, true)
            .await?;

        let held = self
            .held_quantity(&mut tx, session, variant, now)
            .await?
            .unwrap_or(0);

        let requested = held.saturating_add(quantity);

        if !level.can_hold(u64::from(requested)) {
            debug!(%variant, requested, available = level.available(), "insufficient stock");

            return Err(CartsServiceError::InsufficientStock {
                available: level.available(),
            });
        }

        self.reservations_repository
            .upsert(&mut tx, session, variant, requested, now)
            .await?;

        self.finish(tx, session, CartAction::Added, now).await
    }

    async fn update_item(
        &self,
        session: SessionKey,
        variant: VariantUuid,
        quantity: i64,
        now: Timestamp,
    ) -> Result<CartChange, CartsServiceError> {
        if quantity <= 0 {
            return self.remove_item(session, variant, now).await;
        }

        self.release_expired(now).await?;

        let mut tx = self.db.begin().await?;

        let level = self
            .stock_level(&mut tx, session, variant, now, false)
            .await?;

        let held = self
            .held_quantity(&mut tx, session, variant, now)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        // Lowering a hold is always allowed; raising it must fit what other sessions left.
        let increasing = quantity > i64::from(held);

        if increasing && !level.can_hold(quantity.unsigned_abs()) {
            return Err(CartsServiceError::InsufficientStock {
                available: level.available(),
            });
        }

        let Ok(quantity) = u32::try_from(quantity) else {
            return Err(CartsServiceError::InsufficientStock {
                available: level.available(),
            });
        };

        self.reservations_repository
            .upsert(&mut tx, session, variant, quantity, now)
            .await?;

        self.finish(tx, session, CartAction::Updated, now).await
    }

    async fn remove_item(
        &self,
        session: SessionKey,
        variant: VariantUuid,
        now: Timestamp,
    ) -> Result<CartChange, CartsServiceError> {
        self.release_expired(now).await?;

        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .reservations_repository
            .deactivate(&mut tx, session, variant, now)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        self.finish(tx, session, CartAction::Removed, now).await
    }

    async fn clear_cart(
        &self,
        session: SessionKey,
        now: Timestamp,
    ) -> Result<CartChange, CartsServiceError> {
        self.release_expired(now).await?;

        let mut tx = self.db.begin().await?;

        let released = self
            .reservations_repository
            .deactivate_all(&mut tx, session, now)
            .await?;

        debug!(released, "cleared cart");

        self.finish(tx, session, CartAction::Cleared, now).await
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Current contents of the session's cart.
    async fn get_cart(
        &self,
        session: SessionKey,
        now: Timestamp,
    ) -> Result<CartMirror, CartsServiceError>;

    /// Add `quantity` units of an active variant, accumulating onto any existing hold and
    /// extending its expiry.
    async fn add_item(
        &self,
        session: SessionKey,
        variant: VariantUuid,
        quantity: u32,
        now: Timestamp,
    ) -> Result<CartChange, CartsServiceError>;

    /// Set the held quantity of a variant already in the cart. Zero or less removes it.
    async fn update_item(
        &self,
        session: SessionKey,
        variant: VariantUuid,
        quantity: i64,
        now: Timestamp,
    ) -> Result<CartChange, CartsServiceError>;

    /// Release a variant from the cart.
    async fn remove_item(
        &self,
        session: SessionKey,
        variant: VariantUuid,
        now: Timestamp,
    ) -> Result<CartChange, CartsServiceError>;

    /// Release everything the session holds. Succeeds on an empty cart.
    async fn clear_cart(
        &self,
        session: SessionKey,
        now: Timestamp,
    ) -> Result<CartChange, CartsServiceError>;
}
