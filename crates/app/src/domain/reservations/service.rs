//! Reservations service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::debug;

use crate::{
    database::Db,
    domain::reservations::{
        errors::ReservationsServiceError,
        models::{Reservation, SessionKey},
        repository::PgReservationsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgReservationsService {
    db: Db,
    repository: PgReservationsRepository,
}

impl PgReservationsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgReservationsRepository::new(),
        }
    }
}

#[async_trait]
impl ReservationsService for PgReservationsService {
    async fn sweep_expired(&self, now: Timestamp) -> Result<u64, ReservationsServiceError> {
        let mut tx = self.db.begin().await?;

        let swept = self.repository.sweep_expired(&mut tx, now).await?;

        tx.commit().await?;

        debug!(swept, "swept expired reservations");

        Ok(swept)
    }

    async fn list_reservations(
        &self,
        session: SessionKey,
    ) -> Result<Vec<Reservation>, ReservationsServiceError> {
        let mut tx = self.db.begin().await?;

        let reservations = self.repository.list_for_session(&mut tx, session).await?;

        tx.commit().await?;

        Ok(reservations)
    }
}

#[automock]
#[async_trait]
pub trait ReservationsService: Send + Sync {
    /// Deactivate every active reservation that expired before `now`, returning how many were
    /// flipped. Running it twice in a row is a no-op the second time.
    async fn sweep_expired(&self, now: Timestamp) -> Result<u64, ReservationsServiceError>;

    /// Every reservation row written for the session, including deactivated ones.
    async fn list_reservations(
        &self,
        session: SessionKey,
    ) -> Result<Vec<Reservation>, ReservationsServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::carts::CartsService,
        test::{TestContext, helpers::at},
    };

    use super::*;

    #[tokio::test]
    async fn sweep_only_flips_expired_rows_and_is_idempotent() -> TestResult {
        let ctx = TestContext::new().await;
        let variant = ctx.create_variant(5, Decimal::from(100)).await?;

        let early = SessionKey::new();
        let late = SessionKey::new();

        ctx.carts.add_item(early, variant.uuid, 1, at("10:00")).await?;
        ctx.carts.add_item(late, variant.uuid, 1, at("12:00")).await?;

        let swept = ctx.reservations.sweep_expired(at("13:30")).await?;

        assert_eq!(swept, 1);

        let again = ctx.reservations.sweep_expired(at("13:30")).await?;

        assert_eq!(again, 0);

        let early_rows = ctx.reservations.list_reservations(early).await?;
        let late_rows = ctx.reservations.list_reservations(late).await?;

        assert_eq!(early_rows.len(), 1);
        assert!(early_rows.iter().all(|r| !r.is_active));
        assert!(late_rows.iter().all(|r| r.is_active));

        Ok(())
    }

    #[tokio::test]
    async fn reservation_just_past_ttl_is_swept() -> TestResult {
        let ctx = TestContext::new().await;
        let variant = ctx.create_variant(5, Decimal::from(100)).await?;
        let session = SessionKey::new();

        ctx.carts.add_item(session, variant.uuid, 2, at("10:00")).await?;

        let at_ttl = ctx
            .reservations
            .sweep_expired(at("10:00") + SignedDuration::from_hours(3))
            .await?;

        assert_eq!(at_ttl, 0, "a hold is still live at exactly its expiry");

        let past_ttl = ctx
            .reservations
            .sweep_expired(at("10:00") + SignedDuration::from_mins(181))
            .await?;

        assert_eq!(past_ttl, 1);

        Ok(())
    }

    #[tokio::test]
    async fn sessions_without_reservations_list_nothing() -> TestResult {
        let ctx = TestContext::new().await;

        let rows = ctx.reservations.list_reservations(SessionKey::new()).await?;

        assert!(rows.is_empty());

        Ok(())
    }
}
