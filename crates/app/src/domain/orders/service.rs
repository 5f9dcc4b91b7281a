//! Orders service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::orders::{
        errors::OrdersServiceError,
        models::{Order, OrderProgress, OrderUuid},
        repository::PgOrdersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn get_order(&self, order: OrderUuid) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.repository.get_order(&mut tx, order).await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn advance_order(
        &self,
        order: OrderUuid,
        progress: OrderProgress,
        now: Timestamp,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let from = self.repository.lock_order_status(&mut tx, order).await?;
        let to = progress.status;

        if !from.can_transition_to(to) {
            return Err(OrdersServiceError::InvalidTransition { from, to });
        }

        self.repository
            .update_progress(&mut tx, order, progress, now)
            .await?;

        let updated = self.repository.get_order(&mut tx, order).await?;

        tx.commit().await?;

        info!(%order, %from, %to, "order advanced");

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Retrieve an order with its lines.
    async fn get_order(&self, order: OrderUuid) -> Result<Order, OrdersServiceError>;

    /// Move an order to a new status and record any provider or tracking details reported with
    /// it.
    async fn advance_order(
        &self,
        order: OrderUuid,
        progress: OrderProgress,
        now: Timestamp,
    ) -> Result<Order, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::orders::models::OrderStatus,
        test::{TestContext, helpers::at},
    };

    use super::*;

    #[tokio::test]
    async fn advance_records_tracking_and_keeps_unset_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let placed = ctx.place_sample_order().await?;

        let sent = ctx
            .orders
            .advance_order(
                placed.uuid,
                OrderProgress {
                    provider_order_id: Some("PRV-1001".to_string()),
                    ..OrderProgress::to(OrderStatus::SentToProvider)
                },
                at("12:00"),
            )
            .await?;

        assert_eq!(sent.status, OrderStatus::SentToProvider);
        assert_eq!(sent.provider_order_id.as_deref(), Some("PRV-1001"));

        let shipped = ctx
            .orders
            .advance_order(
                placed.uuid,
                OrderProgress {
                    tracking_number: Some("TRK-77".to_string()),
                    shipping_company: Some("Servientrega".to_string()),
                    ..OrderProgress::to(OrderStatus::Shipped)
                },
                at("13:00"),
            )
            .await?;

        assert_eq!(shipped.status, OrderStatus::Shipped);
        assert_eq!(shipped.provider_order_id.as_deref(), Some("PRV-1001"));
        assert_eq!(shipped.tracking_number.as_deref(), Some("TRK-77"));
        assert_eq!(shipped.updated_at, at("13:00"));
        assert_eq!(shipped.lines, placed.lines);

        Ok(())
    }

    #[tokio::test]
    async fn invalid_transition_is_rejected_and_leaves_order_untouched() -> TestResult {
        let ctx = TestContext::new().await;
        let placed = ctx.place_sample_order().await?;

        ctx.orders
            .advance_order(placed.uuid, OrderProgress::to(OrderStatus::Canceled), at("12:00"))
            .await?;

        let result = ctx
            .orders
            .advance_order(placed.uuid, OrderProgress::to(OrderStatus::Accepted), at("12:30"))
            .await;

        assert!(
            matches!(
                result,
                Err(OrdersServiceError::InvalidTransition {
                    from: OrderStatus::Canceled,
                    to: OrderStatus::Accepted,
                })
            ),
            "expected InvalidTransition, got {result:?}"
        );

        let order = ctx.orders.get_order(placed.uuid).await?;

        assert_eq!(order.status, OrderStatus::Canceled);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_order_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.orders.get_order(OrderUuid::new()).await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        let result = ctx
            .orders
            .advance_order(OrderUuid::new(), OrderProgress::to(OrderStatus::Error), at("12:00"))
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
