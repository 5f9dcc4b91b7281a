//! Checkout service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::{
        carts::{mirror::CartMirror, repository::PgCartsRepository},
        catalog::repository::PgCatalogRepository,
        checkout::{
            confirmation::OrderConfirmation, errors::CheckoutServiceError, input::CheckoutInput,
        },
        customers::{models::CustomerIdentity, repository::PgCustomersRepository},
        orders::{
            models::{Order, OrderUuid},
            repository::{NewOrder, NewOrderLine, PgOrdersRepository},
        },
        reservations::{models::SessionKey, repository::PgReservationsRepository},
    },
};

/// A committed order together with its confirmation summary.
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub order: Order,
    pub confirmation: OrderConfirmation,
}

#[derive(Debug, Clone)]
pub struct PgCheckoutService {
    db: Db,
    carts_repository: PgCartsRepository,
    catalog_repository: PgCatalogRepository,
    customers_repository: PgCustomersRepository,
    orders_repository: PgOrdersRepository,
    reservations_repository: PgReservationsRepository,
}

impl PgCheckoutService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            catalog_repository: PgCatalogRepository::new(),
            customers_repository: PgCustomersRepository::new(),
            orders_repository: PgOrdersRepository::new(),
            reservations_repository: PgReservationsRepository::new(),
        }
    }

    /// Deactivate expired holds ahead of, and outside, the order transaction.
    async fn release_expired(&self, now: Timestamp) -> Result<(), CheckoutServiceError> {
        let mut tx = self.db.begin().await?;

        self.reservations_repository
            .sweep_expired(&mut tx, now)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}

#[async_trait]
impl CheckoutService for PgCheckoutService {
    async fn place_order(
        &self,
        session: SessionKey,
        identity: CustomerIdentity,
        input: CheckoutInput,
        now: Timestamp,
    ) -> Result<PlacedOrder, CheckoutServiceError> {
        let profile = input.validate()?;

        self.release_expired(now).await?;

        let mut tx = self.db.begin().await?;

        let cart = CartMirror::new(
            self.carts_repository
                .get_cart_lines(&mut tx, session, now)
                .await?,
        );

        if cart.is_empty() {
            return Err(CheckoutServiceError::EmptyCart);
        }

        let identity_key = identity.key(&profile.phone);

        let customer = self
            .customers_repository
            .upsert_profile(&mut tx, &identity_key, &profile, now)
            .await?;

        let lines = cart
            .items()
            .iter()
            .map(|line| NewOrderLine {
                product_uuid: line.product_uuid,
                variant_uuid: line.variant_uuid,
                sku: line.sku.clone(),
                product_name: line.product_name.clone(),
                quantity: line.quantity,
                price: line.unit_price(),
            })
            .collect();

        let order = self
            .orders_repository
            .create_order(
                &mut tx,
                NewOrder {
                    uuid: OrderUuid::new(),
                    customer_uuid: customer.uuid,
                    total: cart.total(),
                },
                lines,
                now,
            )
            .await?;

        for line in cart.items() {
            let touched = self
                .catalog_repository
                .increment_sales_count(&mut tx, line.product_uuid, line.quantity, now)
                .await?;

            if touched == 0 {
                warn!(
                    order = %order.uuid,
                    product = %line.product_uuid,
                    "product missing while updating sales count"
                );
            }
        }

        let confirmation = OrderConfirmation::new(&order, &customer.profile, &cart);

        tx.commit().await?;

        info!(
            order = %order.uuid,
            customer = %customer.uuid,
            total = %order.total,
            lines = order.lines.len(),
            "order placed"
        );

        Ok(PlacedOrder {
            order,
            confirmation,
        })
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Validate the shopper's details, then record an order for everything currently in the
    /// session's cart, upserting the purchaser's profile and bumping sales counters.
    ///
    /// The cart's reservations are not released.
    async fn place_order(
        &self,
        session: SessionKey,
        identity: CustomerIdentity,
        input: CheckoutInput,
        now: Timestamp,
    ) -> Result<PlacedOrder, CheckoutServiceError>;
}
