//! Orders Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    catalog::models::{ProductUuid, VariantUuid},
    columns::{to_i32, try_get_timestamp, try_get_u32},
    customers::models::CustomerUuid,
    orders::models::{Order, OrderLine, OrderLineUuid, OrderProgress, OrderStatus, OrderUuid},
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_LINE_SQL: &str = include_str!("sql/create_order_line.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const GET_ORDER_LINES_SQL: &str = include_str!("sql/get_order_lines.sql");
const LOCK_ORDER_STATUS_SQL: &str = include_str!("sql/lock_order_status.sql");
const UPDATE_ORDER_PROGRESS_SQL: &str = include_str!("sql/update_order_progress.sql");

/// Header row of a new order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NewOrder {
    pub(crate) uuid: OrderUuid,
    pub(crate) customer_uuid: CustomerUuid,
    pub(crate) total: Decimal,
}

/// Snapshot of one purchased cart line.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NewOrderLine {
    pub(crate) product_uuid: ProductUuid,
    pub(crate) variant_uuid: VariantUuid,
    pub(crate) sku: String,
    pub(crate) product_name: String,
    pub(crate) quantity: u32,
    pub(crate) price: Decimal,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert a `pending` order and its lines, numbered in the given order.
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: NewOrder,
        lines: Vec<NewOrderLine>,
        now: Timestamp,
    ) -> Result<Order, sqlx::Error> {
        query(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.customer_uuid.into_uuid())
            .bind(OrderStatus::Pending.as_str())
            .bind(order.total)
            .bind(SqlxTimestamp::from(now))
            .execute(&mut **tx)
            .await?;

        for (position, line) in (0_i32..).zip(lines) {
            query(CREATE_ORDER_LINE_SQL)
                .bind(OrderLineUuid::new().into_uuid())
                .bind(order.uuid.into_uuid())
                .bind(line.product_uuid.into_uuid())
                .bind(line.variant_uuid.into_uuid())
                .bind(&line.sku)
                .bind(&line.product_name)
                .bind(to_i32(line.quantity)?)
                .bind(line.price)
                .bind(position)
                .execute(&mut **tx)
                .await?;
        }

        self.get_order(tx, order.uuid).await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Order, sqlx::Error> {
        let mut found = query_as::<Postgres, Order>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        found.lines = query_as::<Postgres, OrderLine>(GET_ORDER_LINES_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        Ok(found)
    }

    /// Lock the order row for the rest of the transaction and read its status.
    pub(crate) async fn lock_order_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderStatus, sqlx::Error> {
        let status: String = query_scalar(LOCK_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        parse_status(&status)
    }

    pub(crate) async fn update_progress(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        progress: OrderProgress,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_ORDER_PROGRESS_SQL)
            .bind(order.into_uuid())
            .bind(progress.status.as_str())
            .bind(progress.provider_order_id)
            .bind(progress.provider_response)
            .bind(progress.tracking_number)
            .bind(progress.shipping_company)
            .bind(SqlxTimestamp::from(now))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn parse_status(status: &str) -> Result<OrderStatus, sqlx::Error> {
    status.parse().map_err(|e| sqlx::Error::ColumnDecode {
        index: "status".to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let customer_uuid: Option<Uuid> = row.try_get("customer_uuid")?;
        let status: String = row.try_get("status")?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            customer_uuid: customer_uuid.map(CustomerUuid::from_uuid),
            status: parse_status(&status)?,
            total: row.try_get("total")?,
            provider_order_id: row.try_get("provider_order_id")?,
            provider_response: row.try_get("provider_response")?,
            tracking_number: row.try_get("tracking_number")?,
            shipping_company: row.try_get("shipping_company")?,
            lines: Vec::new(),
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let product_uuid: Option<Uuid> = row.try_get("product_uuid")?;
        let variant_uuid: Option<Uuid> = row.try_get("variant_uuid")?;

        Ok(Self {
            uuid: OrderLineUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            product_uuid: product_uuid.map(ProductUuid::from_uuid),
            variant_uuid: variant_uuid.map(VariantUuid::from_uuid),
            sku: row.try_get("sku")?,
            product_name: row.try_get("product_name")?,
            quantity: try_get_u32(row, "quantity")?,
            price: row.try_get("price")?,
            position: try_get_u32(row, "position")?,
            provider_product_id: row.try_get("provider_product_id")?,
        })
    }
}
