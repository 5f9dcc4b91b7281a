//! Carts Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, types::Json};

use crate::domain::{
    carts::mirror::CartLine,
    catalog::models::{ProductUuid, VariantOption, VariantUuid},
    columns::{try_get_timestamp, try_get_u32},
    reservations::models::SessionKey,
};

const GET_CART_LINES_SQL: &str = include_str!("sql/get_cart_lines.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// The session's live reservations joined with their catalog display fields.
    pub(crate) async fn get_cart_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionKey,
        now: Timestamp,
    ) -> Result<Vec<CartLine>, sqlx::Error> {
        query_as::<Postgres, CartLine>(GET_CART_LINES_SQL)
            .bind(session.into_uuid())
            .bind(SqlxTimestamp::from(now))
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CartLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            variant_uuid: VariantUuid::from_uuid(row.try_get("variant_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            product_slug: row.try_get("product_slug")?,
            sku: row.try_get("sku")?,
            quantity: try_get_u32(row, "quantity")?,
            price: row.try_get("price")?,
            discount_price: row.try_get("discount_price")?,
            options: row.try_get::<Json<Vec<VariantOption>>, _>("options")?.0,
            image_url: row.try_get("image_url")?,
            stock: try_get_u32(row, "stock")?,
            reserved_at: try_get_timestamp(row, "reserved_at")?,
            expires_at: try_get_timestamp(row, "expires_at")?,
        })
    }
}
