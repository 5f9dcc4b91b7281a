//! Catalog Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, types::Json};

use crate::domain::{
    catalog::models::{
        NewProduct, NewVariant, Product, ProductUuid, Variant, VariantOption, VariantUuid,
    },
    columns::{to_i32, try_get_timestamp, try_get_u32, try_get_u64},
};

const GET_VARIANT_SQL: &str = include_str!("sql/get_variant.sql");
const LOCK_VARIANT_SQL: &str = include_str!("sql/lock_variant.sql");
const CREATE_VARIANT_SQL: &str = include_str!("sql/create_variant.sql");
const CREATE_VARIANT_OPTION_SQL: &str = include_str!("sql/create_variant_option.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const INCREMENT_SALES_COUNT_SQL: &str = include_str!("sql/increment_sales_count.sql");

/// Stock fields of a variant row, read under a row lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct VariantStock {
    pub(crate) uuid: VariantUuid,
    pub(crate) stock: u32,
    pub(crate) is_active: bool,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCatalogRepository;

impl PgCatalogRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_variant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variant: VariantUuid,
    ) -> Result<Variant, sqlx::Error> {
        query_as::<Postgres, Variant>(GET_VARIANT_SQL)
            .bind(variant.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Lock the variant row for the rest of the transaction.
    ///
    /// Every stock check against a variant goes through this lock, which serialises concurrent
    /// reservations of the same variant.
    pub(crate) async fn lock_variant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variant: VariantUuid,
    ) -> Result<Option<VariantStock>, sqlx::Error> {
        let row = query(LOCK_VARIANT_SQL)
            .bind(variant.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        row.map(|row| {
            Ok(VariantStock {
                uuid: VariantUuid::from_uuid(row.try_get("uuid")?),
                stock: try_get_u32(&row, "stock")?,
                is_active: row.try_get("is_active")?,
            })
        })
        .transpose()
    }

    pub(crate) async fn create_variant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variant: NewVariant,
    ) -> Result<Variant, sqlx::Error> {
        query(CREATE_VARIANT_SQL)
            .bind(variant.uuid.into_uuid())
            .bind(variant.product_uuid.into_uuid())
            .bind(&variant.sku)
            .bind(variant.price)
            .bind(variant.discount_price)
            .bind(to_i32(variant.stock)?)
            .bind(variant.is_active)
            .bind(&variant.image_url)
            .execute(&mut **tx)
            .await?;

        for (position, option) in (0_i32..).zip(&variant.options) {
            query(CREATE_VARIANT_OPTION_SQL)
                .bind(uuid::Uuid::now_v7())
                .bind(variant.uuid.into_uuid())
                .bind(&option.option)
                .bind(&option.value)
                .bind(position)
                .execute(&mut **tx)
                .await?;
        }

        self.get_variant(tx, variant.uuid).await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: NewProduct,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(&product.name)
            .bind(&product.slug)
            .fetch_one(&mut **tx)
            .await
    }

    /// Returns the number of product rows touched: zero when the product no longer exists.
    pub(crate) async fn increment_sales_count(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        by: u32,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(INCREMENT_SALES_COUNT_SQL)
            .bind(product.into_uuid())
            .bind(i64::from(by))
            .bind(SqlxTimestamp::from(now))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Variant {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: VariantUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            sku: row.try_get("sku")?,
            price: row.try_get("price")?,
            discount_price: row.try_get("discount_price")?,
            stock: try_get_u32(row, "stock")?,
            is_active: row.try_get("is_active")?,
            image_url: row.try_get("image_url")?,
            options: row.try_get::<Json<Vec<VariantOption>>, _>("options")?.0,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            sales_count: try_get_u64(row, "sales_count")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}
