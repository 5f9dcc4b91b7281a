//! Catalog service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    database::Db,
    domain::catalog::{
        errors::CatalogServiceError,
        models::{NewProduct, NewVariant, Product, ProductUuid, Variant, VariantUuid},
        repository::PgCatalogRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    repository: PgCatalogRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCatalogRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    async fn get_variant(&self, variant: VariantUuid) -> Result<Variant, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let variant = self.repository.get_variant(&mut tx, variant).await?;

        tx.commit().await?;

        Ok(variant)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<Product, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn create_variant(&self, variant: NewVariant) -> Result<Variant, CatalogServiceError> {
        if variant.discount_price.is_some_and(|discount| discount > variant.price) {
            return Err(CatalogServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_variant(&mut tx, variant).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn increment_sales_count(
        &self,
        product: ProductUuid,
        by: u32,
        now: Timestamp,
    ) -> Result<bool, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .increment_sales_count(&mut tx, product, by, now)
            .await?;

        tx.commit().await?;

        Ok(rows_affected > 0)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Retrieve a variant with its option labels, whether or not it is active.
    async fn get_variant(&self, variant: VariantUuid) -> Result<Variant, CatalogServiceError>;

    /// Retrieve a product, including its aggregate sales counter.
    async fn get_product(&self, product: ProductUuid) -> Result<Product, CatalogServiceError>;

    /// Creates a new product.
    async fn create_product(&self, product: NewProduct) -> Result<Product, CatalogServiceError>;

    /// Creates a new variant of an existing product.
    async fn create_variant(&self, variant: NewVariant) -> Result<Variant, CatalogServiceError>;

    /// Bump a product's aggregate sales counter. Returns `false` when the product is gone.
    async fn increment_sales_count(
        &self,
        product: ProductUuid,
        by: u32,
        now: Timestamp,
    ) -> Result<bool, CatalogServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::catalog::models::VariantOption,
        test::{
            TestContext,
            helpers::{at, new_variant},
        },
    };

    use super::*;

    #[tokio::test]
    async fn create_variant_round_trips_options_in_order() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx.create_product("Camiseta").await?;

        let mut variant = new_variant(product.uuid, 10, Decimal::from(45_000), None);

        variant.options = vec![
            VariantOption {
                option: "Color".to_string(),
                value: "Rojo".to_string(),
            },
            VariantOption {
                option: "Talla".to_string(),
                value: "M".to_string(),
            },
        ];

        let created = ctx.catalog.create_variant(variant.clone()).await?;
        let fetched = ctx.catalog.get_variant(created.uuid).await?;

        assert_eq!(fetched.uuid, variant.uuid);
        assert_eq!(fetched.options, variant.options);
        assert_eq!(fetched.stock, 10);
        assert_eq!(fetched.effective_price(), Decimal::from(45_000));

        Ok(())
    }

    #[tokio::test]
    async fn get_unknown_variant_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.catalog.get_variant(VariantUuid::new()).await;

        assert!(
            matches!(result, Err(CatalogServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_variant_for_unknown_product_returns_invalid_reference() {
        let ctx = TestContext::new().await;

        let result = ctx
            .catalog
            .create_variant(new_variant(ProductUuid::new(), 1, Decimal::from(10), None))
            .await;

        assert!(
            matches!(result, Err(CatalogServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }

    #[tokio::test]
    async fn discount_above_list_price_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx.create_product("Gorra").await?;

        let result = ctx
            .catalog
            .create_variant(new_variant(
                product.uuid,
                1,
                Decimal::from(100),
                Some(Decimal::from(120)),
            ))
            .await;

        assert!(
            matches!(result, Err(CatalogServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn increment_sales_count_reports_missing_products() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx.create_product("Chaqueta").await?;

        let sold_at = at("18:30");

        assert!(ctx.catalog.increment_sales_count(product.uuid, 3, at("18:00")).await?);
        assert!(ctx.catalog.increment_sales_count(product.uuid, 2, sold_at).await?);
        assert!(
            !ctx.catalog
                .increment_sales_count(ProductUuid::new(), 1, sold_at)
                .await?
        );

        let fetched = ctx.catalog.get_product(product.uuid).await?;

        assert_eq!(fetched.sales_count, 5);
        assert_eq!(fetched.updated_at, sold_at, "updated_at follows the caller's clock");

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_product_slug_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.catalog
            .create_product(NewProduct {
                uuid: ProductUuid::new(),
                name: "Bolso".to_string(),
                slug: "bolso".to_string(),
            })
            .await?;

        let result = ctx
            .catalog
            .create_product(NewProduct {
                uuid: ProductUuid::new(),
                name: "Bolso grande".to_string(),
                slug: "bolso".to_string(),
            })
            .await;

        assert!(
            matches!(result, Err(CatalogServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }
}
