//! Customers service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    database::Db,
    domain::customers::{
        errors::CustomersServiceError,
        models::{Customer, CustomerProfile, CustomerUuid},
        repository::PgCustomersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCustomersService {
    db: Db,
    repository: PgCustomersRepository,
}

impl PgCustomersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCustomersRepository::new(),
        }
    }
}

#[async_trait]
impl CustomersService for PgCustomersService {
    async fn get_customer(&self, customer: CustomerUuid) -> Result<Customer, CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        let customer = self.repository.get_customer(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(customer)
    }

    async fn upsert_profile(
        &self,
        identity_key: &str,
        profile: CustomerProfile,
        now: Timestamp,
    ) -> Result<Customer, CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        let customer = self
            .repository
            .upsert_profile(&mut tx, identity_key, &profile, now)
            .await?;

        tx.commit().await?;

        Ok(customer)
    }
}

#[automock]
#[async_trait]
pub trait CustomersService: Send + Sync {
    async fn get_customer(&self, customer: CustomerUuid) -> Result<Customer, CustomersServiceError>;

    /// Create or overwrite the profile stored under `identity_key`.
    async fn upsert_profile(
        &self,
        identity_key: &str,
        profile: CustomerProfile,
        now: Timestamp,
    ) -> Result<Customer, CustomersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{TestContext, helpers::{at, profile}};

    use super::*;

    #[tokio::test]
    async fn upsert_overwrites_every_profile_field() -> TestResult {
        let ctx = TestContext::new().await;

        let first = ctx
            .customers
            .upsert_profile("guest_3001234567", profile("Ana Gómez"), at("10:00"))
            .await?;

        let updated_profile = CustomerProfile {
            email: None,
            neighborhood: None,
            note: None,
            city: "Cali".to_string(),
            ..profile("Ana María Gómez")
        };

        let second = ctx
            .customers
            .upsert_profile("guest_3001234567", updated_profile.clone(), at("11:00"))
            .await?;

        assert_eq!(second.uuid, first.uuid);
        assert_eq!(second.profile, updated_profile);
        assert_eq!(second.created_at, at("10:00"));
        assert_eq!(second.updated_at, at("11:00"));

        let fetched = ctx.customers.get_customer(first.uuid).await?;

        assert_eq!(fetched, second);

        Ok(())
    }

    #[tokio::test]
    async fn get_unknown_customer_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.customers.get_customer(CustomerUuid::new()).await;

        assert!(
            matches!(result, Err(CustomersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
