//! Customers Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    columns::try_get_timestamp,
    customers::models::{Customer, CustomerProfile, CustomerUuid},
};

const UPSERT_CUSTOMER_SQL: &str = include_str!("sql/upsert_customer.sql");
const GET_CUSTOMER_SQL: &str = include_str!("sql/get_customer.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCustomersRepository;

impl PgCustomersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Create the profile for `identity_key`, or overwrite every profile field of the existing
    /// one.
    pub(crate) async fn upsert_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        identity_key: &str,
        profile: &CustomerProfile,
        now: Timestamp,
    ) -> Result<Customer, sqlx::Error> {
        query_as::<Postgres, Customer>(UPSERT_CUSTOMER_SQL)
            .bind(CustomerUuid::new().into_uuid())
            .bind(identity_key)
            .bind(&profile.name)
            .bind(&profile.phone)
            .bind(&profile.email)
            .bind(&profile.department)
            .bind(&profile.city)
            .bind(&profile.neighborhood)
            .bind(&profile.address)
            .bind(&profile.note)
            .bind(SqlxTimestamp::from(now))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<Customer, sqlx::Error> {
        query_as::<Postgres, Customer>(GET_CUSTOMER_SQL)
            .bind(customer.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Customer {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CustomerUuid::from_uuid(row.try_get("uuid")?),
            identity_key: row.try_get("identity_key")?,
            profile: CustomerProfile {
                name: row.try_get("name")?,
                phone: row.try_get("phone")?,
                email: row.try_get("email")?,
                department: row.try_get("department")?,
                city: row.try_get("city")?,
                neighborhood: row.try_get("neighborhood")?,
                address: row.try_get("address")?,
                note: row.try_get("note")?,
            },
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}
