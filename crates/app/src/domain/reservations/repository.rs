//! Reservations Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    catalog::models::VariantUuid,
    columns::{to_i32, try_get_timestamp, try_get_u32},
    reservations::models::{Reservation, ReservationUuid, SessionKey, expires_at},
};

const SWEEP_EXPIRED_SQL: &str = include_str!("sql/sweep_expired.sql");
const FIND_ACTIVE_RESERVATION_SQL: &str = include_str!("sql/find_active_reservation.sql");
const RESERVED_BY_OTHERS_SQL: &str = include_str!("sql/reserved_by_others.sql");
const UPSERT_RESERVATION_SQL: &str = include_str!("sql/upsert_reservation.sql");
const DEACTIVATE_RESERVATION_SQL: &str = include_str!("sql/deactivate_reservation.sql");
const DEACTIVATE_SESSION_RESERVATIONS_SQL: &str =
    include_str!("sql/deactivate_session_reservations.sql");
const LIST_SESSION_RESERVATIONS_SQL: &str = include_str!("sql/list_session_reservations.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgReservationsRepository;

impl PgReservationsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Deactivate every active reservation whose expiry is before `now`.
    pub(crate) async fn sweep_expired(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SWEEP_EXPIRED_SQL)
            .bind(SqlxTimestamp::from(now))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn find_active(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionKey,
        variant: VariantUuid,
        now: Timestamp,
    ) -> Result<Option<Reservation>, sqlx::Error> {
        query_as::<Postgres, Reservation>(FIND_ACTIVE_RESERVATION_SQL)
            .bind(session.into_uuid())
            .bind(variant.into_uuid())
            .bind(SqlxTimestamp::from(now))
            .fetch_optional(&mut **tx)
            .await
    }

    /// Total quantity of `variant` held by sessions other than `session`.
    pub(crate) async fn reserved_by_others(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionKey,
        variant: VariantUuid,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let reserved: i64 = query_scalar(RESERVED_BY_OTHERS_SQL)
            .bind(variant.into_uuid())
            .bind(session.into_uuid())
            .bind(SqlxTimestamp::from(now))
            .fetch_one(&mut **tx)
            .await?;

        u64::try_from(reserved).map_err(|e| sqlx::Error::ColumnDecode {
            index: "reserved".to_string(),
            source: Box::new(e),
        })
    }

    /// Set the session's active hold on `variant` to `quantity` and slide its expiry forward.
    ///
    /// Single statement keyed on the partial unique index, so concurrent callers merge into one
    /// active row instead of creating duplicates.
    pub(crate) async fn upsert(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionKey,
        variant: VariantUuid,
        quantity: u32,
        now: Timestamp,
    ) -> Result<Reservation, sqlx::Error> {
        query_as::<Postgres, Reservation>(UPSERT_RESERVATION_SQL)
            .bind(ReservationUuid::new().into_uuid())
            .bind(session.into_uuid())
            .bind(variant.into_uuid())
            .bind(to_i32(quantity)?)
            .bind(SqlxTimestamp::from(now))
            .bind(SqlxTimestamp::from(expires_at(now)))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn deactivate(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionKey,
        variant: VariantUuid,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DEACTIVATE_RESERVATION_SQL)
            .bind(session.into_uuid())
            .bind(variant.into_uuid())
            .bind(SqlxTimestamp::from(now))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn deactivate_all(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionKey,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DEACTIVATE_SESSION_RESERVATIONS_SQL)
            .bind(session.into_uuid())
            .bind(SqlxTimestamp::from(now))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Every reservation row of the session, active or not.
    pub(crate) async fn list_for_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionKey,
    ) -> Result<Vec<Reservation>, sqlx::Error> {
        query_as::<Postgres, Reservation>(LIST_SESSION_RESERVATIONS_SQL)
            .bind(session.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Reservation {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ReservationUuid::from_uuid(row.try_get("uuid")?),
            session_key: SessionKey::from_uuid(row.try_get("session_key")?),
            variant_uuid: VariantUuid::from_uuid(row.try_get("variant_uuid")?),
            quantity: try_get_u32(row, "quantity")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
            expires_at: try_get_timestamp(row, "expires_at")?,
            is_active: row.try_get("is_active")?,
        })
    }
}
