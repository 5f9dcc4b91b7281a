//! Column decoding helpers shared by the repositories.

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{Row, postgres::PgRow};

pub(crate) fn try_get_u32(row: &PgRow, col: &str) -> Result<u32, sqlx::Error> {
    let value: i32 = row.try_get(col)?;

    u32::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

pub(crate) fn try_get_u64(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let value: i64 = row.try_get(col)?;

    u64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

pub(crate) fn try_get_timestamp(row: &PgRow, col: &str) -> Result<Timestamp, sqlx::Error> {
    Ok(row.try_get::<SqlxTimestamp, _>(col)?.to_jiff())
}

pub(crate) fn to_i32(value: u32) -> Result<i32, sqlx::Error> {
    i32::try_from(value).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}
