//! Row id decoding helpers.

use littlelemon::ids::TypedId;
use sqlx::{Row, postgres::PgRow};

pub(crate) fn try_get_id<T>(row: &PgRow, col: &str) -> Result<TypedId<T>, sqlx::Error> {
    row.try_get::<i64, _>(col).map(TypedId::from_raw)
}

pub(crate) fn try_get_optional_id<T>(
    row: &PgRow,
    col: &str,
) -> Result<Option<TypedId<T>>, sqlx::Error> {
    row.try_get::<Option<i64>, _>(col)
        .map(|id| id.map(TypedId::from_raw))
}

pub(crate) fn try_get_quantity(row: &PgRow, col: &str) -> Result<u32, sqlx::Error> {
    let quantity: i32 = row.try_get(col)?;

    u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}
