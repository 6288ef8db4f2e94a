//! Row mapping traits and utilities

use crate::error::DbResult;
use tokio_postgres::Row;

/// Trait for converting a database row into a Rust struct.
pub trait FromRow: Sized {
    /// Convert a database row into Self
    fn from_row(row: &Row) -> DbResult<Self>;

    /// Convert a batch of rows, stopping at the first decode failure.
    fn from_rows(rows: &[Row]) -> DbResult<Vec<Self>> {
        rows.iter().map(Self::from_row).collect()
    }
}

/// Extension trait for Row to provide typed access
pub trait RowExt {
    /// Try to get a column value, returning DbError::Decode on failure
    fn try_get_column<T>(&self, column: &str) -> DbResult<T>
    where
        T: for<'a> tokio_postgres::types::FromSql<'a>;
}

impl RowExt for Row {
    fn try_get_column<T>(&self, column: &str) -> DbResult<T>
    where
        T: for<'a> tokio_postgres::types::FromSql<'a>,
    {
        self.try_get(column)
            .map_err(|e| crate::error::DbError::decode(column, e.to_string()))
    }
}
