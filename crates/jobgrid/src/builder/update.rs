//! Partial UPDATE statement fragments.

use super::payload::UpdatePayload;
use crate::error::{DbError, DbResult};
use crate::ident;
use crate::value::SqlValue;
use tokio_postgres::types::ToSql;

/// Translation table from logical (wire) field names to physical column
/// names.
///
/// Static per entity type and supplied by the entity module; fields absent
/// from the table use the logical name verbatim as the column name.
#[derive(Debug, Clone, Copy)]
pub struct FieldMap {
    entries: &'static [(&'static str, &'static str)],
}

impl FieldMap {
    /// A map with no renames; every field resolves to itself.
    pub const EMPTY: FieldMap = FieldMap::new(&[]);

    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// Look up the column for a logical field, falling back to the field
    /// name itself.
    pub fn resolve<'a>(&self, field: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|(logical, _)| *logical == field)
            .map(|(_, column)| *column)
            .unwrap_or(field)
    }
}

/// A built `SET` clause plus its bound values.
///
/// Placeholder numbering starts at `$1` and is contiguous, so the caller can
/// append further parameters (typically the row key) starting at
/// [`SetClause::next_index`].
#[derive(Debug)]
pub struct SetClause {
    sql: String,
    values: Vec<SqlValue>,
}

impl SetClause {
    /// The clause body, e.g. `"name"=$1, "num_employees"=$2`.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Bound values in placeholder order.
    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    /// The next free placeholder index (`values.len() + 1`).
    pub fn next_index(&self) -> usize {
        self.values.len() + 1
    }

    /// Get parameter references compatible with tokio-postgres.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.values
            .iter()
            .map(|v| v as &(dyn ToSql + Sync))
            .collect()
    }
}

/// Build a `SET` clause from a partial payload.
///
/// Fields are emitted in payload insertion order; value order matches
/// placeholder order exactly. An empty payload is rejected rather than
/// producing a vacuous `SET`.
pub fn partial_update(payload: &UpdatePayload, map: &FieldMap) -> DbResult<SetClause> {
    if payload.is_empty() {
        return Err(DbError::invalid_input("no data to update"));
    }

    let mut parts = Vec::with_capacity(payload.len());
    let mut values = Vec::with_capacity(payload.len());
    for (idx, (field, value)) in payload.iter().enumerate() {
        parts.push(format!("{}=${}", ident::quote(map.resolve(field)), idx + 1));
        values.push(value.clone());
    }

    Ok(SetClause {
        sql: parts.join(", "),
        values,
    })
}
