//! Shared WHERE clause builder for filtered list queries.

use crate::ident;
use crate::value::SqlValue;
use tokio_postgres::types::ToSql;

/// Reusable WHERE clause accumulator.
///
/// Conditions and their parameters are appended in call order; the parameter
/// counter is a local fold over the emitted values, so placeholder numbers
/// always match value positions. Entity filter types decide which conditions
/// to add and in what order.
#[derive(Debug, Default)]
pub struct WhereBuilder {
    /// WHERE conditions (without leading AND)
    conditions: Vec<String>,
    /// Parameter values
    values: Vec<SqlValue>,
}

impl WhereBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if any conditions have been added.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    fn push_value(&mut self, value: SqlValue) -> usize {
        self.values.push(value);
        self.values.len()
    }

    /// Add AND >= condition.
    pub fn and_gte(&mut self, col: &str, value: impl Into<SqlValue>) -> &mut Self {
        let idx = self.push_value(value.into());
        self.conditions
            .push(format!("{} >= ${}", ident::quote(col), idx));
        self
    }

    /// Add AND <= condition.
    pub fn and_lte(&mut self, col: &str, value: impl Into<SqlValue>) -> &mut Self {
        let idx = self.push_value(value.into());
        self.conditions
            .push(format!("{} <= ${}", ident::quote(col), idx));
        self
    }

    /// Add AND case-insensitive substring match.
    ///
    /// The needle is wrapped in `%` wildcards and bound as a parameter; it is
    /// never concatenated into the SQL text.
    pub fn and_contains(&mut self, col: &str, needle: &str) -> &mut Self {
        let idx = self.push_value(SqlValue::Text(format!("%{}%", needle)));
        self.conditions
            .push(format!("{} ILIKE ${}", ident::quote(col), idx));
        self
    }

    /// Add a literal condition without params.
    ///
    /// # Safety
    ///
    /// This directly concatenates SQL. The caller must ensure safety.
    pub fn and_raw(&mut self, sql: &str) -> &mut Self {
        self.conditions.push(sql.to_string());
        self
    }

    /// Build the condition list joined with ` AND ` (no `WHERE` prefix).
    pub fn build_clause(&self) -> String {
        self.conditions.join(" AND ")
    }

    /// Build the full clause for appending to a base query: empty when no
    /// conditions were added, otherwise ` WHERE <a> AND <b>` with a leading
    /// space.
    pub fn where_sql(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.build_clause())
        }
    }

    /// Bound values in placeholder order.
    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    /// Get parameter references compatible with tokio-postgres.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.values
            .iter()
            .map(|v| v as &(dyn ToSql + Sync))
            .collect()
    }
}
