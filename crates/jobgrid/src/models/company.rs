//! Company model.

use crate::builder::{FieldMap, SetClause, UpdatePayload, WhereBuilder, partial_update};
use crate::client::GenericClient;
use crate::error::{DbError, DbResult};
use crate::row::{FromRow, RowExt};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;
use tracing::debug;

/// Wire-name to column translation for company updates.
pub const COMPANY_FIELDS: FieldMap = FieldMap::new(&[
    ("numEmployees", "num_employees"),
    ("logoUrl", "logo_url"),
]);

const COMPANY_COLS: &str = "handle, name, description, num_employees, logo_url";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl FromRow for Company {
    fn from_row(row: &Row) -> DbResult<Self> {
        Ok(Self {
            handle: row.try_get_column("handle")?,
            name: row.try_get_column("name")?,
            description: row.try_get_column("description")?,
            num_employees: row.try_get_column("num_employees")?,
            logo_url: row.try_get_column("logo_url")?,
        })
    }
}

/// Validated input for creating a company.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub num_employees: Option<i32>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// Optional search criteria for company listings.
///
/// Absent fields contribute no SQL at all. Unknown keys are rejected at
/// deserialization; they never reach the WHERE builder.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyFilter {
    pub name_like: Option<String>,
    pub min_employees: Option<i32>,
    pub max_employees: Option<i32>,
}

impl CompanyFilter {
    /// Convert to a WHERE fragment.
    ///
    /// Criteria are evaluated in a fixed order regardless of which are
    /// present: employee lower bound, employee upper bound, then name
    /// substring. Inverted bounds are rejected here rather than producing an
    /// always-false query.
    pub fn to_where(&self) -> DbResult<WhereBuilder> {
        if let (Some(min), Some(max)) = (self.min_employees, self.max_employees)
            && min > max
        {
            return Err(DbError::invalid_range(format!(
                "minEmployees {min} exceeds maxEmployees {max}"
            )));
        }

        let mut w = WhereBuilder::new();
        if let Some(min) = self.min_employees {
            w.and_gte("num_employees", min);
        }
        if let Some(max) = self.max_employees {
            w.and_lte("num_employees", max);
        }
        if let Some(name) = &self.name_like {
            w.and_contains("name", name);
        }
        Ok(w)
    }
}

fn list_sql(filter: &CompanyFilter) -> DbResult<(String, WhereBuilder)> {
    let w = filter.to_where()?;
    let sql = format!(
        "SELECT {COMPANY_COLS} FROM companies{} ORDER BY name",
        w.where_sql()
    );
    Ok((sql, w))
}

fn update_sql(payload: &UpdatePayload) -> DbResult<(String, SetClause)> {
    let set = partial_update(payload, &COMPANY_FIELDS)?;
    let sql = format!(
        "UPDATE companies SET {} WHERE handle = ${} RETURNING {COMPANY_COLS}",
        set.sql(),
        set.next_index()
    );
    Ok((sql, set))
}

impl Company {
    /// Insert a company and return the stored row.
    ///
    /// A duplicate handle surfaces as [`DbError::UniqueViolation`].
    pub async fn create(client: &impl GenericClient, input: &NewCompany) -> DbResult<Company> {
        let sql = format!(
            "INSERT INTO companies (handle, name, description, num_employees, logo_url) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {COMPANY_COLS}"
        );
        debug!(target: "jobgrid::sql", %sql, "insert company");
        let row = client
            .query_one(
                &sql,
                &[
                    &input.handle,
                    &input.name,
                    &input.description,
                    &input.num_employees,
                    &input.logo_url,
                ],
            )
            .await?;
        Company::from_row(&row)
    }

    /// List companies matching the filter, ordered by name.
    pub async fn all(client: &impl GenericClient, filter: &CompanyFilter) -> DbResult<Vec<Company>> {
        let (sql, w) = list_sql(filter)?;
        debug!(target: "jobgrid::sql", %sql, "list companies");
        let rows = client.query(&sql, &w.params_ref()).await?;
        Company::from_rows(&rows)
    }

    /// Fetch a company by handle.
    pub async fn get(client: &impl GenericClient, handle: &str) -> DbResult<Company> {
        let sql = format!("SELECT {COMPANY_COLS} FROM companies WHERE handle = $1");
        debug!(target: "jobgrid::sql", %sql, "get company");
        let row = client
            .query_opt(&sql, &[&handle])
            .await?
            .ok_or_else(|| DbError::not_found(format!("no company: {handle}")))?;
        Company::from_row(&row)
    }

    /// Apply a partial update and return the stored row.
    pub async fn update(
        client: &impl GenericClient,
        handle: &str,
        payload: &UpdatePayload,
    ) -> DbResult<Company> {
        let (sql, set) = update_sql(payload)?;
        debug!(target: "jobgrid::sql", %sql, "update company");
        let mut params: Vec<&(dyn ToSql + Sync)> = set.params_ref();
        params.push(&handle);
        let row = client
            .query_opt(&sql, &params)
            .await?
            .ok_or_else(|| DbError::not_found(format!("no company: {handle}")))?;
        Company::from_row(&row)
    }

    /// Delete a company by handle.
    pub async fn delete(client: &impl GenericClient, handle: &str) -> DbResult<()> {
        let sql = "DELETE FROM companies WHERE handle = $1";
        debug!(target: "jobgrid::sql", sql, "delete company");
        let affected = client.execute(sql, &[&handle]).await?;
        if affected == 0 {
            return Err(DbError::not_found(format!("no company: {handle}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::SqlValue;

    #[test]
    fn list_sql_without_criteria_has_no_where() {
        let (sql, w) = list_sql(&CompanyFilter::default()).unwrap();
        assert_eq!(
            sql,
            "SELECT handle, name, description, num_employees, logo_url \
             FROM companies ORDER BY name"
        );
        assert!(w.values().is_empty());
    }

    #[test]
    fn list_sql_fixed_criteria_order() {
        // Bounds come before the name match regardless of struct literal
        // order, and indices follow emission order.
        let filter = CompanyFilter {
            name_like: Some("net".to_string()),
            min_employees: Some(10),
            max_employees: Some(500),
        };
        let (sql, w) = list_sql(&filter).unwrap();
        assert!(sql.contains(
            r#"WHERE "num_employees" >= $1 AND "num_employees" <= $2 AND "name" ILIKE $3"#
        ));
        assert!(sql.ends_with("ORDER BY name"));
        assert_eq!(
            w.values(),
            &[
                SqlValue::Int(10),
                SqlValue::Int(500),
                SqlValue::Text("%net%".to_string())
            ]
        );
    }

    #[test]
    fn list_sql_single_bound() {
        let filter = CompanyFilter {
            min_employees: Some(3),
            ..Default::default()
        };
        let (sql, w) = list_sql(&filter).unwrap();
        assert!(sql.contains(r#"WHERE "num_employees" >= $1 ORDER BY name"#));
        assert_eq!(w.values(), &[SqlValue::Int(3)]);
    }

    #[test]
    fn inverted_bounds_rejected() {
        let filter = CompanyFilter {
            min_employees: Some(100),
            max_employees: Some(5),
            ..Default::default()
        };
        let err = filter.to_where().unwrap_err();
        assert!(matches!(err, DbError::InvalidRange(_)));
    }

    #[test]
    fn equal_bounds_allowed() {
        let filter = CompanyFilter {
            min_employees: Some(7),
            max_employees: Some(7),
            ..Default::default()
        };
        assert_eq!(filter.to_where().unwrap().values().len(), 2);
    }

    #[test]
    fn update_sql_appends_key_after_set_values() {
        let payload = UpdatePayload::new()
            .set("name", "Acme")
            .set("numEmployees", 42);
        let (sql, set) = update_sql(&payload).unwrap();
        assert_eq!(
            sql,
            "UPDATE companies SET \"name\"=$1, \"num_employees\"=$2 \
             WHERE handle = $3 \
             RETURNING handle, name, description, num_employees, logo_url"
        );
        assert_eq!(
            set.values(),
            &[SqlValue::Text("Acme".to_string()), SqlValue::Int(42)]
        );
    }

    #[test]
    fn update_sql_empty_payload_fails() {
        let err = update_sql(&UpdatePayload::new()).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn filter_deserializes_camel_case() {
        let filter: CompanyFilter =
            serde_json::from_str(r#"{"nameLike": "net", "minEmployees": 2}"#).unwrap();
        assert_eq!(filter.name_like.as_deref(), Some("net"));
        assert_eq!(filter.min_employees, Some(2));
        assert_eq!(filter.max_employees, None);
    }

    #[test]
    fn filter_rejects_unknown_keys() {
        assert!(serde_json::from_str::<CompanyFilter>(r#"{"bogus": 1}"#).is_err());
    }
}
