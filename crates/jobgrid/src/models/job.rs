//! Job model.

use crate::builder::{FieldMap, SetClause, UpdatePayload, WhereBuilder, partial_update};
use crate::client::GenericClient;
use crate::error::{DbError, DbResult};
use crate::models::company::Company;
use crate::row::{FromRow, RowExt};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;
use tracing::debug;

/// Updatable job fields are single-word columns, so every wire name resolves
/// to itself.
pub const JOB_FIELDS: FieldMap = FieldMap::EMPTY;

const JOB_COLS: &str = "id, title, salary, equity, company_handle";

const JOB_LIST_COLS: &str = "jobs.id, jobs.title, jobs.salary, jobs.equity, \
                             jobs.company_handle, companies.name AS company_name";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i64>,
    pub equity: Option<f64>,
    pub company_handle: String,
}

impl FromRow for Job {
    fn from_row(row: &Row) -> DbResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            title: row.try_get_column("title")?,
            salary: row.try_get_column("salary")?,
            equity: row.try_get_column("equity")?,
            company_handle: row.try_get_column("company_handle")?,
        })
    }
}

/// A job row from the list projection, joined to its company's display name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: i32,
    pub title: String,
    pub salary: Option<i64>,
    pub equity: Option<f64>,
    pub company_handle: String,
    pub company_name: Option<String>,
}

impl FromRow for JobListing {
    fn from_row(row: &Row) -> DbResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            title: row.try_get_column("title")?,
            salary: row.try_get_column("salary")?,
            equity: row.try_get_column("equity")?,
            company_handle: row.try_get_column("company_handle")?,
            company_name: row.try_get_column("company_name")?,
        })
    }
}

/// A single job with its parent company nested in place of the raw foreign
/// key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobWithCompany {
    pub id: i32,
    pub title: String,
    pub salary: Option<i64>,
    pub equity: Option<f64>,
    pub company: Company,
}

/// Validated input for creating a job.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub salary: Option<i64>,
    #[serde(default)]
    pub equity: Option<f64>,
    pub company_handle: String,
}

/// Optional search criteria for job listings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobFilter {
    pub title: Option<String>,
    pub min_salary: Option<i64>,
    pub has_equity: Option<bool>,
}

impl JobFilter {
    /// Convert to a WHERE fragment.
    ///
    /// Criteria are evaluated in a fixed order regardless of which are
    /// present: salary lower bound, equity flag, then title substring. The
    /// equity flag only contributes when true; false and absent are both
    /// no-ops.
    pub fn to_where(&self) -> WhereBuilder {
        let mut w = WhereBuilder::new();
        if let Some(min) = self.min_salary {
            w.and_gte("salary", min);
        }
        if self.has_equity == Some(true) {
            w.and_raw(r#""equity" > 0"#);
        }
        if let Some(title) = &self.title {
            w.and_contains("title", title);
        }
        w
    }
}

fn list_sql(filter: &JobFilter) -> (String, WhereBuilder) {
    let w = filter.to_where();
    let sql = format!(
        "SELECT {JOB_LIST_COLS} FROM jobs \
         LEFT JOIN companies ON companies.handle = jobs.company_handle\
         {} ORDER BY jobs.title",
        w.where_sql()
    );
    (sql, w)
}

fn update_sql(payload: &UpdatePayload) -> DbResult<(String, SetClause)> {
    let set = partial_update(payload, &JOB_FIELDS)?;
    let sql = format!(
        "UPDATE jobs SET {} WHERE id = ${} RETURNING {JOB_COLS}",
        set.sql(),
        set.next_index()
    );
    Ok((sql, set))
}

impl Job {
    /// Insert a job and return the stored row.
    ///
    /// An unknown company handle surfaces as [`DbError::ForeignKeyViolation`].
    pub async fn create(client: &impl GenericClient, input: &NewJob) -> DbResult<Job> {
        let sql = format!(
            "INSERT INTO jobs (title, salary, equity, company_handle) \
             VALUES ($1, $2, $3, $4) RETURNING {JOB_COLS}"
        );
        debug!(target: "jobgrid::sql", %sql, "insert job");
        let row = client
            .query_one(
                &sql,
                &[
                    &input.title,
                    &input.salary,
                    &input.equity,
                    &input.company_handle,
                ],
            )
            .await?;
        Job::from_row(&row)
    }

    /// List jobs matching the filter, ordered by title, with each company's
    /// display name denormalized into the row.
    pub async fn all(client: &impl GenericClient, filter: &JobFilter) -> DbResult<Vec<JobListing>> {
        let (sql, w) = list_sql(filter);
        debug!(target: "jobgrid::sql", %sql, "list jobs");
        let rows = client.query(&sql, &w.params_ref()).await?;
        JobListing::from_rows(&rows)
    }

    /// Fetch a job by id with its parent company expanded.
    ///
    /// The company lookup runs only after the job row is found.
    pub async fn get(client: &impl GenericClient, id: i32) -> DbResult<JobWithCompany> {
        let sql = format!("SELECT {JOB_COLS} FROM jobs WHERE id = $1");
        debug!(target: "jobgrid::sql", %sql, "get job");
        let row = client
            .query_opt(&sql, &[&id])
            .await?
            .ok_or_else(|| DbError::not_found(format!("no job: {id}")))?;
        let job = Job::from_row(&row)?;
        let company = Company::get(client, &job.company_handle).await?;
        Ok(JobWithCompany {
            id: job.id,
            title: job.title,
            salary: job.salary,
            equity: job.equity,
            company,
        })
    }

    /// Apply a partial update and return the stored row.
    pub async fn update(
        client: &impl GenericClient,
        id: i32,
        payload: &UpdatePayload,
    ) -> DbResult<Job> {
        let (sql, set) = update_sql(payload)?;
        debug!(target: "jobgrid::sql", %sql, "update job");
        let mut params: Vec<&(dyn ToSql + Sync)> = set.params_ref();
        params.push(&id);
        let row = client
            .query_opt(&sql, &params)
            .await?
            .ok_or_else(|| DbError::not_found(format!("no job: {id}")))?;
        Job::from_row(&row)
    }

    /// Delete a job by id.
    pub async fn delete(client: &impl GenericClient, id: i32) -> DbResult<()> {
        let sql = "DELETE FROM jobs WHERE id = $1";
        debug!(target: "jobgrid::sql", sql, "delete job");
        let affected = client.execute(sql, &[&id]).await?;
        if affected == 0 {
            return Err(DbError::not_found(format!("no job: {id}")));
        }
        Ok(())
    }
}
