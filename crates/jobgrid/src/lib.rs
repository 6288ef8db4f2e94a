//! # jobgrid
//!
//! The data backend of a small job-board API: companies and the jobs they
//! post, on PostgreSQL.
//!
//! ## Features
//!
//! - **Dynamic partial updates**: a validated payload of changed fields
//!   becomes a `SET` clause with contiguous `$n` placeholders, wire names
//!   translated to column names through a static [`FieldMap`]
//! - **Dynamic filtered queries**: optional criteria become a `WHERE`
//!   fragment in a fixed evaluation order; absent criteria contribute no SQL
//! - **Parameter-safe by construction**: values are always bound
//!   positionally, never concatenated into statement text
//! - **Transaction-friendly**: pass a transaction anywhere a
//!   [`GenericClient`] is expected
//!
//! ## Example
//!
//! ```ignore
//! use jobgrid::{Company, CompanyFilter, UpdatePayload, create_pool};
//!
//! let pool = create_pool("postgres://localhost/jobs")?;
//! let client = pool.get().await?;
//!
//! // List companies with 10..=500 employees whose name contains "net".
//! let filter = CompanyFilter {
//!     name_like: Some("net".into()),
//!     min_employees: Some(10),
//!     max_employees: Some(500),
//! };
//! let companies = Company::all(&client, &filter).await?;
//!
//! // Change just two fields; everything else stays untouched.
//! let payload = UpdatePayload::new()
//!     .set("name", "NetWorld")
//!     .set("numEmployees", 120);
//! let updated = Company::update(&client, "networld", &payload).await?;
//! ```

pub mod builder;
pub mod client;
pub mod error;
pub mod ident;
pub mod models;
pub mod row;
pub mod value;

pub use builder::{FieldMap, SetClause, UpdatePayload, WhereBuilder, partial_update};
pub use client::GenericClient;
pub use error::{DbError, DbResult};
pub use models::company::{Company, CompanyFilter, NewCompany};
pub use models::job::{Job, JobFilter, JobListing, JobWithCompany, NewJob};
pub use row::{FromRow, RowExt};
pub use value::SqlValue;

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use pool::{create_pool, create_pool_with_config};
