//! Entity models built on the dynamic SQL fragment builders.
//!
//! Each model owns its column list, its wire-name translation table, and the
//! fixed evaluation order of its filter criteria. Statement construction is
//! kept in pure functions; execution goes through [`crate::GenericClient`].

pub mod company;
pub mod job;

pub use company::{Company, CompanyFilter, NewCompany};
pub use job::{Job, JobFilter, JobListing, JobWithCompany, NewJob};
