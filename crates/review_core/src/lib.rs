//! Object mapping for performance reviews stored in SQLite.
//! This crate owns review validation, persistence and identity caching.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use config::StoreConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::employee::{Employee, EmployeeId};
pub use model::review::{
    Review, ReviewHandle, ReviewId, ReviewValidationError, MIN_REVIEW_YEAR,
};
pub use repo::employee_repo::{EmployeeLookup, SqliteEmployeeLookup};
pub use repo::identity_map::IdentityMap;
pub use repo::review_repo::{RepoError, RepoResult, ReviewRow, ReviewStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
