//! Core mapping layer for StaffMap.
//! Translates `departments` / `employees` rows into validated, identity-mapped
//! in-memory instances.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use db::{open_db, open_db_in_memory, open_db_with, DbError, DbOptions};
pub use logging::{default_log_level, init_logging, logging_status, LogConfig};
pub use model::department::{Department, DepartmentId};
pub use model::employee::{Employee, EmployeeId};
pub use model::validation::ValidationError;
pub use repo::department_repo::{
    DepartmentLookup, DepartmentMapper, DepartmentRef, DepartmentRow, SqliteDepartmentLookup,
};
pub use repo::employee_repo::{EmployeeMapper, EmployeeRef, EmployeeRow};
pub use repo::error::{RepoError, RepoResult};
pub use repo::identity_map::{IdentityMap, Shared};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
