//! Entity mappers between SQLite rows and live in-memory instances.
//!
//! # Responsibility
//! - Own one identity map per entity type, scoped to the mapper value.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - At most one live instance per persisted id and mapper.
//! - Storage errors surface unchanged as `RepoError::Db`.

pub mod department_repo;
pub mod employee_repo;
pub mod error;
pub mod identity_map;
