//! SQLite connection bootstrap for StaffMap core.
//!
//! # Responsibility
//! - Open and configure SQLite handles used by the mappers.
//! - Surface connection-level failures with a dedicated error type.
//!
//! # Invariants
//! - Handles are returned in autocommit mode, so every mapper statement
//!   commits as soon as it completes.
//! - Schema is owned by the mappers (`create_table` / `drop_table`), not by
//!   this module.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

mod open;

pub use open::{open_db, open_db_in_memory, open_db_with};

pub type DbResult<T> = Result<T, DbError>;

/// Default busy timeout applied to every opened handle.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// `PRAGMA foreign_keys = ON` did not take effect on this SQLite build.
    ForeignKeysUnavailable,
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::ForeignKeysUnavailable => {
                write!(f, "foreign key enforcement is not available on this connection")
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::ForeignKeysUnavailable => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Connection settings applied during bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbOptions {
    pub busy_timeout: Duration,
    /// Turns on storage-level `REFERENCES` checks in addition to the
    /// lookup-based `department_id` validation done by the model.
    ///
    /// Defaults to `true`, which is stricter than a bare SQLite handle:
    /// deleting a department that still has employees fails with
    /// `RepoError::Db`, and so does saving an employee whose department was
    /// removed after validation. Set `false` to rely on the lookup check alone.
    pub enforce_foreign_keys: bool,
}

impl Default for DbOptions {
    fn default() -> Self {
        Self {
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            enforce_foreign_keys: true,
        }
    }
}
