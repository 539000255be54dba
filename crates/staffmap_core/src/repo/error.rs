//! Error type shared by the entity mappers.

use crate::db::DbError;
use crate::model::validation::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    /// A field assignment was rejected.
    Validation(ValidationError),
    /// Storage failure, propagated unchanged.
    Db(DbError),
    /// `update`/`delete` was called on an instance that has no id.
    NotPersisted { entity: &'static str },
    /// The identity map has no entry for a persisted id during delete.
    ///
    /// Signals an instance that never went through `save` or row
    /// reconciliation. The row delete has already been committed.
    IdentityMapMiss { entity: &'static str, id: i64 },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotPersisted { entity } => write!(f, "{entity} has not been saved"),
            Self::IdentityMapMiss { entity, id } => {
                write!(f, "{entity} identity map has no entry for id {id}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotPersisted { .. } => None,
            Self::IdentityMapMiss { .. } => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
