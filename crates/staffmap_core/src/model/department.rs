//! Department domain model.
//!
//! # Invariants
//! - `name` and `location` are never blank after construction.
//! - `id` is `None` until the department is saved, and again after delete.

use crate::model::validation::{non_empty_trimmed, ValidationError};
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Storage-assigned department row id.
pub type DepartmentId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Department {
    id: Option<DepartmentId>,
    name: String,
    location: String,
}

impl Department {
    /// Creates an unsaved department.
    pub fn new(name: &str, location: &str) -> Result<Self, ValidationError> {
        Self::with_id(None, name, location)
    }

    /// Creates a department with a caller-provided id (validators still run).
    pub fn with_id(
        id: Option<DepartmentId>,
        name: &str,
        location: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id,
            name: non_empty_trimmed(name, ValidationError::Name)?,
            location: non_empty_trimmed(location, ValidationError::Location)?,
        })
    }

    pub fn id(&self) -> Option<DepartmentId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn set_name(&mut self, value: &str) -> Result<(), ValidationError> {
        self.name = non_empty_trimmed(value, ValidationError::Name)?;
        Ok(())
    }

    pub fn set_location(&mut self, value: &str) -> Result<(), ValidationError> {
        self.location = non_empty_trimmed(value, ValidationError::Location)?;
        Ok(())
    }

    pub(crate) fn set_id(&mut self, id: Option<DepartmentId>) {
        self.id = id;
    }
}

impl Display for Department {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "<Department {id}: {}, {}>", self.name, self.location),
            None => write!(f, "<Department None: {}, {}>", self.name, self.location),
        }
    }
}
