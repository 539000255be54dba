//! Employee domain model.
//!
//! # Responsibility
//! - Hold one employee record and guard every field assignment.
//!
//! # Invariants
//! - `name` and `job_title` are stored trimmed and never blank.
//! - `department_id` referenced an existing department when it was assigned.
//!   Later deletes of that department are not tracked here.
//! - `id` is `None` until the employee is saved, and again after delete.

use crate::model::department::DepartmentId;
use crate::model::validation::{non_empty_trimmed, ValidationError};
use crate::repo::department_repo::DepartmentLookup;
use crate::repo::error::{RepoError, RepoResult};
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Storage-assigned employee row id.
pub type EmployeeId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    id: Option<EmployeeId>,
    name: String,
    job_title: String,
    department_id: DepartmentId,
}

impl Employee {
    /// Creates an unsaved employee.
    ///
    /// # Errors
    /// - `RepoError::Validation` for the first field that fails, checked in
    ///   the order name, job title, department id.
    /// - `RepoError::Db` when the department lookup itself fails.
    pub fn new<D>(
        departments: &D,
        name: &str,
        job_title: &str,
        department_id: DepartmentId,
    ) -> RepoResult<Self>
    where
        D: DepartmentLookup + ?Sized,
    {
        Self::with_id(departments, None, name, job_title, department_id)
    }

    /// Creates an employee with a caller-provided id.
    ///
    /// Passing `Some(id)` does not register anything; only the mapper's
    /// `save` and row reconciliation touch the identity map.
    pub fn with_id<D>(
        departments: &D,
        id: Option<EmployeeId>,
        name: &str,
        job_title: &str,
        department_id: DepartmentId,
    ) -> RepoResult<Self>
    where
        D: DepartmentLookup + ?Sized,
    {
        let name = non_empty_trimmed(name, ValidationError::Name)?;
        let job_title = non_empty_trimmed(job_title, ValidationError::JobTitle)?;
        check_department(departments, department_id)?;

        Ok(Self {
            id,
            name,
            job_title,
            department_id,
        })
    }

    pub fn id(&self) -> Option<EmployeeId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn job_title(&self) -> &str {
        &self.job_title
    }

    pub fn department_id(&self) -> DepartmentId {
        self.department_id
    }

    pub fn set_name(&mut self, value: &str) -> Result<(), ValidationError> {
        self.name = non_empty_trimmed(value, ValidationError::Name)?;
        Ok(())
    }

    pub fn set_job_title(&mut self, value: &str) -> Result<(), ValidationError> {
        self.job_title = non_empty_trimmed(value, ValidationError::JobTitle)?;
        Ok(())
    }

    /// Reassigns the department after confirming it exists right now.
    pub fn set_department_id<D>(&mut self, departments: &D, value: DepartmentId) -> RepoResult<()>
    where
        D: DepartmentLookup + ?Sized,
    {
        check_department(departments, value)?;
        self.department_id = value;
        Ok(())
    }

    pub(crate) fn set_id(&mut self, id: Option<EmployeeId>) {
        self.id = id;
    }
}

impl Display for Employee {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let id = self
            .id
            .map_or_else(|| "None".to_string(), |id| id.to_string());
        write!(
            f,
            "<Employee {id}: {}, {}, Department ID: {}>",
            self.name, self.job_title, self.department_id
        )
    }
}

fn check_department<D>(departments: &D, department_id: DepartmentId) -> RepoResult<()>
where
    D: DepartmentLookup + ?Sized,
{
    if departments.department_exists(department_id)? {
        Ok(())
    } else {
        Err(RepoError::Validation(ValidationError::DepartmentId))
    }
}
