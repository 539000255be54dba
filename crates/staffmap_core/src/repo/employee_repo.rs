//! Employee mapper over the `employees` table.
//!
//! # Responsibility
//! - Issue the fixed per-operation statements for employee rows.
//! - Keep the employee identity map consistent with storage.
//!
//! # Invariants
//! - Each statement runs in autocommit mode and is committed before the
//!   operation returns.
//! - Every row-to-object path goes through `instance_from_db`, so at most one
//!   live instance exists per id.
//! - `department_id` validation goes through the `DepartmentLookup`
//!   collaborator; this mapper never mutates department state.

use crate::model::department::DepartmentId;
use crate::model::employee::{Employee, EmployeeId};
use crate::model::validation::{integer_column, text_field, ValidationError};
use crate::repo::department_repo::{DepartmentLookup, SqliteDepartmentLookup};
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::identity_map::{IdentityMap, Shared};
use log::{debug, warn};
use rusqlite::types::Value;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::cell::RefCell;
use std::rc::Rc;

const EMPLOYEE_SELECT_SQL: &str = "SELECT id, name, job_title, department_id FROM employees";

pub type EmployeeRef = Shared<Employee>;

/// Raw `employees` row as read from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeRow {
    pub id: EmployeeId,
    pub name: Value,
    pub job_title: Value,
    pub department_id: Value,
}

impl EmployeeRow {
    pub fn from_sql_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            job_title: row.get("job_title")?,
            department_id: row.get("department_id")?,
        })
    }
}

/// SQLite-backed employee mapper.
///
/// Owns the employee identity map; dropping the mapper drops the registry.
pub struct EmployeeMapper<'conn, D = SqliteDepartmentLookup<'conn>> {
    conn: &'conn Connection,
    departments: D,
    identity_map: IdentityMap<Employee>,
}

impl<'conn> EmployeeMapper<'conn> {
    /// Creates a mapper that validates departments against the same connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self::with_lookup(conn, SqliteDepartmentLookup::new(conn))
    }
}

impl<'conn, D: DepartmentLookup> EmployeeMapper<'conn, D> {
    pub fn with_lookup(conn: &'conn Connection, departments: D) -> Self {
        Self {
            conn,
            departments,
            identity_map: IdentityMap::new(),
        }
    }

    /// Department collaborator, for callers running `set_department_id`.
    pub fn departments(&self) -> &D {
        &self.departments
    }

    pub fn identity_map(&self) -> &IdentityMap<Employee> {
        &self.identity_map
    }

    pub fn create_table(&self) -> RepoResult<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS employees (
                id INTEGER PRIMARY KEY,
                name TEXT,
                job_title TEXT,
                department_id INTEGER,
                FOREIGN KEY (department_id) REFERENCES departments(id)
            );",
        )?;
        debug!("event=table_create module=repo status=ok table=employees");
        Ok(())
    }

    pub fn drop_table(&self) -> RepoResult<()> {
        self.conn.execute_batch("DROP TABLE IF EXISTS employees;")?;
        debug!("event=table_drop module=repo status=ok table=employees");
        Ok(())
    }

    /// Builds an unsaved employee validated against this mapper's lookup.
    pub fn build(
        &self,
        name: &str,
        job_title: &str,
        department_id: DepartmentId,
    ) -> RepoResult<Employee> {
        Employee::new(&self.departments, name, job_title, department_id)
    }

    /// Inserts a new row and registers the instance under the assigned id.
    ///
    /// An instance that already has an id gets a second row and is re-keyed;
    /// its previous map entry is left in place.
    pub fn save(&mut self, employee: &EmployeeRef) -> RepoResult<EmployeeId> {
        {
            let current = employee.borrow();
            self.conn.execute(
                "INSERT INTO employees (name, job_title, department_id) VALUES (?1, ?2, ?3);",
                params![
                    current.name(),
                    current.job_title(),
                    current.department_id()
                ],
            )?;
        }
        let id = self.conn.last_insert_rowid();

        employee.borrow_mut().set_id(Some(id));
        self.identity_map.insert(id, Rc::clone(employee));
        debug!("event=employee_save module=repo status=ok id={id}");
        Ok(id)
    }

    /// Writes current field values to the row with the instance id.
    ///
    /// Zero affected rows is not an error.
    pub fn update(&self, employee: &EmployeeRef) -> RepoResult<()> {
        let current = employee.borrow();
        let id = current.id().ok_or(RepoError::NotPersisted { entity: "employee" })?;

        let changed = self.conn.execute(
            "UPDATE employees SET name = ?1, job_title = ?2, department_id = ?3 WHERE id = ?4;",
            params![
                current.name(),
                current.job_title(),
                current.department_id(),
                id
            ],
        )?;
        debug!("event=employee_update module=repo status=ok id={id} rows={changed}");
        Ok(())
    }

    /// Deletes the row, drops the identity-map entry and clears the id.
    ///
    /// # Errors
    /// - `RepoError::NotPersisted` when the instance has no id. No statement
    ///   is issued; this is reported apart from identity-map misses.
    /// - `RepoError::IdentityMapMiss` when the id was never registered. The
    ///   row is already gone at that point and the instance keeps its id.
    pub fn delete(&mut self, employee: &EmployeeRef) -> RepoResult<()> {
        let id = employee
            .borrow()
            .id()
            .ok_or(RepoError::NotPersisted { entity: "employee" })?;

        self.conn
            .execute("DELETE FROM employees WHERE id = ?1;", [id])?;

        if self.identity_map.remove(id).is_none() {
            warn!("event=employee_delete module=repo status=error error_code=identity_map_miss id={id}");
            return Err(RepoError::IdentityMapMiss {
                entity: "employee",
                id,
            });
        }

        employee.borrow_mut().set_id(None);
        debug!("event=employee_delete module=repo status=ok id={id}");
        Ok(())
    }

    /// Constructs and saves a new employee.
    pub fn create(
        &mut self,
        name: &str,
        job_title: &str,
        department_id: DepartmentId,
    ) -> RepoResult<EmployeeRef> {
        let employee = Rc::new(RefCell::new(self.build(name, job_title, department_id)?));
        self.save(&employee)?;
        Ok(employee)
    }

    /// Maps a row onto the resident instance for its id, or registers a new one.
    ///
    /// A resident instance is overwritten in place with the row values, so a
    /// refetch applies out-of-band storage changes to the live object. All
    /// fields are validated before any is written, one field at a time in the
    /// order name, job title, department id; the first failure is returned.
    pub fn instance_from_db(&mut self, row: &EmployeeRow) -> RepoResult<EmployeeRef> {
        let name = text_field(&row.name, ValidationError::Name)?;
        let job_title = text_field(&row.job_title, ValidationError::JobTitle)?;
        let department_id = integer_column(&row.department_id, ValidationError::DepartmentId)?;

        if let Some(resident) = self.identity_map.get(row.id) {
            let mut staged = resident.borrow().clone();
            staged.set_name(&name)?;
            staged.set_job_title(&job_title)?;
            staged.set_department_id(&self.departments, department_id)?;
            *resident.borrow_mut() = staged;
            return Ok(resident);
        }

        let employee = Rc::new(RefCell::new(Employee::with_id(
            &self.departments,
            Some(row.id),
            &name,
            &job_title,
            department_id,
        )?));
        self.identity_map.insert(row.id, Rc::clone(&employee));
        Ok(employee)
    }

    pub fn get_all(&mut self) -> RepoResult<Vec<EmployeeRef>> {
        self.select_many(&format!("{EMPLOYEE_SELECT_SQL};"), params![])
    }

    pub fn find_by_id(&mut self, id: EmployeeId) -> RepoResult<Option<EmployeeRef>> {
        let row = self
            .conn
            .query_row(
                &format!("{EMPLOYEE_SELECT_SQL} WHERE id = ?1;"),
                [id],
                EmployeeRow::from_sql_row,
            )
            .optional()?;

        row.map(|row| self.instance_from_db(&row)).transpose()
    }

    /// Returns the first employee (in storage order) with this exact name.
    pub fn find_by_name(&mut self, name: &str) -> RepoResult<Option<EmployeeRef>> {
        let row = self
            .conn
            .query_row(
                &format!("{EMPLOYEE_SELECT_SQL} WHERE name = ?1;"),
                [name],
                EmployeeRow::from_sql_row,
            )
            .optional()?;

        row.map(|row| self.instance_from_db(&row)).transpose()
    }

    /// Lists the employees assigned to one department.
    pub fn find_by_department(
        &mut self,
        department_id: DepartmentId,
    ) -> RepoResult<Vec<EmployeeRef>> {
        self.select_many(
            &format!("{EMPLOYEE_SELECT_SQL} WHERE department_id = ?1;"),
            [department_id],
        )
    }

    fn select_many<P: rusqlite::Params>(
        &mut self,
        sql: &str,
        params: P,
    ) -> RepoResult<Vec<EmployeeRef>> {
        let rows = {
            let mut stmt = self.conn.prepare(sql)?;
            let rows = stmt
                .query_map(params, EmployeeRow::from_sql_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows
        };
        debug!("event=employee_select module=repo status=ok rows={}", rows.len());

        rows.iter().map(|row| self.instance_from_db(row)).collect()
    }
}
