//! Department mapper and the department lookup contract.
//!
//! # Responsibility
//! - Persist and reconstruct `Department` records over the `departments`
//!   table.
//! - Expose the existence check used by employee `department_id` validation.
//!
//! # Invariants
//! - Every row-to-object path goes through `instance_from_db`.
//! - Lookups through `DepartmentLookup` never touch the identity map.

use crate::model::department::{Department, DepartmentId};
use crate::model::validation::{text_field, ValidationError};
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::identity_map::{IdentityMap, Shared};
use log::{debug, warn};
use rusqlite::types::Value;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::cell::RefCell;
use std::rc::Rc;

const DEPARTMENT_SELECT_SQL: &str = "SELECT id, name, location FROM departments";

pub type DepartmentRef = Shared<Department>;

/// Existence check for department ids.
pub trait DepartmentLookup {
    fn department_exists(&self, id: DepartmentId) -> RepoResult<bool>;
}

impl<T: DepartmentLookup + ?Sized> DepartmentLookup for &T {
    fn department_exists(&self, id: DepartmentId) -> RepoResult<bool> {
        (**self).department_exists(id)
    }
}

/// Stateless lookup that queries `departments` on a borrowed connection.
#[derive(Debug, Clone, Copy)]
pub struct SqliteDepartmentLookup<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDepartmentLookup<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl DepartmentLookup for SqliteDepartmentLookup<'_> {
    fn department_exists(&self, id: DepartmentId) -> RepoResult<bool> {
        department_exists(self.conn, id)
    }
}

/// Raw `departments` row as read from storage.
///
/// Columns are kept as dynamic SQLite values because the table does not
/// constrain their storage class.
#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentRow {
    pub id: DepartmentId,
    pub name: Value,
    pub location: Value,
}

impl DepartmentRow {
    pub fn from_sql_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            location: row.get("location")?,
        })
    }
}

/// SQLite-backed department mapper with its own identity map.
pub struct DepartmentMapper<'conn> {
    conn: &'conn Connection,
    identity_map: IdentityMap<Department>,
}

impl<'conn> DepartmentMapper<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            identity_map: IdentityMap::new(),
        }
    }

    pub fn identity_map(&self) -> &IdentityMap<Department> {
        &self.identity_map
    }

    pub fn create_table(&self) -> RepoResult<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS departments (
                id INTEGER PRIMARY KEY,
                name TEXT,
                location TEXT
            );",
        )?;
        debug!("event=table_create module=repo status=ok table=departments");
        Ok(())
    }

    pub fn drop_table(&self) -> RepoResult<()> {
        self.conn.execute_batch("DROP TABLE IF EXISTS departments;")?;
        debug!("event=table_drop module=repo status=ok table=departments");
        Ok(())
    }

    /// Inserts a new row and registers the instance under the assigned id.
    pub fn save(&mut self, department: &DepartmentRef) -> RepoResult<DepartmentId> {
        {
            let current = department.borrow();
            self.conn.execute(
                "INSERT INTO departments (name, location) VALUES (?1, ?2);",
                params![current.name(), current.location()],
            )?;
        }
        let id = self.conn.last_insert_rowid();

        department.borrow_mut().set_id(Some(id));
        self.identity_map.insert(id, Rc::clone(department));
        debug!("event=department_save module=repo status=ok id={id}");
        Ok(id)
    }

    /// Writes current field values to the row with the instance id.
    ///
    /// A missing row is not an error.
    pub fn update(&self, department: &DepartmentRef) -> RepoResult<()> {
        let current = department.borrow();
        let id = current.id().ok_or(RepoError::NotPersisted {
            entity: "department",
        })?;

        let changed = self.conn.execute(
            "UPDATE departments SET name = ?1, location = ?2 WHERE id = ?3;",
            params![current.name(), current.location(), id],
        )?;
        debug!("event=department_update module=repo status=ok id={id} rows={changed}");
        Ok(())
    }

    /// Deletes the row, drops the identity-map entry and clears the id.
    ///
    /// # Errors
    /// - `RepoError::NotPersisted` when the instance has no id; no statement
    ///   is issued.
    /// - `RepoError::IdentityMapMiss` when the id was never registered. The
    ///   row is already gone at that point and the instance keeps its id.
    pub fn delete(&mut self, department: &DepartmentRef) -> RepoResult<()> {
        let id = department.borrow().id().ok_or(RepoError::NotPersisted {
            entity: "department",
        })?;

        self.conn
            .execute("DELETE FROM departments WHERE id = ?1;", [id])?;

        if self.identity_map.remove(id).is_none() {
            warn!("event=department_delete module=repo status=error error_code=identity_map_miss id={id}");
            return Err(RepoError::IdentityMapMiss {
                entity: "department",
                id,
            });
        }

        department.borrow_mut().set_id(None);
        debug!("event=department_delete module=repo status=ok id={id}");
        Ok(())
    }

    /// Constructs and saves a new department.
    pub fn create(&mut self, name: &str, location: &str) -> RepoResult<DepartmentRef> {
        let department = Rc::new(RefCell::new(Department::new(name, location)?));
        self.save(&department)?;
        Ok(department)
    }

    /// Maps a row onto the resident instance for its id, or registers a new one.
    ///
    /// A resident instance has its fields overwritten with the row values, so
    /// out-of-band changes in storage become visible on the live object.
    pub fn instance_from_db(&mut self, row: &DepartmentRow) -> RepoResult<DepartmentRef> {
        let name = text_field(&row.name, ValidationError::Name)?;
        let location = text_field(&row.location, ValidationError::Location)?;

        if let Some(resident) = self.identity_map.get(row.id) {
            let mut staged = resident.borrow().clone();
            staged.set_name(&name)?;
            staged.set_location(&location)?;
            *resident.borrow_mut() = staged;
            return Ok(resident);
        }

        let department = Rc::new(RefCell::new(Department::with_id(
            Some(row.id),
            &name,
            &location,
        )?));
        self.identity_map.insert(row.id, Rc::clone(&department));
        Ok(department)
    }

    pub fn get_all(&mut self) -> RepoResult<Vec<DepartmentRef>> {
        let rows = {
            let mut stmt = self.conn.prepare(&format!("{DEPARTMENT_SELECT_SQL};"))?;
            let rows = stmt
                .query_map([], DepartmentRow::from_sql_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows
        };

        rows.iter().map(|row| self.instance_from_db(row)).collect()
    }

    pub fn find_by_id(&mut self, id: DepartmentId) -> RepoResult<Option<DepartmentRef>> {
        let row = self
            .conn
            .query_row(
                &format!("{DEPARTMENT_SELECT_SQL} WHERE id = ?1;"),
                [id],
                DepartmentRow::from_sql_row,
            )
            .optional()?;

        row.map(|row| self.instance_from_db(&row)).transpose()
    }

    /// Returns the first department (in storage order) with this exact name.
    pub fn find_by_name(&mut self, name: &str) -> RepoResult<Option<DepartmentRef>> {
        let row = self
            .conn
            .query_row(
                &format!("{DEPARTMENT_SELECT_SQL} WHERE name = ?1;"),
                [name],
                DepartmentRow::from_sql_row,
            )
            .optional()?;

        row.map(|row| self.instance_from_db(&row)).transpose()
    }
}

impl DepartmentLookup for DepartmentMapper<'_> {
    fn department_exists(&self, id: DepartmentId) -> RepoResult<bool> {
        department_exists(self.conn, id)
    }
}

fn department_exists(conn: &Connection, id: DepartmentId) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM departments WHERE id = ?1);",
        [id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
