//! Employee lookup contract and its SQLite implementation.
//!
//! Review persistence only ever reads employees; writing them belongs to
//! the employee module that owns the `employees` table.

use crate::model::employee::{Employee, EmployeeId};
use crate::repo::review_repo::RepoResult;
use rusqlite::{Connection, OptionalExtension, Row};

/// Resolves employee ids into employee records.
pub trait EmployeeLookup {
    /// Returns `Ok(None)` when no employee has this id.
    fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
}

impl<L: EmployeeLookup + ?Sized> EmployeeLookup for &L {
    fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        (**self).find_by_id(id)
    }
}

/// Reads employees from the `employees` table.
pub struct SqliteEmployeeLookup<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeLookup<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EmployeeLookup for SqliteEmployeeLookup<'_> {
    fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        let employee = self
            .conn
            .query_row(
                "SELECT id, name, job_title FROM employees WHERE id = ?1;",
                [id],
                parse_employee_row,
            )
            .optional()?;
        Ok(employee)
    }
}

fn parse_employee_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee::resolved(
        row.get::<_, EmployeeId>("id")?,
        row.get::<_, String>("name")?,
        row.get::<_, String>("job_title")?,
    ))
}
