//! Employee value referenced by reviews.
//!
//! Employee persistence lives outside this crate; reviews only need a
//! resolved record to hold on to.

use serde::Serialize;

/// Storage identifier of an employee row.
pub type EmployeeId = i64;

/// Employee record as returned by an employee lookup.
///
/// Reviews hold their own copy; later edits to the employee row are not
/// reflected in reviews already loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    /// `None` until the employee row exists in storage.
    pub id: Option<EmployeeId>,
    pub name: String,
    pub job_title: String,
}

impl Employee {
    /// Creates an employee that has not been written to storage yet.
    pub fn new(name: impl Into<String>, job_title: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            job_title: job_title.into(),
        }
    }

    /// Creates an employee backed by an existing storage row.
    pub fn resolved(
        id: EmployeeId,
        name: impl Into<String>,
        job_title: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            job_title: job_title.into(),
        }
    }

    /// Returns whether this employee points at a storage row.
    pub fn is_resolved(&self) -> bool {
        self.id.is_some()
    }
}
