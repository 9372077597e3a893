//! Review domain model.
//!
//! # Responsibility
//! - Hold one performance-review record in memory.
//! - Validate `year`, `summary` and `employee` on construction and mutation.
//!
//! # Invariants
//! - `year >= MIN_REVIEW_YEAR`.
//! - `summary` is never empty.
//! - `employee` always carries a storage id.
//! - A failed setter leaves the previous value untouched.

use crate::model::employee::{Employee, EmployeeId};
use serde::Serialize;
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Storage identifier of a review row.
pub type ReviewId = i64;

/// Shared review handle handed out by the identity map.
///
/// Every holder of a handle for the same id observes the same object.
pub type ReviewHandle = Rc<RefCell<Review>>;

/// Earliest accepted review year.
pub const MIN_REVIEW_YEAR: i64 = 2000;

/// Field-level validation failure for reviews.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewValidationError {
    InvalidYear(i64),
    EmptySummary,
    UnresolvedEmployee,
}

impl Display for ReviewValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidYear(_) => write!(
                f,
                "Year must be an integer greater than or equal to {MIN_REVIEW_YEAR}"
            ),
            Self::EmptySummary => write!(f, "Summary must be a non-empty string"),
            // Raised for employees without a storage id.
            Self::UnresolvedEmployee => {
                write!(f, "Employee must be an instance of Employee class")
            }
        }
    }
}

impl Error for ReviewValidationError {}

/// One performance review of one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    id: Option<ReviewId>,
    year: i64,
    summary: String,
    employee: Employee,
}

impl Review {
    /// Builds an unsaved review after validating every field.
    ///
    /// Fields are checked in order `year`, `summary`, `employee`; the first
    /// failure is returned.
    pub fn new(
        year: i64,
        summary: impl Into<String>,
        employee: Employee,
    ) -> Result<Self, ReviewValidationError> {
        let summary = summary.into();
        validate_year(year)?;
        validate_summary(&summary)?;
        validate_employee(&employee)?;

        Ok(Self {
            id: None,
            year,
            summary,
            employee,
        })
    }

    /// Wraps this review into a shareable handle.
    pub fn into_handle(self) -> ReviewHandle {
        Rc::new(RefCell::new(self))
    }

    pub fn id(&self) -> Option<ReviewId> {
        self.id
    }

    pub fn year(&self) -> i64 {
        self.year
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn employee(&self) -> &Employee {
        &self.employee
    }

    /// Foreign key written to `reviews.employee_id`.
    pub fn employee_id(&self) -> EmployeeId {
        // Validation guarantees the employee is resolved.
        self.employee.id.unwrap_or_default()
    }

    /// Returns whether this review has a storage row.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn set_year(&mut self, year: i64) -> Result<(), ReviewValidationError> {
        validate_year(year)?;
        self.year = year;
        Ok(())
    }

    pub fn set_summary(&mut self, summary: impl Into<String>) -> Result<(), ReviewValidationError> {
        let summary = summary.into();
        validate_summary(&summary)?;
        self.summary = summary;
        Ok(())
    }

    pub fn set_employee(&mut self, employee: Employee) -> Result<(), ReviewValidationError> {
        validate_employee(&employee)?;
        self.employee = employee;
        Ok(())
    }

    pub(crate) fn assign_id(&mut self, id: ReviewId) {
        self.id = Some(id);
    }

    pub(crate) fn clear_id(&mut self) {
        self.id = None;
    }
}

impl Display for Review {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let id = self
            .id
            .map_or_else(|| "None".to_string(), |id| id.to_string());
        write!(
            f,
            "<Review id={id} year={} summary={} employee_id={}>",
            self.year,
            self.summary,
            self.employee_id()
        )
    }
}

fn validate_year(year: i64) -> Result<(), ReviewValidationError> {
    if year < MIN_REVIEW_YEAR {
        return Err(ReviewValidationError::InvalidYear(year));
    }
    Ok(())
}

fn validate_summary(summary: &str) -> Result<(), ReviewValidationError> {
    if summary.is_empty() {
        return Err(ReviewValidationError::EmptySummary);
    }
    Ok(())
}

fn validate_employee(employee: &Employee) -> Result<(), ReviewValidationError> {
    if !employee.is_resolved() {
        return Err(ReviewValidationError::UnresolvedEmployee);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Review, ReviewValidationError};
    use crate::model::employee::Employee;

    fn employee() -> Employee {
        Employee::resolved(7, "Lee", "Engineer")
    }

    #[test]
    fn display_matches_debug_repr_shape() {
        let mut review = Review::new(2023, "Solid year", employee()).unwrap();
        assert_eq!(
            review.to_string(),
            "<Review id=None year=2023 summary=Solid year employee_id=7>"
        );

        review.assign_id(3);
        assert_eq!(
            review.to_string(),
            "<Review id=3 year=2023 summary=Solid year employee_id=7>"
        );
    }

    #[test]
    fn year_is_checked_before_summary() {
        let err = Review::new(1999, "", employee()).unwrap_err();
        assert_eq!(err, ReviewValidationError::InvalidYear(1999));
    }

    #[test]
    fn clear_id_detaches_review() {
        let mut review = Review::new(2020, "ok", employee()).unwrap();
        review.assign_id(10);
        assert!(review.is_persisted());

        review.clear_id();
        assert_eq!(review.id(), None);
        assert!(!review.is_persisted());
    }
}
