//! Domain model for performance reviews.
//!
//! # Responsibility
//! - Define the `Review` entity and the `Employee` value it references.
//! - Own field-level validation so no invalid review is ever constructed.
//!
//! # Invariants
//! - A review id is assigned only by persistence and never edited by callers.
//! - `year`, `summary` and `employee` are validated on every assignment.

pub mod employee;
pub mod review;
