//! Persistence for reviews and the employee lookup they depend on.
//!
//! # Responsibility
//! - Keep SQL for the `reviews` table inside `review_repo`.
//! - Hand out one shared in-memory object per persisted review.
//!
//! # Invariants
//! - Every write validates through `Review` before touching storage.
//! - Every mutating operation commits exactly once.

pub mod employee_repo;
pub mod identity_map;
pub mod review_repo;
