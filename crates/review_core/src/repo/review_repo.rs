//! Review store: CRUD, hydration and identity caching for `reviews`.
//!
//! # Responsibility
//! - Own the `reviews` table lifecycle and all SQL against it.
//! - Hydrate rows into shared `ReviewHandle`s through the identity map.
//! - Resolve the `employee_id` foreign key through an `EmployeeLookup`.
//!
//! # Invariants
//! - Loading the same row twice yields `Rc::ptr_eq` handles.
//! - `create` writes nothing unless the employee exists and every field is valid.
//! - Each mutating operation runs in one transaction and commits once.
//! - `delete` on an unsaved review is rejected before any SQL runs.
//! - `drop_table` also empties the identity map.

use crate::db::DbError;
use crate::model::employee::EmployeeId;
use crate::model::review::{Review, ReviewHandle, ReviewId, ReviewValidationError};
use crate::repo::employee_repo::{EmployeeLookup, SqliteEmployeeLookup};
use crate::repo::identity_map::IdentityMap;
use log::{debug, info, warn};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS reviews (
    id INTEGER PRIMARY KEY,
    year INTEGER NOT NULL,
    summary TEXT NOT NULL,
    employee_id INTEGER NOT NULL,
    FOREIGN KEY (employee_id) REFERENCES employees (id)
);";

const REVIEW_SELECT_SQL: &str = "SELECT id, year, summary, employee_id FROM reviews";

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for review persistence and lookup operations.
#[derive(Debug)]
pub enum RepoError {
    /// A field violates its rule.
    Validation(ReviewValidationError),
    /// Storage backend failure, passed through untranslated.
    Db(DbError),
    /// Referenced employee does not exist.
    EmployeeNotFound(EmployeeId),
    /// Persisted review has no row to update.
    ReviewNotFound(ReviewId),
    /// Operation needs a review that has been saved.
    NotPersisted,
    /// Insert was requested for a review that already has a row.
    AlreadyPersisted(ReviewId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::EmployeeNotFound(id) => write!(f, "employee not found: {id}"),
            Self::ReviewNotFound(id) => write!(f, "review not found: {id}"),
            Self::NotPersisted => write!(f, "review has not been saved"),
            Self::AlreadyPersisted(id) => write!(f, "review already saved with id {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::EmployeeNotFound(_)
            | Self::ReviewNotFound(_)
            | Self::NotPersisted
            | Self::AlreadyPersisted(_) => None,
        }
    }
}

impl From<ReviewValidationError> for RepoError {
    fn from(value: ReviewValidationError) -> Self {
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

/// Raw `reviews` row prior to hydration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRow {
    pub id: ReviewId,
    pub year: i64,
    pub summary: String,
    pub employee_id: EmployeeId,
}

/// SQLite-backed review store with its own identity map.
///
/// The identity map lives as long as the store, so one store should be
/// kept per connection.
pub struct ReviewStore<'conn, L: EmployeeLookup> {
    conn: &'conn Connection,
    employees: L,
    identity_map: RefCell<IdentityMap>,
}

impl<'conn> ReviewStore<'conn, SqliteEmployeeLookup<'conn>> {
    /// Store that resolves employees from the same connection.
    pub fn with_sqlite_employees(conn: &'conn Connection) -> Self {
        Self::new(conn, SqliteEmployeeLookup::new(conn))
    }
}

impl<'conn, L: EmployeeLookup> ReviewStore<'conn, L> {
    pub fn new(conn: &'conn Connection, employees: L) -> Self {
        Self {
            conn,
            employees,
            identity_map: RefCell::new(IdentityMap::new()),
        }
    }

    /// Creates `reviews` if missing.
    pub fn create_table(&self) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute_batch(CREATE_TABLE_SQL)?;
        tx.commit()?;
        info!("event=review_table_create module=repo status=ok");
        Ok(())
    }

    /// Drops `reviews` if present and forgets every cached review.
    pub fn drop_table(&self) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute_batch("DROP TABLE IF EXISTS reviews;")?;
        tx.commit()?;

        let evicted = {
            let mut identity_map = self.identity_map.borrow_mut();
            let evicted = identity_map.len();
            identity_map.clear();
            evicted
        };
        info!("event=review_table_drop module=repo status=ok evicted={evicted}");
        Ok(())
    }

    /// Resolves the employee, validates, and inserts a new review.
    ///
    /// # Errors
    /// - `EmployeeNotFound` when `employee_id` has no employee.
    /// - `Validation` when `year` or `summary` is invalid.
    ///
    /// Nothing is written when either check fails.
    pub fn create(
        &self,
        year: i64,
        summary: impl Into<String>,
        employee_id: EmployeeId,
    ) -> RepoResult<ReviewHandle> {
        let employee = self
            .employees
            .find_by_id(employee_id)?
            .ok_or(RepoError::EmployeeNotFound(employee_id))?;
        let review = Review::new(year, summary, employee)?.into_handle();
        self.insert(&review)?;
        Ok(review)
    }

    /// Inserts an unsaved review, assigns its id and caches it.
    pub fn insert(&self, review: &ReviewHandle) -> RepoResult<ReviewId> {
        if let Some(id) = review.borrow().id() {
            return Err(RepoError::AlreadyPersisted(id));
        }

        let tx = self.conn.unchecked_transaction()?;
        {
            let current = review.borrow();
            tx.execute(
                "INSERT INTO reviews (year, summary, employee_id) VALUES (?1, ?2, ?3);",
                params![current.year(), current.summary(), current.employee_id()],
            )?;
        }
        let id = tx.last_insert_rowid();
        tx.commit()?;

        review.borrow_mut().assign_id(id);
        self.identity_map
            .borrow_mut()
            .insert(id, Rc::clone(review));
        debug!("event=review_insert module=repo status=ok review_id={id}");
        Ok(id)
    }

    /// Writes current field values over the existing row.
    pub fn update_existing(&self, review: &ReviewHandle) -> RepoResult<()> {
        let current = review.borrow();
        let id = current.id().ok_or(RepoError::NotPersisted)?;

        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute(
            "UPDATE reviews SET year = ?1, summary = ?2, employee_id = ?3 WHERE id = ?4;",
            params![current.year(), current.summary(), current.employee_id(), id],
        )?;
        if changed == 0 {
            return Err(RepoError::ReviewNotFound(id));
        }
        tx.commit()?;

        debug!("event=review_update module=repo status=ok review_id={id}");
        Ok(())
    }

    /// Inserts unsaved reviews and updates persisted ones.
    pub fn save(&self, review: &ReviewHandle) -> RepoResult<()> {
        let persisted = review.borrow().is_persisted();
        if persisted {
            self.update_existing(review)
        } else {
            self.insert(review).map(|_| ())
        }
    }

    /// Same as [`ReviewStore::save`].
    pub fn update(&self, review: &ReviewHandle) -> RepoResult<()> {
        self.save(review)
    }

    /// Deletes the row, evicts the cached handle and clears the review id.
    ///
    /// The review stays usable and can be saved again as a new row.
    ///
    /// # Errors
    /// - `NotPersisted` when the review has no id; no SQL is issued.
    pub fn delete(&self, review: &ReviewHandle) -> RepoResult<()> {
        let id = review.borrow().id().ok_or(RepoError::NotPersisted)?;

        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute("DELETE FROM reviews WHERE id = ?1;", [id])?;
        tx.commit()?;

        if changed == 0 {
            warn!("event=review_delete module=repo status=missing_row review_id={id}");
        }
        let evicted = self.identity_map.borrow_mut().evict(id);
        if let Some(cached) = evicted.filter(|cached| !Rc::ptr_eq(cached, review)) {
            cached.borrow_mut().clear_id();
        }
        review.borrow_mut().clear_id();
        debug!("event=review_delete module=repo status=ok review_id={id}");
        Ok(())
    }

    pub fn find_by_id(&self, id: ReviewId) -> RepoResult<Option<ReviewHandle>> {
        let row = self
            .conn
            .query_row(
                &format!("{REVIEW_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_review_row,
            )
            .optional()?;

        row.map(|row| self.instance_from_row(row)).transpose()
    }

    /// Returns every review in storage row order.
    pub fn get_all(&self) -> RepoResult<Vec<ReviewHandle>> {
        let mut stmt = self.conn.prepare(&format!("{REVIEW_SELECT_SQL};"))?;
        let rows = stmt
            .query_map([], parse_review_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter()
            .map(|row| self.instance_from_row(row))
            .collect()
    }

    /// Hydrates a raw row, reusing the cached handle when one exists.
    ///
    /// A cached handle is returned as-is; the row's field values are not
    /// copied onto it.
    pub fn instance_from_row(&self, row: ReviewRow) -> RepoResult<ReviewHandle> {
        if let Some(cached) = self.identity_map.borrow().get(row.id) {
            return Ok(cached);
        }

        let employee = self
            .employees
            .find_by_id(row.employee_id)?
            .ok_or(RepoError::EmployeeNotFound(row.employee_id))?;
        let mut review = Review::new(row.year, row.summary, employee)?;
        review.assign_id(row.id);

        let handle = review.into_handle();
        self.identity_map
            .borrow_mut()
            .insert(row.id, Rc::clone(&handle));
        debug!(
            "event=review_hydrate module=repo status=ok review_id={}",
            row.id
        );
        Ok(handle)
    }

    pub fn is_cached(&self, id: ReviewId) -> bool {
        self.identity_map.borrow().contains(id)
    }

    pub fn cached_count(&self) -> usize {
        self.identity_map.borrow().len()
    }

    /// Forgets all cached handles. Handles already held by callers stay valid.
    pub fn clear_cache(&self) {
        self.identity_map.borrow_mut().clear();
    }
}

fn parse_review_row(row: &Row<'_>) -> rusqlite::Result<ReviewRow> {
    Ok(ReviewRow {
        id: row.get("id")?,
        year: row.get("year")?,
        summary: row.get("summary")?,
        employee_id: row.get("employee_id")?,
    })
}
