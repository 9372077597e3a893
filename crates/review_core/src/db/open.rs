//! Connection bootstrap utilities for SQLite.
//!
//! # Invariants
//! - Returned connections have collaborator migrations fully applied.
//! - Connections opened through `open_db`/`open_db_in_memory` enforce
//!   foreign keys, so `reviews.employee_id` must reference a real employee.

use super::migrations::apply_migrations;
use super::DbResult;
use crate::config::StoreConfig;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens a SQLite database file and applies pending migrations.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_logged("file", true, DEFAULT_BUSY_TIMEOUT, || {
        Connection::open(path)
    })
}

/// Opens an in-memory SQLite database and applies pending migrations.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_logged("memory", true, DEFAULT_BUSY_TIMEOUT, Connection::open_in_memory)
}

/// Opens a connection as described by `config`.
///
/// `db_path = None` selects an in-memory database.
pub fn open_db_with(config: &StoreConfig) -> DbResult<Connection> {
    let busy_timeout = Duration::from_millis(config.busy_timeout_ms);
    match config.db_path.as_deref() {
        Some(path) => open_logged("file", config.foreign_keys, busy_timeout, || {
            Connection::open(path)
        }),
        None => open_logged(
            "memory",
            config.foreign_keys,
            busy_timeout,
            Connection::open_in_memory,
        ),
    }
}

fn open_logged(
    mode: &str,
    foreign_keys: bool,
    busy_timeout: Duration,
    open: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let mut conn = match open() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&mut conn, foreign_keys, busy_timeout) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={mode} foreign_keys={foreign_keys} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(
    conn: &mut Connection,
    foreign_keys: bool,
    busy_timeout: Duration,
) -> DbResult<()> {
    let pragma = if foreign_keys {
        "PRAGMA foreign_keys = ON;"
    } else {
        "PRAGMA foreign_keys = OFF;"
    };
    conn.execute_batch(pragma)?;
    conn.busy_timeout(busy_timeout)?;
    apply_migrations(conn)?;
    Ok(())
}
