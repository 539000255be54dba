//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Apply `DbOptions` pragmas before handing the connection to mappers.
//!
//! # Invariants
//! - With `enforce_foreign_keys`, returned connections report `foreign_keys=1`.

use super::{DbError, DbOptions, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::Instant;

/// Opens a SQLite database file with default `DbOptions`.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_db_with(path, &DbOptions::default())
}

/// Opens a SQLite database file with explicit options.
///
/// # Side effects
/// - Creates the file when it does not exist.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db_with(path: impl AsRef<Path>, options: &DbOptions) -> DbResult<Connection> {
    open_logged("file", options, || Connection::open(path))
}

/// Opens a private in-memory database with default `DbOptions`.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_logged("memory", &DbOptions::default(), Connection::open_in_memory)
}

fn open_logged<F>(mode: &str, options: &DbOptions, open: F) -> DbResult<Connection>
where
    F: FnOnce() -> rusqlite::Result<Connection>,
{
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let conn = match open() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_open_failed error={err}",
                started_at.elapsed().as_millis()
            );
            return Err(err.into());
        }
    };

    match configure_connection(&conn, options) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={mode} duration_ms={} foreign_keys={}",
                started_at.elapsed().as_millis(),
                options.enforce_foreign_keys
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_configure_failed error={err}",
                started_at.elapsed().as_millis()
            );
            Err(err)
        }
    }
}

fn configure_connection(conn: &Connection, options: &DbOptions) -> DbResult<()> {
    conn.busy_timeout(options.busy_timeout)?;

    if options.enforce_foreign_keys {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let enabled: i64 = conn.query_row("PRAGMA foreign_keys;", [], |row| row.get(0))?;
        if enabled != 1 {
            return Err(DbError::ForeignKeysUnavailable);
        }
    } else {
        conn.execute_batch("PRAGMA foreign_keys = OFF;")?;
    }

    Ok(())
}
