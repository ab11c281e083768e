//! Scoped read-only connections to the Mendeley database

use std::path::{Path, PathBuf};
use std::time::Duration;
use rusqlite::{Connection, OpenFlags};
use crate::{Error, Result};
use super::schema;

/// Options applied to every connection a [`Database`] opens
#[derive(Debug, Clone, Default)]
pub struct DatabaseOptions {
    /// How long SQLite waits on a lock held by Mendeley Desktop before failing.
    /// `None` keeps SQLite's default of failing immediately.
    pub busy_timeout: Option<Duration>,
}

/// Handle to a Mendeley database file.
///
/// Holds only the path and options; every call to [`Database::connect`] or
/// [`Database::with_connection`] opens a fresh connection. There is no pooling.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
    options: DatabaseOptions,
}

impl Database {
    /// Bind to a database file with default options
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_options(path, DatabaseOptions::default())
    }

    /// Bind to a database file with explicit options
    pub fn with_options(path: impl Into<PathBuf>, options: DatabaseOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    /// Path of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a read-only connection.
    ///
    /// Fails with [`Error::Open`] if the file is missing or is not a SQLite
    /// database, and with [`Error::Query`] if another process holds a lock.
    /// The connection is closed when dropped.
    pub fn connect(&self) -> Result<Connection> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let open_error = |source| Error::Open {
            path: self.path.clone(),
            source,
        };

        let conn = Connection::open_with_flags(&self.path, flags).map_err(open_error)?;

        if let Some(timeout) = self.options.busy_timeout {
            conn.busy_timeout(timeout).map_err(open_error)?;
        }

        // SQLite opens lazily; touch the header so a non-database file fails here.
        // A lock held by another process is a failed read, not a broken store.
        conn.query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0))
            .map_err(|e| if is_lock_contention(&e) { Error::Query(e) } else { open_error(e) })?;

        tracing::debug!("Opened {} read-only", self.path.display());
        Ok(conn)
    }

    /// Run `f` against a connection that is released when `f` returns,
    /// whether it succeeded, failed or unwound.
    pub fn with_connection<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.connect()?;
        f(&conn)
    }

    /// Required tables that this database lacks
    pub fn missing_tables(&self) -> Result<Vec<&'static str>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1"
            )?;

            let mut missing = Vec::new();
            for table in schema::REQUIRED_TABLES {
                let count: i64 = stmt.query_row([table], |row| row.get(0))?;
                if count == 0 {
                    missing.push(*table);
                }
            }
            Ok(missing)
        })
    }
}

/// `SQLITE_BUSY` or `SQLITE_LOCKED`
pub(crate) fn is_lock_contention(e: &rusqlite::Error) -> bool {
    matches!(
        e.sqlite_error_code(),
        Some(rusqlite::ErrorCode::DatabaseBusy) | Some(rusqlite::ErrorCode::DatabaseLocked)
    )
}
