//! # Mendeley - read-only access to the Mendeley Desktop library
//!
//! Mendeley Desktop keeps its library in a local SQLite database. This crate
//! reads it without ever writing:
//! - Scoped read-only connections, one per operation
//! - Reference listings joined with contributor last names
//! - Virtual folder paths (`Confirmation/Debt`) resolved to folder ids
//! - Primary attached file lookup, plus `file://` URL decoding
//! - Pluggable discovery of the database file from the desktop config

pub mod storage;
pub mod folder;
pub mod reference;
pub mod repository;
pub mod locator;
pub mod file_url;
pub mod export;
pub mod output;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use folder::{FolderId, FolderPath, FolderResolver, ROOT_FOLDER_ID};
pub use reference::Reference;
pub use repository::ReferenceRepository;
pub use storage::{Database, DatabaseOptions};
pub use locator::{DatabaseLocator, DesktopLocator, FixedLocator};

use std::path::PathBuf;

/// Result type alias for Mendeley operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Mendeley operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cannot open database {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Cannot find folder with name {name}")]
    FolderNotFound { name: String },

    #[error("Invalid folder path: {0}")]
    InvalidFolderPath(String),

    #[error("Query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Cannot locate database: {0}")]
    Locate(String),

    #[error("Invalid file URL: {0}")]
    InvalidFileUrl(String),

    #[error("Document file does not exist: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// True when the store rejected a read because another process holds a lock.
    ///
    /// Mendeley Desktop writes to the same file while running, so callers may
    /// want to back off and retry on this.
    pub fn is_busy(&self) -> bool {
        match self {
            Error::Query(e) => storage::connection::is_lock_contention(e),
            _ => false,
        }
    }
}
