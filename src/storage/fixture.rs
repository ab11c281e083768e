//! Throwaway Mendeley-shaped databases for tests

use std::path::{Path, PathBuf};
use rusqlite::{Connection, params};
use tempfile::TempDir;
use super::{schema, Database};

/// A schema-compatible database file inside a temporary directory.
///
/// Writes go through short-lived writable connections so the code under test
/// always sees committed data through its own read-only connections.
pub struct Fixture {
    dir: TempDir,
    path: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("someone@www.mendeley.com.sqlite");
        let conn = Connection::open(&path).unwrap();
        schema::create_all(&conn).unwrap();
        Self { dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn database(&self) -> Database {
        Database::new(&self.path)
    }

    fn conn(&self) -> Connection {
        Connection::open(&self.path).unwrap()
    }

    /// Insert a document with its authors (in contributor row order); returns its id
    pub fn document(
        &self,
        uuid: &str,
        year: Option<i64>,
        title: &str,
        publication: Option<&str>,
        authors: &[&str],
    ) -> i64 {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO Documents (uuid, year, title, publication) VALUES (?1, ?2, ?3, ?4)",
            params![uuid, year, title, publication],
        )
        .unwrap();
        let id = conn.last_insert_rowid();

        for last_name in authors {
            conn.execute(
                "INSERT INTO DocumentContributors (documentId, lastName) VALUES (?1, ?2)",
                params![id, last_name],
            )
            .unwrap();
        }
        id
    }

    pub fn citation_key(&self, document_id: i64, key: &str) {
        self.conn()
            .execute(
                "UPDATE Documents SET citationKey = ?1 WHERE id = ?2",
                params![key, document_id],
            )
            .unwrap();
    }

    /// Insert a folder with an explicit id
    pub fn folder(&self, id: i64, name: &str, parent_id: i64) {
        self.conn()
            .execute(
                "INSERT INTO Folders (id, name, parentId) VALUES (?1, ?2, ?3)",
                params![id, name, parent_id],
            )
            .unwrap();
    }

    pub fn add_to_folder(&self, document_id: i64, folder_id: i64) {
        self.conn()
            .execute(
                "INSERT INTO DocumentFolders (documentId, folderId) VALUES (?1, ?2)",
                params![document_id, folder_id],
            )
            .unwrap();
    }

    /// Attach a file record to a document
    pub fn attach(&self, document_id: i64, hash: &str, local_url: &str) {
        let conn = self.conn();
        conn.execute(
            "INSERT OR IGNORE INTO Files (hash, localUrl) VALUES (?1, ?2)",
            params![hash, local_url],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO DocumentFiles (documentId, hash) VALUES (?1, ?2)",
            params![document_id, hash],
        )
        .unwrap();
    }
}
