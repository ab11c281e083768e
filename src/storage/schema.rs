//! Schema of the Mendeley Desktop database, as far as this crate reads it
//!
//! The store is owned by the desktop application; nothing here is ever run
//! against a user's library. The DDL below is the column subset the queries
//! depend on, used to build schema-compatible databases for tests and for
//! downstream scripts that want a fixture.

/// Tables every query set expects to find
pub const REQUIRED_TABLES: &[&str] = &[
    "Documents",
    "DocumentContributors",
    "DocumentFiles",
    "Files",
    "Folders",
    "DocumentFolders",
];

/// SQL to create the Documents table
pub const CREATE_DOCUMENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS Documents (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    uuid VARCHAR NOT NULL UNIQUE,
    citationKey VARCHAR,
    year INTEGER,
    title VARCHAR,
    publication VARCHAR
)
"#;

/// SQL to create the DocumentContributors table
pub const CREATE_DOCUMENT_CONTRIBUTORS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS DocumentContributors (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    documentId INTEGER NOT NULL,
    contribution VARCHAR NOT NULL DEFAULT 'DocumentAuthor',
    firstNames VARCHAR,
    lastName VARCHAR NOT NULL
)
"#;

/// SQL to create the Files table
/// Files are content-addressed by hash; localUrl is a percent-encoded file:// URL
pub const CREATE_FILES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS Files (
    hash CHAR[40] PRIMARY KEY,
    localUrl VARCHAR NOT NULL
)
"#;

/// SQL to create the DocumentFiles table
pub const CREATE_DOCUMENT_FILES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS DocumentFiles (
    documentId INTEGER NOT NULL,
    hash CHAR[40] NOT NULL,
    unlinked BOOLEAN NOT NULL DEFAULT 0,
    PRIMARY KEY (documentId, hash)
)
"#;

/// SQL to create the Folders table
/// Top-level folders have parentId = -1
pub const CREATE_FOLDERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS Folders (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    uuid VARCHAR,
    name VARCHAR NOT NULL,
    parentId INTEGER NOT NULL DEFAULT -1
)
"#;

/// SQL to create the DocumentFolders table
pub const CREATE_DOCUMENT_FOLDERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS DocumentFolders (
    documentId INTEGER NOT NULL,
    folderId INTEGER NOT NULL,
    PRIMARY KEY (documentId, folderId)
)
"#;

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    vec![
        CREATE_DOCUMENTS_TABLE,
        CREATE_DOCUMENT_CONTRIBUTORS_TABLE,
        CREATE_FILES_TABLE,
        CREATE_DOCUMENT_FILES_TABLE,
        CREATE_FOLDERS_TABLE,
        CREATE_DOCUMENT_FOLDERS_TABLE,
    ]
}

/// Create every table in a writable connection
///
/// Only for building fixtures: the crate itself opens the real store read-only.
pub fn create_all(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
    for stmt in all_schema_statements() {
        conn.execute(stmt, [])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_covers_required_tables() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        create_all(&conn).unwrap();

        for table in REQUIRED_TABLES {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                    [table],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "missing table {}", table);
        }
    }
}
