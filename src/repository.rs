//! Reference Repository - the join queries over the Mendeley store
//!
//! Every listing has the same shape:
//! - Documents joined with their contributors
//! - last names concatenated into one `authors` string
//! - grouped by `(year, title)`, so documents sharing both collapse into one row
//! - ordered by `authors`
//!
//! Documents with no contributor rows never appear in a listing.

use std::path::PathBuf;
use rusqlite::{Connection, OptionalExtension, params};
use crate::Result;
use crate::folder::{FolderId, FolderPath, FolderResolver};
use crate::reference::Reference;
use crate::storage::Database;

const LIST_REFERENCES: &str = r#"
SELECT Documents.uuid,
       group_concat(DocumentContributors.lastName, ', ') AS authors,
       Documents.year,
       Documents.title,
       Documents.publication
FROM Documents
JOIN DocumentContributors ON DocumentContributors.documentId = Documents.id
GROUP BY Documents.year, Documents.title
ORDER BY authors
"#;

const FIND_REFERENCE_BY_CITATION_KEY: &str = r#"
SELECT Documents.uuid,
       group_concat(DocumentContributors.lastName, ', ') AS authors,
       Documents.year,
       Documents.title,
       Documents.publication
FROM Documents
JOIN DocumentContributors ON DocumentContributors.documentId = Documents.id
WHERE Documents.citationKey = ?1
GROUP BY Documents.year, Documents.title
ORDER BY authors
"#;

const LIST_REFERENCES_IN_FOLDER: &str = r#"
SELECT Documents.uuid,
       group_concat(DocumentContributors.lastName, ', ') AS authors,
       Documents.year,
       Documents.title,
       Documents.publication
FROM Documents
JOIN DocumentContributors ON DocumentContributors.documentId = Documents.id
JOIN DocumentFolders ON DocumentFolders.documentId = Documents.id
WHERE DocumentFolders.folderId = ?1
GROUP BY Documents.year, Documents.title
ORDER BY authors
"#;

const FIND_PRIMARY_FILE_URL: &str = r#"
SELECT Files.localUrl
FROM Files
JOIN DocumentFiles ON DocumentFiles.hash = Files.hash
JOIN Documents ON Documents.id = DocumentFiles.documentId
WHERE Documents.uuid = ?1
LIMIT 1
"#;

/// Read-only repository of references in one Mendeley database
#[derive(Debug, Clone)]
pub struct ReferenceRepository {
    db: Database,
}

impl ReferenceRepository {
    /// Create a repository over a configured database
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create a repository over a database file with default options
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(Database::new(path))
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    // ========== Reference Operations ==========

    /// All references in the library, ordered by authors
    pub fn list_references(&self) -> Result<Vec<Reference>> {
        let references = self.db.with_connection(|conn| query_references(conn, LIST_REFERENCES, params![]))?;
        tracing::debug!("Listed {} references", references.len());
        Ok(references)
    }

    /// The reference whose citation key is `key`, if any.
    ///
    /// Citation keys are expected to be unique. When several `(year, title)`
    /// groups match anyway, only the first one in authors order is returned.
    pub fn find_reference_by_citation_key(&self, key: &str) -> Result<Option<Reference>> {
        let reference = self.db.with_connection(|conn| {
            conn.query_row(FIND_REFERENCE_BY_CITATION_KEY, [key], row_to_reference)
                .optional()
                .map_err(Into::into)
        })?;

        tracing::debug!("Citation key {:?} -> {:?}", key, reference.as_ref().map(|r| &r.uuid));
        Ok(reference)
    }

    /// References in the folder at `folder_path`, e.g. `Confirmation/Debt`.
    ///
    /// Fails with `FolderNotFound` if any segment is missing; there is no
    /// fallback to the whole library.
    pub fn list_references_in_folder(&self, folder_path: &str) -> Result<Vec<Reference>> {
        let folder_id = self.resolve_folder(folder_path)?;
        self.list_references_in_folder_id(folder_id)
    }

    /// References linked to an already-resolved folder id
    pub fn list_references_in_folder_id(&self, folder_id: FolderId) -> Result<Vec<Reference>> {
        let references = self.db.with_connection(|conn| {
            query_references(conn, LIST_REFERENCES_IN_FOLDER, [folder_id.0])
        })?;

        tracing::debug!("Listed {} references in folder {}", references.len(), folder_id);
        Ok(references)
    }

    /// Resolve a `/`-separated folder path to its id
    pub fn resolve_folder(&self, folder_path: &str) -> Result<FolderId> {
        let path = FolderPath::parse(folder_path)?;
        FolderResolver::new(&self.db).resolve(&path)
    }

    // ========== File Operations ==========

    /// `localUrl` of one file attached to the document, still percent-encoded.
    ///
    /// When a document has several files, which one comes back is up to the store.
    pub fn find_primary_file_url(&self, document_uuid: &str) -> Result<Option<String>> {
        self.db.with_connection(|conn| {
            conn.query_row(FIND_PRIMARY_FILE_URL, [document_uuid], |row| row.get(0))
                .optional()
                .map_err(Into::into)
        })
    }

    /// Same as [`find_primary_file_url`](Self::find_primary_file_url) for a listed reference
    pub fn find_reference_file_url(&self, reference: &Reference) -> Result<Option<String>> {
        self.find_primary_file_url(&reference.uuid)
    }
}

fn query_references<P: rusqlite::Params>(conn: &Connection, sql: &str, params: P) -> Result<Vec<Reference>> {
    let mut stmt = conn.prepare(sql)?;
    let references = stmt
        .query_map(params, row_to_reference)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(references)
}

/// Helper to convert a row to a Reference
fn row_to_reference(row: &rusqlite::Row) -> rusqlite::Result<Reference> {
    let authors: Option<String> = row.get(1)?;
    let title: Option<String> = row.get(3)?;

    Ok(Reference {
        uuid: row.get(0)?,
        authors: authors.unwrap_or_default(),
        year: row.get(2)?,
        title: title.unwrap_or_default(),
        publication: row.get(4)?,
    })
}
