//! Folder Resolver - maps virtual folder paths to folder ids
//!
//! Mendeley folders form a tree through `Folders.parentId`. Top-level folders
//! hang off a root that has no row of its own; its id is the sentinel `-1`.
//!
//! Resolution algorithm:
//! 1. Start at the root sentinel
//! 2. For each path segment, find the child of the current folder with that exact name
//! 3. The match becomes the current folder
//! 4. A segment with no match aborts the whole resolution

use std::fmt;
use std::str::FromStr;
use rusqlite::OptionalExtension;
use crate::{Error, Result};
use crate::storage::Database;

/// Identifier of a folder row (or the root sentinel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FolderId(pub i64);

/// The library root. Never present as a row in `Folders`.
pub const ROOT_FOLDER_ID: FolderId = FolderId(-1);

impl FolderId {
    pub fn is_root(&self) -> bool {
        *self == ROOT_FOLDER_ID
    }
}

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("root")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// A root-relative folder path such as `Confirmation/Debt`.
///
/// Leading and trailing `/` are ignored, so `/Confirmation/Debt/` is the same
/// path. Names are case-sensitive and kept verbatim. An empty segment between
/// two separators (`A//B`) is rejected rather than skipped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FolderPath {
    segments: Vec<String>,
}

impl FolderPath {
    /// The empty path, which resolves to the root
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a `/`-separated path
    pub fn parse(path: &str) -> Result<Self> {
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            return Ok(Self::root());
        }

        let segments: Vec<String> = trimmed.split('/').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(Error::InvalidFolderPath(format!(
                "empty folder name in {:?}",
                path
            )));
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl FromStr for FolderPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for FolderPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

/// Resolves folder paths against the `Folders` table
pub struct FolderResolver<'a> {
    db: &'a Database,
}

impl<'a> FolderResolver<'a> {
    /// Create a new resolver
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Resolve a path from the library root
    pub fn resolve(&self, path: &FolderPath) -> Result<FolderId> {
        self.resolve_from(ROOT_FOLDER_ID, path.segments())
    }

    /// Resolve `segments` one at a time, starting below `parent`.
    ///
    /// With no segments the parent itself is returned.
    pub fn resolve_from<S: AsRef<str>>(&self, parent: FolderId, segments: &[S]) -> Result<FolderId> {
        let mut current = parent;

        for segment in segments {
            let name = segment.as_ref();
            current = self
                .lookup_child(current, name)?
                .ok_or_else(|| Error::FolderNotFound {
                    name: name.to_string(),
                })?;
        }

        Ok(current)
    }

    /// Find the direct child of `parent` called `name`.
    ///
    /// Uses a fresh connection per lookup. If several rows share the same
    /// name and parent, the store's first row wins.
    pub fn lookup_child(&self, parent: FolderId, name: &str) -> Result<Option<FolderId>> {
        let found = self.db.with_connection(|conn| {
            conn.query_row(
                "SELECT id FROM Folders WHERE name = ?1 AND parentId = ?2",
                rusqlite::params![name, parent.0],
                |row| row.get::<_, i64>(0),
            )
            .optional()
            .map_err(Into::into)
        })?;

        tracing::debug!("Folder {:?} under {} -> {:?}", name, parent, found);
        Ok(found.map(FolderId))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::fixture::Fixture;

    /// root -> Confirmation(5) -> Debt(9), plus Reading(3) -> Debt(12)
    fn folder_tree() -> Fixture {
        let fixture = Fixture::new();
        fixture.folder(5, "Confirmation", -1);
        fixture.folder(9, "Debt", 5);
        fixture.folder(3, "Reading", -1);
        fixture.folder(12, "Debt", 3);
        fixture
    }

    #[test]
    fn test_parse_strips_separators() {
        let path = FolderPath::parse("/Confirmation/Debt/").unwrap();
        assert_eq!(path.segments(), &["Confirmation", "Debt"]);
        assert_eq!(path.to_string(), "Confirmation/Debt");
    }

    #[test]
    fn test_parse_empty_is_root() {
        assert!(FolderPath::parse("").unwrap().is_root());
        assert!(FolderPath::parse("/").unwrap().is_root());
        assert!(FolderPath::parse("//").unwrap().is_root());
    }

    #[test]
    fn test_parse_rejects_doubled_separator() {
        let err = FolderPath::parse("Confirmation//Debt").unwrap_err();
        assert!(matches!(err, Error::InvalidFolderPath(_)));
    }

    #[test]
    fn test_parse_keeps_case_and_spaces() {
        let path: FolderPath = "My Papers/ drafts".parse().unwrap();
        assert_eq!(path.segments(), &["My Papers", " drafts"]);
    }

    #[test]
    fn test_resolve_empty_path_is_root() {
        let fixture = folder_tree();
        let db = fixture.database();
        let resolver = FolderResolver::new(&db);

        let id = resolver.resolve(&FolderPath::root()).unwrap();
        assert_eq!(id, ROOT_FOLDER_ID);
        assert!(id.is_root());
    }

    #[test]
    fn test_folder_id_display() {
        assert_eq!(ROOT_FOLDER_ID.to_string(), "root");
        assert_eq!(FolderId(9).to_string(), "9");
        assert!(!FolderId(9).is_root());
    }

    #[test]
    fn test_resolve_nested() {
        let fixture = folder_tree();
        let db = fixture.database();
        let resolver = FolderResolver::new(&db);

        let id = resolver.resolve(&FolderPath::parse("Confirmation/Debt").unwrap()).unwrap();
        assert_eq!(id, FolderId(9));

        // Same name under a different parent
        let id = resolver.resolve(&FolderPath::parse("Reading/Debt").unwrap()).unwrap();
        assert_eq!(id, FolderId(12));
    }

    #[test]
    fn test_resolve_is_stepwise() {
        let fixture = folder_tree();
        let db = fixture.database();
        let resolver = FolderResolver::new(&db);

        let whole = resolver.resolve(&FolderPath::parse("Confirmation/Debt").unwrap()).unwrap();
        let first = resolver.resolve(&FolderPath::parse("Confirmation").unwrap()).unwrap();
        let stepped = resolver.resolve_from(first, &["Debt"]).unwrap();
        assert_eq!(whole, stepped);
    }

    #[test]
    fn test_resolve_names_unmatched_segment() {
        let fixture = folder_tree();
        let db = fixture.database();
        let resolver = FolderResolver::new(&db);

        for (path, missing) in [
            ("Nope", "Nope"),
            ("Confirmation/Equity", "Equity"),
            ("Confirmation/Debt/Bonds", "Bonds"),
            ("Confirmation/Nope/Debt", "Nope"),
        ] {
            let err = resolver.resolve(&FolderPath::parse(path).unwrap()).unwrap_err();
            match err {
                Error::FolderNotFound { name } => assert_eq!(name, missing, "path {}", path),
                other => panic!("expected FolderNotFound for {}, got {:?}", path, other),
            }
        }
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let fixture = folder_tree();
        let db = fixture.database();
        let resolver = FolderResolver::new(&db);

        let err = resolver.resolve(&FolderPath::parse("confirmation").unwrap()).unwrap_err();
        assert!(matches!(err, Error::FolderNotFound { name } if name == "confirmation"));
    }

    #[test]
    fn test_nested_folder_not_reachable_from_root() {
        let fixture = folder_tree();
        let db = fixture.database();
        let resolver = FolderResolver::new(&db);

        assert_eq!(resolver.lookup_child(ROOT_FOLDER_ID, "Debt").unwrap(), None);
        assert_eq!(resolver.lookup_child(FolderId(5), "Debt").unwrap(), Some(FolderId(9)));
    }
}
