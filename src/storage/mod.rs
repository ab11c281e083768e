//! Storage Layer - read-only access to the Mendeley SQLite store
//!
//! The store is owned by Mendeley Desktop. Tables read:
//! - Documents(id, uuid, citationKey, year, title, publication)
//! - DocumentContributors(documentId, lastName)
//! - Files(hash, localUrl) / DocumentFiles(documentId, hash)
//! - Folders(id, name, parentId) / DocumentFolders(documentId, folderId)

pub mod schema;
pub mod connection;

#[cfg(test)]
pub(crate) mod fixture;

pub use connection::{Database, DatabaseOptions};
