//! Reference - one bibliographic entry read from the library

use serde::{Deserialize, Serialize};
use std::fmt;

/// A document's citation data, projected from `Documents` and its contributors.
///
/// `authors` is the contributors' last names joined with `", "` in the store's
/// row order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Stable document identifier
    pub uuid: String,
    /// Comma-joined contributor last names
    pub authors: String,
    /// Publication year, when recorded
    pub year: Option<i64>,
    pub title: String,
    /// Journal or venue
    pub publication: Option<String>,
}

impl Reference {
    pub fn new(
        uuid: impl Into<String>,
        authors: impl Into<String>,
        year: Option<i64>,
        title: impl Into<String>,
        publication: Option<String>,
    ) -> Self {
        Self {
            uuid: uuid.into(),
            authors: authors.into(),
            year,
            title: title.into(),
            publication,
        }
    }

    /// `Authors - Year - Title`, or `Authors - Title` without a year
    pub fn format_as_text(&self) -> String {
        match self.year {
            Some(year) => format!("{} - {} - {}", self.authors, year, self.title),
            None => format!("{} - {}", self.authors, self.title),
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_as_text())
    }
}
