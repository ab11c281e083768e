//! Rendering reference lists for scripts and terminals

use std::str::FromStr;
use crate::{Error, Result};
use crate::reference::Reference;
use crate::ui::table::references_table;

/// How a list of references is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One `Authors - Year - Title` line per reference
    #[default]
    Text,
    /// Pretty-printed JSON array
    Json,
    /// Rounded terminal table
    Table,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Table => "table",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            _ => Err(Error::Config(format!("Unknown output format: {}", s))),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Render references in the given format. Text and table output of an empty
/// list is the empty string.
pub fn render(references: &[Reference], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(references
            .iter()
            .map(Reference::format_as_text)
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => serde_json::to_string_pretty(references)
            .map_err(|e| Error::Config(format!("JSON encoding failed: {}", e))),
        OutputFormat::Table => Ok(references_table(references)),
    }
}
