//! Copy the files attached to a folder's documents into a directory

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use crate::{Error, Result};
use crate::file_url;
use crate::reference::Reference;
use crate::repository::ReferenceRepository;

/// What happened to one reference during a copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyEvent {
    /// `overwrote` is set when an earlier reference in the same run already
    /// wrote a file with this name
    Copied { from: PathBuf, to: PathBuf, overwrote: bool },
    /// The document has no attached file
    NoFile,
}

/// Outcome of [`copy_folder_files`]
#[derive(Debug, Clone, Default)]
pub struct CopyReport {
    /// Distinct files written to the destination
    pub copied: Vec<PathBuf>,
    /// Targets written more than once because two sources share a file name.
    /// Only the last copy survives.
    pub overwritten: Vec<PathBuf>,
    /// References that had no attached file
    pub skipped: Vec<Reference>,
}

impl std::fmt::Display for CopyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Copy Summary:")?;
        writeln!(f, "  Copied: {}", self.copied.len())?;
        writeln!(f, "  Overwritten: {}", self.overwritten.len())?;
        write!(f, "  Without file: {}", self.skipped.len())
    }
}

/// Copy the primary file of every reference in `folder_path` into `destination`.
///
/// The destination must already exist. A document without a file is skipped;
/// a file record pointing at a missing file aborts with [`Error::MissingFile`].
/// Files land under their own name, so two sources with the same file name
/// overwrite each other; the shared target is listed in
/// [`CopyReport::overwritten`]. Files already in the destination before the
/// run are replaced without being reported.
/// `on_event` is called once per reference, in listing order.
pub fn copy_folder_files<F>(
    repo: &ReferenceRepository,
    folder_path: &str,
    destination: &Path,
    mut on_event: F,
) -> Result<CopyReport>
where
    F: FnMut(&Reference, &CopyEvent),
{
    if !destination.is_dir() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("destination {} does not exist", destination.display()),
        )));
    }

    let references = repo.list_references_in_folder(folder_path)?;
    tracing::info!("Copying files for {} references from {}", references.len(), folder_path);

    let mut report = CopyReport::default();
    let mut written = HashSet::new();
    for reference in references {
        let Some(url) = repo.find_reference_file_url(&reference)? else {
            on_event(&reference, &CopyEvent::NoFile);
            report.skipped.push(reference);
            continue;
        };

        let source = file_url::to_local_path(&url)?;
        if !source.exists() {
            return Err(Error::MissingFile(source));
        }

        let file_name = source
            .file_name()
            .ok_or_else(|| Error::InvalidFileUrl(url.clone()))?;
        let target = destination.join(file_name);

        std::fs::copy(&source, &target)?;
        tracing::debug!("Copied {} -> {}", source.display(), target.display());

        let overwrote = !written.insert(target.clone());
        if overwrote {
            tracing::warn!("{} overwritten by {}", target.display(), source.display());
            if !report.overwritten.contains(&target) {
                report.overwritten.push(target.clone());
            }
        } else {
            report.copied.push(target.clone());
        }

        on_event(&reference, &CopyEvent::Copied { from: source, to: target, overwrote });
    }

    Ok(report)
}
