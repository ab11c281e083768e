//! `file://` URLs as stored in `Files.localUrl`

use std::path::PathBuf;
use crate::{Error, Result};

const FILE_SCHEME: &str = "file://";

/// Turn a stored `localUrl` into a filesystem path.
///
/// `file:///home/me/A%20Paper.pdf` becomes `/home/me/A Paper.pdf`.
pub fn to_local_path(url: &str) -> Result<PathBuf> {
    let encoded = url
        .strip_prefix(FILE_SCHEME)
        .ok_or_else(|| Error::InvalidFileUrl(format!("expected a file:// URL, got {:?}", url)))?;

    let decoded = urlencoding::decode(encoded)
        .map_err(|e| Error::InvalidFileUrl(format!("{}: {}", url, e)))?;

    Ok(PathBuf::from(decoded.into_owned()))
}
