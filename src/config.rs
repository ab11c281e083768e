//! `mendeley.toml` - where the database lives and how to open it

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use crate::locator::{DatabaseLocator, DesktopLocator};
use crate::storage::{Database, DatabaseOptions};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MendeleyConfig {
    /// Path of the Mendeley SQLite database
    pub database: Option<String>,
    /// Milliseconds to wait on a lock held by Mendeley Desktop
    pub busy_timeout_ms: Option<u64>,
}

impl MendeleyConfig {
    pub fn database_options(&self) -> DatabaseOptions {
        DatabaseOptions {
            busy_timeout: self.busy_timeout_ms.map(Duration::from_millis),
        }
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("mendeley.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<MendeleyConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: MendeleyConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &MendeleyConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

/// Pick the database to open.
///
/// Precedence: an explicit path, then the config file, then `locator`.
pub fn resolve_database(
    explicit: Option<&Path>,
    config: Option<&MendeleyConfig>,
    locator: &dyn DatabaseLocator,
) -> anyhow::Result<Database> {
    let options = config.map(MendeleyConfig::database_options).unwrap_or_default();

    let path = match (explicit, config.and_then(|c| c.database.as_deref())) {
        (Some(path), _) => path.to_path_buf(),
        (None, Some(configured)) => PathBuf::from(configured),
        (None, None) => locator.locate()?,
    };

    tracing::debug!("Using database {}", path.display());
    Ok(Database::with_options(path, options))
}

/// Locator for the standard desktop install
pub fn default_locator() -> anyhow::Result<DesktopLocator> {
    Ok(DesktopLocator::from_home()?)
}
