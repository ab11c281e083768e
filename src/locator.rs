//! Database locator - finds the Mendeley SQLite file for the current user
//!
//! Mendeley Desktop names its database after the signed-in account:
//! `<data dir>/<userEmail>@www.mendeley.com.sqlite`, where `userEmail` comes
//! from the `[MendeleyWeb]` section of `Mendeley Desktop.conf`.
//!
//! Locators are plain values handed to whoever needs a path; nothing here is
//! process-wide state.

use std::path::{Path, PathBuf};
use crate::{Error, Result};

/// Something that can produce the path of a Mendeley database
pub trait DatabaseLocator {
    fn locate(&self) -> Result<PathBuf>;
}

/// Always answers with the same path
#[derive(Debug, Clone)]
pub struct FixedLocator(pub PathBuf);

impl DatabaseLocator for FixedLocator {
    fn locate(&self) -> Result<PathBuf> {
        Ok(self.0.clone())
    }
}

/// Reads the Mendeley Desktop configuration to find the database
#[derive(Debug, Clone)]
pub struct DesktopLocator {
    /// `Mendeley Desktop.conf`
    pub config_path: PathBuf,
    /// Directory holding the `*.sqlite` databases
    pub data_dir: PathBuf,
}

impl DesktopLocator {
    pub fn new(config_path: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            data_dir: data_dir.into(),
        }
    }

    /// Default Linux install locations under the user's home directory:
    /// - `~/.config/Mendeley Ltd./Mendeley Desktop.conf`
    /// - `~/.local/share/data/Mendeley Ltd./Mendeley Desktop/`
    pub fn from_home() -> Result<Self> {
        let dirs = directories::BaseDirs::new()
            .ok_or_else(|| Error::Locate("no home directory".to_string()))?;

        Ok(Self::new(
            dirs.config_dir().join("Mendeley Ltd.").join("Mendeley Desktop.conf"),
            dirs.data_local_dir()
                .join("data")
                .join("Mendeley Ltd.")
                .join("Mendeley Desktop"),
        ))
    }

    /// Database file name for an account
    pub fn database_file_name(email: &str) -> String {
        format!("{}@www.mendeley.com.sqlite", email)
    }

    fn user_email(&self) -> Result<String> {
        if !self.config_path.exists() {
            return Err(Error::Locate(format!(
                "config not found at {}",
                self.config_path.display()
            )));
        }

        let contents = std::fs::read_to_string(&self.config_path)?;
        read_ini_value(&contents, "MendeleyWeb", "userEmail").ok_or_else(|| {
            Error::Locate(format!(
                "no MendeleyWeb/userEmail in {}",
                self.config_path.display()
            ))
        })
    }
}

impl DatabaseLocator for DesktopLocator {
    fn locate(&self) -> Result<PathBuf> {
        let email = self.user_email()?;
        let candidate = self.data_dir.join(Self::database_file_name(&email));
        tracing::debug!("Mendeley account {} -> {}", email, candidate.display());

        if candidate.exists() {
            Ok(candidate)
        } else {
            Err(Error::Locate(format!("database not found at {}", candidate.display())))
        }
    }
}

/// Look up `key` in `[section]` of a Qt-style INI document.
///
/// Comments start with `;` or `#`. A value wrapped in double quotes is unquoted.
fn read_ini_value(contents: &str, section: &str, key: &str) -> Option<String> {
    let mut in_section = false;

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            in_section = name.trim() == section;
            continue;
        }

        if !in_section {
            continue;
        }

        if let Some((k, v)) = line.split_once('=') {
            if k.trim() == key {
                let v = v.trim();
                let v = v
                    .strip_prefix('"')
                    .and_then(|v| v.strip_suffix('"'))
                    .unwrap_or(v);
                return Some(v.to_string());
            }
        }
    }

    None
}

/// Whether `path` looks like a Mendeley account database
pub fn is_account_database(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with("@www.mendeley.com.sqlite"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONF: &str = r#"
[General]
version=1.19.8

[MendeleyWeb]
; signed in account
userEmail=reader@example.org
userId=1234
"#;

    #[test]
    fn test_read_ini_value() {
        assert_eq!(read_ini_value(CONF, "MendeleyWeb", "userEmail").as_deref(), Some("reader@example.org"));
        assert_eq!(read_ini_value(CONF, "General", "version").as_deref(), Some("1.19.8"));
        assert_eq!(read_ini_value(CONF, "General", "userEmail"), None);
        assert_eq!(read_ini_value(CONF, "Missing", "userEmail"), None);
    }

    #[test]
    fn test_read_ini_quoted_value() {
        let conf = "[MendeleyWeb]\nuserEmail = \"quoted@example.org\"\n";
        assert_eq!(read_ini_value(conf, "MendeleyWeb", "userEmail").as_deref(), Some("quoted@example.org"));
    }

    #[test]
    fn test_desktop_locator_finds_database() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("Mendeley Desktop.conf");
        let data_dir = dir.path().join("data");
        std::fs::create_dir_all(&data_dir).unwrap();
        std::fs::write(&config_path, CONF).unwrap();

        let expected = data_dir.join("reader@example.org@www.mendeley.com.sqlite");
        std::fs::write(&expected, b"").unwrap();

        let locator = DesktopLocator::new(&config_path, &data_dir);
        let path = locator.locate().unwrap();
        assert_eq!(path, expected);
        assert!(is_account_database(&path));
    }

    #[test]
    fn test_desktop_locator_missing_database() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("Mendeley Desktop.conf");
        std::fs::write(&config_path, CONF).unwrap();

        let locator = DesktopLocator::new(&config_path, dir.path());
        assert!(matches!(locator.locate(), Err(Error::Locate(_))));
    }

    #[test]
    fn test_desktop_locator_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let locator = DesktopLocator::new(dir.path().join("absent.conf"), dir.path());
        assert!(matches!(locator.locate(), Err(Error::Locate(_))));
    }

    #[test]
    fn test_desktop_locator_config_without_email() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("Mendeley Desktop.conf");
        std::fs::write(&config_path, "[General]\nversion=1\n").unwrap();

        let locator = DesktopLocator::new(&config_path, dir.path());
        assert!(matches!(locator.locate(), Err(Error::Locate(_))));
    }

    #[test]
    fn test_fixed_locator() {
        let locator = FixedLocator(PathBuf::from("/tmp/lib.sqlite"));
        assert_eq!(locator.locate().unwrap(), PathBuf::from("/tmp/lib.sqlite"));
        assert!(!is_account_database(Path::new("/tmp/lib.sqlite")));
    }
}
