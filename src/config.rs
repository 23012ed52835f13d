use std::path::PathBuf;

use crate::errors::{CatalogError, Result};

/// Overrides the application directory when set.
pub const HOME_ENV: &str = "ASSETCAT_HOME";

pub struct AppPaths {
    pub base_dir: PathBuf,
    pub db_path: PathBuf,
}

impl AppPaths {
    /// Resolves `$ASSETCAT_HOME`, then `<documents>/AssetManager`, then
    /// `<home>/.assetcat`.
    pub fn new() -> Result<Self> {
        if let Some(base) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::from_base(PathBuf::from(base)));
        }
        if let Some(docs) = dirs::document_dir() {
            return Ok(Self::from_base(docs.join("AssetManager")));
        }
        let home = dirs::home_dir()
            .ok_or_else(|| CatalogError::Config("could not determine home directory".into()))?;
        Ok(Self::from_base(home.join(".assetcat")))
    }

    pub fn from_base(base: PathBuf) -> Self {
        Self {
            db_path: base.join("assets.db"),
            base_dir: base,
        }
    }

    /// Uses an explicit database file; its parent becomes the base directory.
    pub fn from_db_path(db_path: PathBuf) -> Self {
        let base_dir = db_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self { base_dir, db_path }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_base() {
        let paths = AppPaths::from_base(PathBuf::from("/tmp/test-assetcat"));
        assert_eq!(paths.base_dir, PathBuf::from("/tmp/test-assetcat"));
        assert_eq!(paths.db_path, PathBuf::from("/tmp/test-assetcat/assets.db"));
    }

    #[test]
    fn test_from_db_path() {
        let paths = AppPaths::from_db_path(PathBuf::from("/srv/catalog/library.db"));
        assert_eq!(paths.base_dir, PathBuf::from("/srv/catalog"));
        assert_eq!(paths.db_path, PathBuf::from("/srv/catalog/library.db"));
    }

    #[test]
    fn test_from_db_path_bare_file_name() {
        let paths = AppPaths::from_db_path(PathBuf::from("library.db"));
        assert_eq!(paths.base_dir, PathBuf::from("."));
        assert_eq!(paths.db_path, PathBuf::from("library.db"));
    }

    #[test]
    fn test_new_ends_in_known_dir() {
        if std::env::var_os(HOME_ENV).is_some() {
            return;
        }
        let paths = AppPaths::new().unwrap();
        assert!(
            paths.base_dir.ends_with("AssetManager") || paths.base_dir.ends_with(".assetcat")
        );
        assert!(paths.db_path.ends_with("assets.db"));
    }
}
