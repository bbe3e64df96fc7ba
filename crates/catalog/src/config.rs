//! Catalog configuration.
//!
//! Only the filename markers are configurable. Values come from defaults,
//! optionally overridden by a TOML document:
//!
//! ```toml
//! legacy_extension = ".pmz"
//! archive_extension = ".ametro"
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{CatalogError, Result};
use crate::identifiers::SystemName;

pub const DEFAULT_LEGACY_EXTENSION: &str = ".pmz";
pub const DEFAULT_ARCHIVE_EXTENSION: &str = ".ametro";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Extension of single-file maps in the legacy format
    pub legacy_extension: String,
    /// Extension appended to legacy names to form the system name
    pub archive_extension: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            legacy_extension: DEFAULT_LEGACY_EXTENSION.to_string(),
            archive_extension: DEFAULT_ARCHIVE_EXTENSION.to_string(),
        }
    }
}

impl CatalogConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// System name for a map file.
    ///
    /// Legacy names keep their extension and get the archive extension
    /// appended: `moscow.pmz` becomes `moscow.pmz.ametro`.
    pub fn system_name_for(&self, file_name: &str) -> SystemName {
        if file_name.ends_with(&self.legacy_extension) {
            SystemName::new(format!("{file_name}{}", self.archive_extension))
        } else {
            SystemName::new(file_name)
        }
    }
}
