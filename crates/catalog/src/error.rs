use std::path::PathBuf;

use metro_transit::TransitError;
use thiserror::Error;

use crate::identifiers::SystemName;

/// Errors from catalog maintenance.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No entry with this system name. A normal outcome for lookups.
    #[error("map not found: {0}")]
    MapNotFound(SystemName),

    /// The parsed map is internally inconsistent and cannot be described.
    #[error("malformed map source '{file_name}': {reason}")]
    MalformedSource { file_name: String, reason: String },

    #[error("failed to parse catalog config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Transit(#[from] TransitError),
}

impl CatalogError {
    pub(crate) fn malformed(file_name: &str, reason: impl ToString) -> Self {
        Self::MalformedSource {
            file_name: file_name.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
