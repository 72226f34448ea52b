use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error("No version provided")]
    NoVersion,

    #[error("Invalid version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },

    #[error("No stable version found in remote versions")]
    NoStableVersion,
}

impl VersionError {
    pub(crate) fn invalid(version: &str, reason: impl ToString) -> Self {
        Self::InvalidVersion {
            version: version.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Reasons a cached snapshot cannot be used.
///
/// None of these are fatal for listing: callers fall back to a remote fetch.
/// Only `Io` and `Encode` surface from `save`.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache file not found: {0:?}")]
    NotFound(PathBuf),

    #[error("Cache expired at {0}")]
    Expired(String),

    #[error("Cache file is corrupt: {0}")]
    Corrupt(String),

    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode cache snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
