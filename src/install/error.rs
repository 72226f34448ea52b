use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Download failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("Unsupported archive format: {0:?}")]
    UnsupportedArchive(PathBuf),

    #[error("Failed to extract {archive:?}: {reason}")]
    Extract { archive: PathBuf, reason: String },

    #[error("Archive {0:?} does not contain a go/ directory")]
    MissingGoRoot(PathBuf),

    #[error("Version {0} is not installed")]
    NotInstalled(String),
}

impl InstallError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}
