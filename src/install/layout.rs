//! Directory layout under the gvm root
//!
//! ```text
//! <root>/
//! ├── cache.json
//! ├── downloads/              scratch space for archives
//! ├── versions/<version>/go/  one unpacked release per version
//! └── current/
//!     ├── go  -> versions/<version>/go
//!     └── bin -> versions/<version>/go/bin
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::install::error::InstallError;

pub const CACHE_FILE_NAME: &str = "cache.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn cache_file(&self) -> PathBuf {
        self.root.join(CACHE_FILE_NAME)
    }

    pub fn downloads_dir(&self) -> PathBuf {
        self.root.join("downloads")
    }

    pub fn versions_dir(&self) -> PathBuf {
        self.root.join("versions")
    }

    pub fn version_dir(&self, version: &str) -> PathBuf {
        self.versions_dir().join(version)
    }

    /// `versions/<version>/go`, the GOROOT of an installed release
    pub fn version_go_dir(&self, version: &str) -> PathBuf {
        self.version_dir(version).join("go")
    }

    pub fn version_bin_dir(&self, version: &str) -> PathBuf {
        self.version_go_dir(version).join("bin")
    }

    pub fn current_dir(&self) -> PathBuf {
        self.root.join("current")
    }

    pub fn current_go(&self) -> PathBuf {
        self.current_dir().join("go")
    }

    pub fn current_bin(&self) -> PathBuf {
        self.current_dir().join("bin")
    }

    /// Check if a release has been unpacked for `version`
    pub fn is_installed(&self, version: &str) -> bool {
        self.version_go_dir(version).is_dir()
    }

    /// Names of the directories under `versions/`, in directory order.
    ///
    /// A missing `versions/` directory means nothing is installed.
    pub fn installed_versions(&self) -> Result<Vec<String>, InstallError> {
        let versions_dir = self.versions_dir();
        let entries = match fs::read_dir(&versions_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(InstallError::io(versions_dir)(e)),
        };

        let mut versions = Vec::new();
        for entry in entries {
            let entry = entry.map_err(InstallError::io(&versions_dir))?;
            let file_type = entry.file_type().map_err(InstallError::io(entry.path()))?;
            if file_type.is_dir() {
                versions.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(versions)
    }

    /// The active version, read from the `current/bin` link target.
    ///
    /// The link points at `versions/<version>/go/bin`, so the version is the
    /// name two levels above the target. Returns None when the link is
    /// missing or does not have that shape.
    pub fn current_version(&self) -> Option<String> {
        let target = fs::read_link(self.current_bin())
            .inspect_err(|e| debug!("Failed to read current link: {}", e))
            .ok()?;
        debug!("Current link points to {:?}", target);

        target
            .parent()
            .and_then(Path::parent)
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
    }
}
