//! File-backed snapshot of the remote version catalog
//!
//! The snapshot is a single JSON document:
//!
//! ```json
//! {
//!   "timestamp": "2024-05-01T10:00:00Z",
//!   "versions": ["1.21.0", "1.22beta1"]
//! }
//! ```
//!
//! There is no locking; a single process is assumed to own the file for the
//! duration of one command.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::version::error::CacheError;

/// Where the snapshot lives and how long it stays fresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    /// Snapshot file; `None` disables caching
    pub path: Option<PathBuf>,
    pub ttl: Duration,
}

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    timestamp: String,
    versions: Vec<String>,
}

pub struct Cache {
    settings: CacheSettings,
}

impl Cache {
    pub fn new(settings: CacheSettings) -> Self {
        Self { settings }
    }

    pub fn path(&self) -> Option<&Path> {
        self.settings.path.as_deref()
    }

    /// Load the cached versions.
    ///
    /// Returns an empty list when caching is disabled.
    pub fn load(&self) -> Result<Vec<String>, CacheError> {
        self.load_at(Utc::now())
    }

    fn load_at(&self, now: DateTime<Utc>) -> Result<Vec<String>, CacheError> {
        let Some(path) = self.path() else {
            debug!("Cache file is not set");
            return Ok(Vec::new());
        };

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CacheError::NotFound(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };

        let snapshot: Snapshot =
            serde_json::from_str(&content).map_err(|e| CacheError::Corrupt(e.to_string()))?;
        let timestamp = DateTime::parse_from_rfc3339(&snapshot.timestamp)
            .map_err(|e| {
                CacheError::Corrupt(format!("invalid timestamp '{}': {}", snapshot.timestamp, e))
            })?
            .with_timezone(&Utc);

        let ttl = TimeDelta::from_std(self.settings.ttl).unwrap_or(TimeDelta::MAX);
        match timestamp.checked_add_signed(ttl) {
            Some(expires_at) if now > expires_at => {
                return Err(CacheError::Expired(
                    expires_at.to_rfc3339_opts(SecondsFormat::Secs, true),
                ));
            }
            _ => {}
        }

        Ok(snapshot.versions)
    }

    /// Overwrite the snapshot with `versions`, stamped with the current time.
    ///
    /// Does nothing when caching is disabled.
    pub fn save(&self, versions: &[String]) -> Result<(), CacheError> {
        self.save_at(versions, Utc::now())
    }

    fn save_at(&self, versions: &[String], now: DateTime<Utc>) -> Result<(), CacheError> {
        let Some(path) = self.path() else {
            debug!("Cache file is not set");
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let snapshot = Snapshot {
            timestamp: now.to_rfc3339_opts(SecondsFormat::Secs, true),
            versions: versions.to_vec(),
        };
        let mut content = serde_json::to_string_pretty(&snapshot)?;
        content.push('\n');
        fs::write(path, content)?;

        debug!("Saved {} versions to {:?}", versions.len(), path);
        Ok(())
    }

    /// Remove the snapshot. A missing file is not an error.
    pub fn clear(&self) -> Result<(), CacheError> {
        let Some(path) = self.path() else {
            return Ok(());
        };
        match fs::remove_file(path) {
            Ok(()) => {
                debug!("Removed cache file {:?}", path);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
