//! Remote catalog of Go releases, served from the snapshot cache when fresh

use std::sync::Arc;

use tracing::debug;

use crate::error::Error;
use crate::version::cache::Cache;
use crate::version::registry::TagSource;
use crate::version::sort::{VersionGroups, group_versions, latest_stable};

/// Combines the remote tag source with the local snapshot cache.
pub struct Catalog {
    source: Arc<dyn TagSource>,
    cache: Cache,
}

impl Catalog {
    pub fn new(source: Arc<dyn TagSource>, cache: Cache) -> Self {
        Self { source, cache }
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// All remote versions, from the cache when possible.
    ///
    /// Any cache problem (missing, expired, corrupt) is a miss: the list is
    /// fetched and written back. A failed write is an error.
    pub async fn versions(&self) -> Result<Vec<String>, Error> {
        let cached = self
            .cache
            .load()
            .inspect_err(|e| debug!("Load cache failed: {}", e))
            .unwrap_or_default();
        if !cached.is_empty() {
            debug!("Using {} cached versions", cached.len());
            return Ok(cached);
        }

        let versions = self.source.fetch_versions().await?;
        self.cache.save(&versions)?;
        debug!("Saved {} versions to cache", versions.len());

        Ok(versions)
    }

    /// Remote versions grouped by family, keeping families contained in `filter`.
    pub async fn families(&self, filter: &str) -> Result<VersionGroups, Error> {
        let versions = self.versions().await?;
        let groups = group_versions(&versions)?;
        debug!("Grouped versions into {} families", groups.len());

        Ok(groups.filtered(filter))
    }

    /// Newest stable release. Always asks the remote source.
    pub async fn latest_stable(&self) -> Result<String, Error> {
        let versions = self.source.fetch_versions().await?;
        Ok(latest_stable(&versions)?)
    }
}
