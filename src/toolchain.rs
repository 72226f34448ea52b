//! list/install/use/uninstall over the local layout and the remote catalog

use std::fs;
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::Error;
use crate::install::activate::{activate, deactivate};
use crate::install::download::{ArchiveFetcher, HttpFetcher};
use crate::install::extract::extract;
use crate::install::platform::archive_url;
use crate::install::{InstallError, Layout, Platform};
use crate::version::cache::Cache;
use crate::version::catalog::Catalog;
use crate::version::registries::GoTagRegistry;
use crate::version::semver::{is_prerelease, parse_semantic};
use crate::version::sort::{VersionGroups, sort_versions};

/// An installed release and whether it is the active one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledVersion {
    pub version: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionListing {
    /// Installed releases in ascending order
    Local {
        versions: Vec<InstalledVersion>,
        current: Option<String>,
    },
    /// Remote releases grouped by family
    Remote(VersionGroups),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed(String),
    /// The release was already present; it is now the active one
    AlreadyInstalled(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseOutcome {
    Activated,
    AlreadyActive,
}

pub struct Toolchain {
    layout: Layout,
    catalog: Catalog,
    fetcher: Arc<dyn ArchiveFetcher>,
    repo: String,
    platform: Platform,
}

impl Toolchain {
    pub fn new(
        layout: Layout,
        catalog: Catalog,
        fetcher: Arc<dyn ArchiveFetcher>,
        repo: &str,
        platform: Platform,
    ) -> Self {
        Self {
            layout,
            catalog,
            fetcher,
            repo: repo.to_string(),
            platform,
        }
    }

    /// Wire the HTTP-backed registry and fetcher for the host platform
    pub fn from_config(config: &Config) -> Self {
        let catalog = Catalog::new(
            Arc::new(GoTagRegistry::new(&config.tag_url)),
            Cache::new(config.cache_settings()),
        );
        Self::new(
            config.layout(),
            catalog,
            Arc::new(HttpFetcher::new()),
            &config.repo,
            Platform::current(),
        )
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// List installed releases, or remote releases grouped by family.
    ///
    /// For remote listings only families whose key is contained in `filter`
    /// are kept; an empty filter keeps all of them.
    pub async fn list(&self, remote: bool, filter: &str) -> Result<VersionListing, Error> {
        if remote {
            return Ok(VersionListing::Remote(self.catalog.families(filter).await?));
        }

        let installed = self.layout.installed_versions()?;
        let current = self.layout.current_version();
        let versions = sort_versions(&installed)?
            .into_iter()
            .map(|version| InstalledVersion {
                active: current.as_deref() == Some(version.as_str()),
                version,
            })
            .collect();

        Ok(VersionListing::Local { versions, current })
    }

    pub fn clear_cache(&self) -> Result<(), Error> {
        Ok(self.catalog.cache().clear()?)
    }

    /// Install and activate a release; the latest stable one when `version`
    /// is None or empty.
    pub async fn install(&self, version: Option<&str>) -> Result<InstallOutcome, Error> {
        let version = match version.filter(|v| !v.is_empty()) {
            Some(requested) => validate_request(requested)?,
            None => self.catalog.latest_stable().await?,
        };
        info!("Installing {}", version);

        if self.layout.is_installed(&version) {
            info!("Version {} already exists", version);
            self.use_version(&version)?;
            return Ok(InstallOutcome::AlreadyInstalled(version));
        }

        let result = self.download_and_activate(&version).await;

        let downloads_dir = self.layout.downloads_dir();
        if let Err(e) = fs::remove_dir_all(&downloads_dir) {
            debug!("Failed to remove {:?}: {}", downloads_dir, e);
        }

        result.map(|()| InstallOutcome::Installed(version))
    }

    async fn download_and_activate(&self, version: &str) -> Result<(), Error> {
        let archive_name = self.platform.archive_name(version);
        let url = archive_url(&self.repo, &archive_name);
        let archive = self.layout.downloads_dir().join(&archive_name);

        let size = self.fetcher.fetch(&url, &archive).await?;
        info!("Download completed ({} bytes)", size);

        let version_dir = self.layout.version_dir(version);
        let unpacked = extract(&archive, &version_dir).and_then(|()| {
            if self.layout.is_installed(version) {
                Ok(())
            } else {
                Err(InstallError::MissingGoRoot(archive.clone()))
            }
        });
        let activated = unpacked.and_then(|()| activate(&self.layout, version));

        if let Err(e) = activated {
            if let Err(cleanup) = fs::remove_dir_all(&version_dir) {
                debug!("Failed to remove {:?}: {}", version_dir, cleanup);
            }
            return Err(e.into());
        }

        info!("Using {}", version);
        Ok(())
    }

    /// Make an installed release the active one.
    pub fn use_version(&self, version: &str) -> Result<UseOutcome, Error> {
        if self.layout.current_version().as_deref() == Some(version) {
            debug!("Already using {}", version);
            return Ok(UseOutcome::AlreadyActive);
        }
        if !self.layout.is_installed(version) {
            return Err(InstallError::NotInstalled(version.to_string()).into());
        }

        activate(&self.layout, version)?;
        debug!("Using {}", version);
        Ok(UseOutcome::Activated)
    }

    /// Remove an installed release, deactivating it first if active.
    pub fn uninstall(&self, version: &str) -> Result<(), Error> {
        if !self.layout.is_installed(version) {
            return Err(InstallError::NotInstalled(version.to_string()).into());
        }

        if self.layout.current_version().as_deref() == Some(version) {
            deactivate(&self.layout)?;
        }

        let version_dir = self.layout.version_dir(version);
        fs::remove_dir_all(&version_dir).map_err(InstallError::io(&version_dir))?;
        debug!("Removed {:?}", version_dir);
        Ok(())
    }
}

/// Reject tokens that are not releases. The token itself is installed as
/// given, so `1.20` fetches `go1.20.<os>-<arch>` and not `go1.20.0`.
///
/// Pre-releases cannot be parsed as semantic versions and are passed
/// through as-is.
fn validate_request(requested: &str) -> Result<String, Error> {
    if !is_prerelease(requested) {
        parse_semantic(requested)?;
    }
    Ok(requested.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use crate::version::error::VersionError;

    #[rstest]
    #[case("1.21.0")]
    #[case("1.20")]
    #[case("1.21.x")]
    #[case("1.21.0@latest")]
    #[case("1.22rc1")]
    fn validate_request_keeps_requested_token(#[case] requested: &str) {
        assert_eq!(validate_request(requested).unwrap(), requested);
    }

    #[rstest]
    #[case("latest")]
    #[case("1.2.3.4")]
    fn validate_request_rejects_invalid_versions(#[case] requested: &str) {
        assert!(matches!(
            validate_request(requested),
            Err(Error::Version(VersionError::InvalidVersion { .. }))
        ));
    }
}
