//! Registry test utilities

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;

use gvm::install::download::HttpFetcher;
use gvm::install::{Layout, Platform};
use gvm::toolchain::Toolchain;
use gvm::version::cache::{Cache, CacheSettings};
use gvm::version::catalog::Catalog;
use gvm::version::error::RegistryError;
use gvm::version::registry::TagSource;

/// Platform used by every test toolchain, so archive names are predictable
pub const TEST_PLATFORM: Platform = Platform {
    os: "linux",
    arch: "amd64",
};

/// Tag source returning a fixed list and counting fetches
pub struct StaticTagSource {
    versions: Vec<String>,
    calls: AtomicUsize,
}

impl StaticTagSource {
    pub fn new(versions: Vec<&str>) -> Self {
        Self {
            versions: versions.into_iter().map(|v| v.to_string()).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TagSource for StaticTagSource {
    async fn fetch_versions(&self) -> Result<Vec<String>, RegistryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.versions.clone())
    }
}

/// Create a toolchain rooted in `root` that downloads from `repo`
pub fn create_test_toolchain(
    root: &TempDir,
    repo: &str,
    source: Arc<StaticTagSource>,
) -> Toolchain {
    let layout = Layout::new(root.path());
    let cache = Cache::new(CacheSettings {
        path: Some(layout.cache_file()),
        ttl: Duration::from_secs(600),
    });
    Toolchain::new(
        layout,
        Catalog::new(source, cache),
        Arc::new(HttpFetcher::new()),
        repo,
        TEST_PLATFORM,
    )
}
