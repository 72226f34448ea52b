//! Release archive download

use std::path::Path;
use std::time::Duration;

#[cfg(test)]
use mockall::automock;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::config::DOWNLOAD_TIMEOUT_SECS;
use crate::install::error::InstallError;

/// Trait for fetching a release archive to a local file
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ArchiveFetcher: Send + Sync {
    /// Downloads `url` into `dest`, replacing any existing file
    ///
    /// # Returns
    /// * `Ok(u64)` - Number of bytes written
    /// * `Err(InstallError)` - If the request or the write fails
    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64, InstallError>;
}

/// Fetcher that streams archives over HTTP
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("gvm")
                .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ArchiveFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64, InstallError> {
        debug!("Downloading {} to {:?}", url, dest);
        let mut response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Archive source returned status {}: {}", status, url);
            return Err(InstallError::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(InstallError::io(parent))?;
        }
        let mut file = tokio::fs::File::create(dest)
            .await
            .map_err(InstallError::io(dest))?;

        let mut written = 0u64;
        while let Some(buf) = response.chunk().await? {
            file.write_all(&buf).await.map_err(InstallError::io(dest))?;
            written += buf.len() as u64;
        }
        file.flush().await.map_err(InstallError::io(dest))?;

        debug!("Downloaded {} bytes", written);
        Ok(written)
    }
}
