//! Remote source of Go release versions

#[cfg(test)]
use mockall::automock;

use crate::version::error::RegistryError;

/// Trait for fetching the full list of Go release versions
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait TagSource: Send + Sync {
    /// Fetches every published release version
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Versions without the `go` prefix, in published order
    /// * `Err(RegistryError)` - If the fetch fails
    async fn fetch_versions(&self) -> Result<Vec<String>, RegistryError>;
}
