//! Go release tag list registry implementation

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::{DEFAULT_TAG_URL, FETCH_TIMEOUT_MS};
use crate::version::error::RegistryError;
use crate::version::registry::TagSource;

const TAG_REF_PREFIX: &str = "refs/tags/";
const GO_TAG_PREFIX: &str = "go";

/// Entry of the tag list: `{"ref": "refs/tags/go1.21.0"}`
#[derive(Debug, Deserialize)]
pub struct Tag {
    #[serde(rename = "ref")]
    pub reference: String,
}

/// Registry implementation backed by a JSON list of git tag refs
pub struct GoTagRegistry {
    client: reqwest::Client,
    tag_url: String,
}

impl GoTagRegistry {
    /// Creates a new GoTagRegistry reading tags from `tag_url`
    pub fn new(tag_url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("gvm")
                .timeout(Duration::from_millis(FETCH_TIMEOUT_MS))
                .build()
                .expect("Failed to create HTTP client"),
            tag_url: tag_url.to_string(),
        }
    }
}

impl Default for GoTagRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_TAG_URL)
    }
}

#[async_trait::async_trait]
impl TagSource for GoTagRegistry {
    async fn fetch_versions(&self) -> Result<Vec<String>, RegistryError> {
        debug!("Fetching tags from {}", self.tag_url);
        let response = self.client.get(&self.tag_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Tag source returned status {}: {}", status, self.tag_url);
            return Err(RegistryError::UnexpectedStatus {
                url: self.tag_url.clone(),
                status: status.as_u16(),
            });
        }

        let tags: Vec<Tag> = response.json().await.map_err(|e| {
            warn!("Failed to parse tag list: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        Ok(versions_from_tags(tags))
    }
}

/// Extract release versions from tag refs.
///
/// `refs/tags/go1.21.0` becomes `1.21.0`; refs that do not name a `go`
/// tag (e.g. `refs/tags/weekly.2011-01-01`) are dropped.
pub fn versions_from_tags(tags: Vec<Tag>) -> Vec<String> {
    tags.into_iter()
        .filter_map(|tag| {
            let name = tag.reference.replace(TAG_REF_PREFIX, "");
            name.strip_prefix(GO_TAG_PREFIX).map(str::to_string)
        })
        .collect()
}
