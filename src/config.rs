use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::install::Layout;
use crate::version::cache::CacheSettings;

// =============================================================================
// Defaults
// =============================================================================

/// Root directory name under the home directory
pub const DEFAULT_ROOT_DIR_NAME: &str = "gvm";

/// Environment variable overriding the root directory
pub const ROOT_ENV: &str = "GVM_ROOT";

/// Base URL of the release archives
pub const DEFAULT_REPO: &str = "https://go.dev/dl/";

/// JSON list of Go release tags
pub const DEFAULT_TAG_URL: &str =
    "https://raw.githubusercontent.com/kevincobain2000/gobrew/json/golang-tags.json";

/// Default lifetime of the version cache in seconds (10 minutes)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 10 * 60;

/// Optional configuration file inside the root directory
pub const CONFIG_FILE_NAME: &str = "config.json";

// =============================================================================
// Time-related constants
// =============================================================================

/// Timeout for tag list requests in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// Timeout for archive downloads in seconds (10 minutes)
pub const DOWNLOAD_TIMEOUT_SECS: u64 = 10 * 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to resolve root directory {path:?}: {source}")]
    Root {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error("Invalid duration '{0}': expected <n>, <n>s, <n>m or <n>h")]
    InvalidDuration(String),
}

/// gvm configuration
///
/// Built once at startup: defaults, then `<root>/config.json`, then
/// command-line overrides applied by the caller.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    #[serde(skip)]
    pub root_dir: PathBuf,
    /// Base URL of the release archives
    pub repo: String,
    /// URL of the JSON tag list
    pub tag_url: String,
    /// Cache lifetime in seconds
    pub cache_ttl: u64,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_dir: root_dir(),
            repo: DEFAULT_REPO.to_string(),
            tag_url: DEFAULT_TAG_URL.to_string(),
            cache_ttl: DEFAULT_CACHE_TTL_SECS,
            verbose: false,
        }
    }
}

impl Config {
    /// Load `<root>/config.json` if present, otherwise use defaults.
    ///
    /// A relative `root` is resolved against the working directory.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let root = std::path::absolute(root).map_err(|source| ConfigError::Root {
            path: root.to_path_buf(),
            source,
        })?;
        let path = root.join(CONFIG_FILE_NAME);
        let mut config = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str::<Config>(&content)
                .map_err(|source| ConfigError::Parse { path, source })?,
            Err(e) if e.kind() == ErrorKind::NotFound => Config::default(),
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        config.root_dir = root;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.root_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("root_dir must not be empty".into()));
        }
        if self.repo.is_empty() {
            return Err(ConfigError::Invalid("repo must not be empty".into()));
        }
        if self.tag_url.is_empty() {
            return Err(ConfigError::Invalid("tag_url must not be empty".into()));
        }
        if self.cache_ttl == 0 {
            return Err(ConfigError::Invalid("cache_ttl must be positive".into()));
        }
        Ok(())
    }

    pub fn layout(&self) -> Layout {
        Layout::new(&self.root_dir)
    }

    pub fn cache_settings(&self) -> CacheSettings {
        CacheSettings {
            path: Some(self.layout().cache_file()),
            ttl: Duration::from_secs(self.cache_ttl),
        }
    }
}

/// Returns the gvm root directory.
/// Uses $GVM_ROOT if set, otherwise ~/gvm,
/// or ./gvm if no home directory is available.
pub fn root_dir() -> PathBuf {
    root_dir_with_env(std::env::var(ROOT_ENV).ok(), dirs::home_dir())
}

fn root_dir_with_env(gvm_root: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    gvm_root
        .filter(|root| !root.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(DEFAULT_ROOT_DIR_NAME)))
        .unwrap_or_else(|| PathBuf::from(".").join(DEFAULT_ROOT_DIR_NAME))
}

/// Parse a duration such as `90`, `90s`, `10m` or `1h`.
pub fn parse_duration(input: &str) -> Result<Duration, ConfigError> {
    let input = input.trim();
    let (digits, unit) = match input.find(|c: char| !c.is_ascii_digit()) {
        Some(idx) => input.split_at(idx),
        None => (input, "s"),
    };
    let value: u64 = digits
        .parse()
        .map_err(|_| ConfigError::InvalidDuration(input.to_string()))?;
    let secs = match unit {
        "s" => Some(value),
        "m" => value.checked_mul(60),
        "h" => value.checked_mul(60 * 60),
        _ => None,
    }
    .ok_or_else(|| ConfigError::InvalidDuration(input.to_string()))?;
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[test]
    fn load_uses_defaults_without_config_file() {
        let temp_dir = TempDir::new().unwrap();

        let config = Config::load(temp_dir.path()).unwrap();

        assert_eq!(config.root_dir, temp_dir.path());
        assert_eq!(config.repo, DEFAULT_REPO);
        assert_eq!(config.tag_url, DEFAULT_TAG_URL);
        assert_eq!(config.cache_ttl, DEFAULT_CACHE_TTL_SECS);
        assert!(!config.verbose);
    }

    #[test]
    fn load_from_partial_file_uses_defaults_for_missing_fields() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            r#"{ "repo": "https://mirror.example.com/go/", "cache_ttl": 60 }"#,
        )
        .unwrap();

        let config = Config::load(temp_dir.path()).unwrap();

        assert_eq!(config.repo, "https://mirror.example.com/go/");
        assert_eq!(config.cache_ttl, 60);
        assert_eq!(config.tag_url, DEFAULT_TAG_URL);
        assert_eq!(config.root_dir, temp_dir.path());
    }

    #[test]
    fn load_rejects_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "{ repo").unwrap();

        assert!(matches!(
            Config::load(temp_dir.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn load_resolves_relative_root_against_working_directory() {
        let config = Config::load(Path::new("gvm-relative-root")).unwrap();

        assert!(config.root_dir.is_absolute());
        assert_eq!(
            config.root_dir,
            std::env::current_dir().unwrap().join("gvm-relative-root")
        );
    }

    #[test]
    fn validate_rejects_zero_ttl_and_empty_urls() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(temp_dir.path()).unwrap();
        assert!(config.validate().is_ok());

        let zero_ttl = Config {
            cache_ttl: 0,
            ..config.clone()
        };
        assert!(matches!(zero_ttl.validate(), Err(ConfigError::Invalid(_))));

        let no_repo = Config {
            repo: String::new(),
            ..config
        };
        assert!(matches!(no_repo.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn cache_settings_point_at_root_cache_file() {
        let config = Config {
            root_dir: PathBuf::from("/opt/gvm"),
            cache_ttl: 30,
            ..Config::default()
        };

        assert_eq!(
            config.cache_settings(),
            CacheSettings {
                path: Some(PathBuf::from("/opt/gvm/cache.json")),
                ttl: Duration::from_secs(30),
            }
        );
    }

    #[test]
    fn root_dir_with_env_uses_gvm_root_when_set() {
        let path = root_dir_with_env(
            Some("/tmp/gvm".to_string()),
            Some(PathBuf::from("/home/user")),
        );

        assert_eq!(path, PathBuf::from("/tmp/gvm"));
    }

    #[test]
    fn root_dir_with_env_falls_back_to_home() {
        let path = root_dir_with_env(Some(String::new()), Some(PathBuf::from("/home/user")));

        assert_eq!(path, PathBuf::from("/home/user/gvm"));
    }

    #[test]
    fn root_dir_with_env_falls_back_to_current_dir_when_no_dirs_available() {
        let path = root_dir_with_env(None, None);
        assert_eq!(path, PathBuf::from("./gvm"));
    }

    #[rstest]
    #[case("90", 90)]
    #[case("90s", 90)]
    #[case("10m", 600)]
    #[case("2h", 7200)]
    #[case(" 5m ", 300)]
    fn parse_duration_accepts_units(#[case] input: &str, #[case] expected_secs: u64) {
        assert_eq!(
            parse_duration(input).unwrap(),
            Duration::from_secs(expected_secs)
        );
    }

    #[rstest]
    #[case("")]
    #[case("m")]
    #[case("10d")]
    #[case("1.5h")]
    fn parse_duration_rejects_malformed_input(#[case] input: &str) {
        assert!(matches!(
            parse_duration(input),
            Err(ConfigError::InvalidDuration(_))
        ));
    }
}
