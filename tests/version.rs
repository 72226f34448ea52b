use std::fs;
use std::time::Duration;

use tempfile::TempDir;

use gvm::version::cache::{Cache, CacheSettings};
use gvm::version::error::{CacheError, VersionError};
use gvm::version::semver::parse_semantic;
use gvm::version::sort::{group_versions, latest_stable, sort_versions};

fn create_test_cache(temp_dir: &TempDir, ttl: Duration) -> Cache {
    Cache::new(CacheSettings {
        path: Some(temp_dir.path().join("cache.json")),
        ttl,
    })
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn save_then_load_returns_same_versions() {
    let temp_dir = TempDir::new().unwrap();
    let cache = create_test_cache(&temp_dir, Duration::from_secs(600));

    let versions = strings(&["1.21.0", "1.21.1", "1.22rc1"]);
    cache.save(&versions).unwrap();

    assert_eq!(cache.load().unwrap(), versions);
}

#[test]
fn save_overwrites_previous_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let cache = create_test_cache(&temp_dir, Duration::from_secs(600));

    cache.save(&strings(&["1.20.0"])).unwrap();
    cache.save(&strings(&["1.20.0", "1.21.0"])).unwrap();

    assert_eq!(cache.load().unwrap(), strings(&["1.20.0", "1.21.0"]));
}

#[test]
fn save_writes_timestamped_json() {
    let temp_dir = TempDir::new().unwrap();
    let cache = create_test_cache(&temp_dir, Duration::from_secs(600));

    cache.save(&strings(&["1.21.0"])).unwrap();

    let content = fs::read_to_string(temp_dir.path().join("cache.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["versions"], serde_json::json!(["1.21.0"]));
    assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[test]
fn load_reports_expired_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("cache.json"),
        r#"{ "timestamp": "2020-01-01T00:00:00Z", "versions": ["1.13.0"] }"#,
    )
    .unwrap();
    let cache = create_test_cache(&temp_dir, Duration::from_secs(600));

    assert!(matches!(cache.load(), Err(CacheError::Expired(_))));
}

#[test]
fn load_reports_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let cache = create_test_cache(&temp_dir, Duration::from_secs(600));

    assert!(matches!(cache.load(), Err(CacheError::NotFound(_))));
}

#[test]
fn clear_removes_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let cache = create_test_cache(&temp_dir, Duration::from_secs(600));
    cache.save(&strings(&["1.21.0"])).unwrap();

    cache.clear().unwrap();

    assert!(matches!(cache.load(), Err(CacheError::NotFound(_))));
    // Clearing twice is fine
    cache.clear().unwrap();
}

#[test]
fn disabled_cache_is_always_empty() {
    let cache = Cache::new(CacheSettings {
        path: None,
        ttl: Duration::from_secs(600),
    });

    cache.save(&strings(&["1.21.0"])).unwrap();

    assert!(cache.load().unwrap().is_empty());
}

#[test]
fn release_list_sorts_groups_and_picks_latest() {
    let tags = strings(&[
        "1.21.0", "1.20.5", "1.21rc2", "1.22beta1", "1.21.1", "1.20", "1.9.7",
    ]);

    let stable: Vec<String> = tags
        .iter()
        .filter(|v| !v.contains("rc") && !v.contains("beta"))
        .cloned()
        .collect();
    assert_eq!(
        sort_versions(&stable).unwrap(),
        strings(&["1.9.7", "1.20", "1.20.5", "1.21.0", "1.21.1"])
    );

    let groups = group_versions(&tags).unwrap();
    assert_eq!(
        groups.keys().collect::<Vec<_>>(),
        vec!["1.9", "1.20", "1.21", "1.22"]
    );
    assert_eq!(groups.get("1.9").unwrap(), &["1.9.7"]);
    assert_eq!(groups.get("1.20").unwrap(), &["1.20.5", "1.20"]);
    assert_eq!(
        groups.get("1.21").unwrap(),
        &["1.21.0", "1.21rc2", "1.21.1"]
    );
    assert_eq!(groups.get("1.22").unwrap(), &["1.22beta1"]);

    assert_eq!(latest_stable(&tags).unwrap(), "1.21.1");
}

#[test]
fn latest_stable_fails_without_stable_releases() {
    let tags = strings(&["1.22rc1", "1.22beta1"]);

    assert_eq!(latest_stable(&tags), Err(VersionError::NoStableVersion));
}

#[test]
fn parse_semantic_rejects_missing_version() {
    assert_eq!(parse_semantic(""), Err(VersionError::NoVersion));
}
