//! Go release version grammar
//!
//! Go release tags come in several shapes:
//! - Three components: `1.21.0`, `1.21.3`
//! - Legacy two components: `1.4`, `1.20`
//! - Pre-releases: `1.22beta1`, `1.21rc2`
//! - Decorated requests: `1.21@latest`, `1.20.x`

use std::sync::LazyLock;

use regex::Regex;
use semver::Version;

use crate::version::error::VersionError;

/// Sentinel reported when no version is active.
pub const NONE_VERSION: &str = "None";

/// Family keys of releases that are no longer installable.
pub const UNSUPPORTED_FAMILIES: &[&str] = &["1.0", "1.1", "1.2", "1.3", "1.4"];

// Unanchored on purpose: the first match decides where a family key is cut.
static PRERELEASE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("beta.*|rc.*").expect("valid regex"));

/// Strip request decorations from a version token.
///
/// Each suffix is removed at most once, in order:
/// `@latest`, `@dev-latest`, `.x`, `x`.
pub fn normalize(version: &str) -> &str {
    let version = version.strip_suffix("@latest").unwrap_or(version);
    let version = version.strip_suffix("@dev-latest").unwrap_or(version);
    let version = version.strip_suffix(".x").unwrap_or(version);
    version.strip_suffix('x').unwrap_or(version)
}

/// Returns the beta/rc marker found in `version`, from its first occurrence
/// to the end of the token.
pub fn prerelease_marker(version: &str) -> Option<&str> {
    PRERELEASE_PATTERN.find(version).map(|m| m.as_str())
}

/// Check if a token is a beta or release candidate.
pub fn is_prerelease(version: &str) -> bool {
    PRERELEASE_PATTERN.is_match(version)
}

/// Check if a major.minor family key is blacklisted.
pub fn is_unsupported(family: &str) -> bool {
    UNSUPPORTED_FAMILIES.contains(&family)
}

/// Parse a user supplied version after normalization.
///
/// Empty input and the [`NONE_VERSION`] sentinel are rejected with
/// [`VersionError::NoVersion`].
pub fn parse_semantic(version: &str) -> Result<Version, VersionError> {
    if version.is_empty() || version == NONE_VERSION {
        return Err(VersionError::NoVersion);
    }
    parse_numeric(normalize(version))
}

/// Parse `major[.minor[.patch]]`, with or without a leading `v`.
///
/// Missing components are padded with zeros. Pre-release and build
/// metadata are rejected.
pub fn parse_numeric(version: &str) -> Result<Version, VersionError> {
    let trimmed = version.strip_prefix('v').unwrap_or(version);
    let parts: Vec<&str> = trimmed.split('.').collect();
    let padded = match parts.len() {
        1 => format!("{}.0.0", parts[0]),
        2 => format!("{}.{}.0", parts[0], parts[1]),
        3 => trimmed.to_string(),
        n => {
            return Err(VersionError::invalid(
                version,
                format!("expected at most 3 components, found {n}"),
            ));
        }
    };

    let parsed = Version::parse(&padded).map_err(|e| VersionError::invalid(version, e))?;
    if !parsed.pre.is_empty() || !parsed.build.is_empty() {
        return Err(VersionError::invalid(
            version,
            "pre-release and build metadata are not supported",
        ));
    }
    Ok(parsed)
}

/// Render a parsed release the way Go names it.
///
/// Releases before 1.21 dropped the `.0` patch from their first release
/// (`1.20`, not `1.20.0`).
pub fn display_version(version: &Version) -> String {
    if version.major == 1 && version.minor < 21 && version.patch == 0 {
        format!("{}.{}", version.major, version.minor)
    } else {
        version.to_string()
    }
}

/// Render a family key: the semantic form minus one trailing `.0`.
pub fn display_family(version: &Version) -> String {
    let rendered = version.to_string();
    match rendered.strip_suffix(".0") {
        Some(stripped) => stripped.to_string(),
        None => rendered,
    }
}
