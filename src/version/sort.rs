//! Ordering and family grouping for Go release versions

use indexmap::IndexMap;
use semver::Version;
use tracing::debug;

use crate::version::error::VersionError;
use crate::version::semver::{
    display_family, display_version, is_prerelease, is_unsupported, parse_numeric,
    prerelease_marker,
};

/// Sort versions ascending.
///
/// Stable releases come first in semantic order, rendered with
/// [`display_version`]. Pre-releases follow in their input order.
/// A single unparseable stable token fails the whole sort.
pub fn sort_versions<S: AsRef<str>>(versions: &[S]) -> Result<Vec<String>, VersionError> {
    let (prereleases, stable): (Vec<&str>, Vec<&str>) = versions
        .iter()
        .map(AsRef::as_ref)
        .partition(|v| is_prerelease(v));

    let mut parsed = stable
        .into_iter()
        .map(parse_numeric)
        .collect::<Result<Vec<Version>, _>>()?;
    parsed.sort();

    Ok(parsed
        .iter()
        .map(display_version)
        .chain(prereleases.into_iter().map(str::to_string))
        .collect())
}

/// Versions bucketed by major.minor family, families in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionGroups {
    families: IndexMap<String, Vec<String>>,
}

impl VersionGroups {
    /// Family keys in ascending order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.families.keys().map(String::as_str)
    }

    /// Members of a family, in the order they were listed
    pub fn get(&self, family: &str) -> Option<&[String]> {
        self.families.get(family).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.families
            .iter()
            .map(|(key, members)| (key.as_str(), members.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Keep only families whose key is contained in `filter`.
    ///
    /// `filter = "go1.21.5"` keeps family `1.21`. An empty filter keeps
    /// everything.
    pub fn filtered(self, filter: &str) -> Self {
        if filter.is_empty() {
            return self;
        }
        Self {
            families: self
                .families
                .into_iter()
                .filter(|(key, _)| filter.contains(key.as_str()))
                .collect(),
        }
    }
}

/// Derive the family key of a version, or None if it has no minor part.
///
/// Pre-release markers are cut from the key: `1.22beta1` belongs to `1.22`.
pub fn family_key(version: &str) -> Option<String> {
    let mut parts = version.split('.');
    let major = parts.next()?;
    let minor = parts.next()?;
    let key = format!("{major}.{minor}");

    match prerelease_marker(&key) {
        Some(marker) => {
            let cut = key.len() - marker.len();
            Some(key[..cut].to_string())
        }
        None => Some(key),
    }
}

/// Group versions by family.
///
/// Unsupported families and tokens without a minor part are dropped.
/// Members keep their input order. A family key that is not a valid
/// version fails the whole grouping.
pub fn group_versions<S: AsRef<str>>(versions: &[S]) -> Result<VersionGroups, VersionError> {
    let mut raw: IndexMap<String, Vec<String>> = IndexMap::new();
    for version in versions.iter().map(AsRef::as_ref) {
        let Some(key) = family_key(version) else {
            debug!("Skipping version without family: '{}'", version);
            continue;
        };
        if is_unsupported(&key) {
            continue;
        }
        raw.entry(key).or_default().push(version.to_string());
    }

    let mut keyed = raw
        .into_iter()
        .map(|(key, members)| parse_numeric(&key).map(|p| (p, members)))
        .collect::<Result<Vec<_>, _>>()?;
    keyed.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut families: IndexMap<String, Vec<String>> = IndexMap::new();
    for (parsed, members) in keyed {
        families
            .entry(display_family(&parsed))
            .or_default()
            .extend(members);
    }

    Ok(VersionGroups { families })
}

/// Find the newest stable, supported version.
///
/// Pre-releases and unsupported families are excluded; tokens that do not
/// parse are skipped rather than failing the lookup.
pub fn latest_stable<S: AsRef<str>>(versions: &[S]) -> Result<String, VersionError> {
    versions
        .iter()
        .map(AsRef::as_ref)
        .filter(|v| !is_unsupported(v) && !is_prerelease(v))
        .filter_map(|v| {
            parse_numeric(v)
                .inspect_err(|e| debug!("Skipping remote version: {}", e))
                .ok()
        })
        .max()
        .map(|latest| display_version(&latest))
        .ok_or(VersionError::NoStableVersion)
}
