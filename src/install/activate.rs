//! Activation of an installed release via the `current` symlinks

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::install::error::InstallError;
use crate::install::layout::Layout;

/// Point `current/go` and `current/bin` at `version`.
///
/// Existing links are replaced and always point at absolute paths. The
/// caller checks that `version` is installed.
pub fn activate(layout: &Layout, version: &str) -> Result<(), InstallError> {
    let current_dir = layout.current_dir();
    fs::create_dir_all(&current_dir).map_err(InstallError::io(&current_dir))?;

    relink(&layout.version_go_dir(version), &layout.current_go())?;
    relink(&layout.version_bin_dir(version), &layout.current_bin())?;

    debug!("Activated {}", version);
    Ok(())
}

/// Remove the `current` links, leaving no active version.
pub fn deactivate(layout: &Layout) -> Result<(), InstallError> {
    remove_existing(&layout.current_go())?;
    remove_existing(&layout.current_bin())?;
    Ok(())
}

fn relink(target: &Path, link: &Path) -> Result<(), InstallError> {
    let target = std::path::absolute(target).map_err(InstallError::io(target))?;
    remove_existing(link)?;
    debug!("Linking {:?} -> {:?}", link, target);
    symlink_dir(&target, link).map_err(InstallError::io(link))
}

fn remove_existing(path: &Path) -> Result<(), InstallError> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(InstallError::io(path)(e)),
    };

    let result = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        remove_link(path)
    };
    result.map_err(InstallError::io(path))
}

#[cfg(unix)]
fn symlink_dir(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink_dir(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}

#[cfg(unix)]
fn remove_link(path: &Path) -> std::io::Result<()> {
    fs::remove_file(path)
}

// Directory symlinks on Windows are removed as directories.
#[cfg(windows)]
fn remove_link(path: &Path) -> std::io::Result<()> {
    fs::remove_dir(path).or_else(|_| fs::remove_file(path))
}
