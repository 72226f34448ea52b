//! Release archive extraction
//!
//! Go ships `.tar.gz` archives for Unix-like systems and `.zip` archives for
//! Windows. Both unpack to a single top-level `go/` directory.

use std::fs::{self, File};
use std::path::Path;

use flate2::read::GzDecoder;
use tar::Archive;
use tracing::debug;

use crate::install::error::InstallError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArchiveKind {
    TarGz,
    Zip,
}

impl ArchiveKind {
    fn detect(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Some(Self::TarGz)
        } else if name.ends_with(".zip") {
            Some(Self::Zip)
        } else {
            None
        }
    }
}

/// Unpack `archive` into `dest`, creating `dest` if needed.
pub fn extract(archive: &Path, dest: &Path) -> Result<(), InstallError> {
    debug!("Extracting {:?} to {:?}", archive, dest);

    let kind = ArchiveKind::detect(archive)
        .ok_or_else(|| InstallError::UnsupportedArchive(archive.to_path_buf()))?;

    fs::create_dir_all(dest).map_err(InstallError::io(dest))?;
    let file = File::open(archive).map_err(InstallError::io(archive))?;

    let extract_error = |reason: String| InstallError::Extract {
        archive: archive.to_path_buf(),
        reason,
    };

    match kind {
        ArchiveKind::TarGz => Archive::new(GzDecoder::new(file))
            .unpack(dest)
            .map_err(|e| extract_error(e.to_string())),
        ArchiveKind::Zip => zip::ZipArchive::new(file)
            .and_then(|mut zip| zip.extract(dest))
            .map_err(|e| extract_error(e.to_string())),
    }
}
