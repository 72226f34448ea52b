//! Release archive fixtures

use flate2::Compression;
use flate2::write::GzEncoder;
use tar::Builder;

fn tarball(files: &[(&str, &[u8])]) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = Builder::new(encoder);

    for (path, content) in files {
        let mut header = tar::Header::new_gnu();
        header.set_path(path).unwrap();
        header.set_size(content.len() as u64);
        header.set_mode(0o755);
        header.set_cksum();
        builder.append(&header, &content[..]).unwrap();
    }

    builder.into_inner().unwrap().finish().unwrap()
}

/// A minimal Go release: `go/VERSION` and `go/bin/go`
pub fn go_tarball(version: &str) -> Vec<u8> {
    let version_file = format!("go{version}");
    tarball(&[
        ("go/VERSION", version_file.as_bytes()),
        ("go/bin/go", b"#!/bin/sh\necho go\n"),
    ])
}

/// An archive that unpacks without a top-level `go/` directory
pub fn tarball_without_goroot() -> Vec<u8> {
    tarball(&[("README", b"not a go release")])
}
