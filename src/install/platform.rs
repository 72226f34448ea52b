//! Go's naming of the host platform and release archives

use std::env::consts;

/// Target platform of a release archive, in Go's `GOOS`/`GOARCH` names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub os: &'static str,
    pub arch: &'static str,
}

impl Platform {
    /// The platform this binary was built for
    pub fn current() -> Self {
        Self {
            os: go_os(consts::OS),
            arch: go_arch(consts::ARCH),
        }
    }

    pub fn archive_ext(&self) -> &'static str {
        if self.os == "windows" {
            ".zip"
        } else {
            ".tar.gz"
        }
    }

    /// Archive file name, e.g. `go1.21.0.linux-amd64.tar.gz`
    pub fn archive_name(&self, version: &str) -> String {
        format!(
            "go{}.{}-{}{}",
            version,
            self.os,
            self.arch,
            self.archive_ext()
        )
    }
}

fn go_os(os: &'static str) -> &'static str {
    match os {
        "macos" => "darwin",
        other => other,
    }
}

fn go_arch(arch: &'static str) -> &'static str {
    match arch {
        "x86_64" => "amd64",
        "x86" => "386",
        "aarch64" => "arm64",
        "arm" => "armv6l",
        "powerpc64" => "ppc64",
        "loongarch64" => "loong64",
        other => other,
    }
}

/// Join a repository base URL and an archive name
pub fn archive_url(repo: &str, archive_name: &str) -> String {
    format!("{}/{}", repo.trim_end_matches('/'), archive_name)
}
