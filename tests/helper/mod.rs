//! Shared fixtures for integration tests
#![allow(dead_code)]

pub mod archive;
pub mod registry;

pub use archive::{go_tarball, tarball_without_goroot};
pub use registry::{StaticTagSource, create_test_toolchain};
