//! gvm: a version manager for the Go toolchain
//!
//! - [`version`]: Version grammar, ordering, catalog cache and remote tags
//! - [`install`]: Local layout, download, extraction and activation
//! - [`toolchain`]: The list/install/use/uninstall commands
//! - [`config`]: Configuration defaults and loading
//! - [`logging`]: Subscriber setup and level control

pub mod config;
pub mod error;
pub mod install;
pub mod logging;
pub mod toolchain;
pub mod version;

pub use error::Error;
