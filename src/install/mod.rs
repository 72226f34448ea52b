//! Installation layer: local layout, download, extraction and activation
//!
//! # Modules
//!
//! - [`layout`]: Paths under the root directory and active version discovery
//! - [`platform`]: Go's names for the host OS/architecture and archive naming
//! - [`download`]: Fetching release archives over HTTP
//! - [`extract`]: Unpacking `.tar.gz` and `.zip` archives
//! - [`activate`]: Repointing the `current` symlinks
//! - [`error`]: Error type for installation steps

pub mod activate;
pub mod download;
pub mod error;
pub mod extract;
pub mod layout;
pub mod platform;

pub use error::InstallError;
pub use layout::Layout;
pub use platform::Platform;
