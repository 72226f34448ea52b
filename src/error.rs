use thiserror::Error;

use crate::config::ConfigError;
use crate::install::InstallError;
use crate::version::error::{CacheError, RegistryError, VersionError};

/// Error returned by gvm commands
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Version(#[from] VersionError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Install(#[from] InstallError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
