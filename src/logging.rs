//! Logging setup
//!
//! The subscriber is installed once by [`init`]. The returned [`LogHandle`]
//! is the only way to change the level afterwards.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Registry, fmt, reload};

/// Output format of log records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Handle to the installed subscriber's level filter
pub struct LogHandle {
    filter: reload::Handle<EnvFilter, Registry>,
    from_env: bool,
}

impl LogHandle {
    /// Whether the filter came from `RUST_LOG`
    pub fn from_env(&self) -> bool {
        self.from_env
    }

    /// Replace the active filter with a single global level
    pub fn set_level(&self, level: LevelFilter) -> Result<(), reload::Error> {
        self.filter.reload(EnvFilter::new(level.to_string()))
    }
}

/// Install the global subscriber, writing to stderr.
///
/// The initial filter comes from `RUST_LOG`, falling back to `default_level`.
pub fn init(format: LogFormat, default_level: LevelFilter) -> Result<LogHandle, TryInitError> {
    let (filter, from_env) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(default_level.to_string()), false),
    };
    let (filter_layer, filter) = reload::Layer::new(filter);

    let registry = tracing_subscriber::registry().with(filter_layer);

    match format {
        LogFormat::Text => {
            let layer = fmt::layer().with_writer(std::io::stderr).with_target(false);
            registry.with(layer).try_init()?;
        }
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_target(true);
            registry.with(layer).try_init()?;
        }
    }

    Ok(LogHandle { filter, from_env })
}

/// Level used when `--verbose` is (not) given
pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    }
}

/// Level requested by `verbose` in the config file.
///
/// None when `--verbose` already set it or `RUST_LOG` supplied the filter.
pub fn config_level(
    config_verbose: bool,
    cli_verbose: bool,
    from_env: bool,
) -> Option<LevelFilter> {
    (config_verbose && !cli_verbose && !from_env).then_some(LevelFilter::DEBUG)
}
