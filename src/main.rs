use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use gvm::config::{self, Config, parse_duration};
use gvm::install::Platform;
use gvm::logging::{self, LogFormat};
use gvm::toolchain::{InstallOutcome, Toolchain, UseOutcome, VersionListing};
use gvm::version::semver::NONE_VERSION;

#[derive(Parser)]
#[command(name = "gvm")]
#[command(version, about = "A tool for managing Go versions")]
struct Cli {
    /// Root directory for installed versions and the cache
    #[arg(long, global = true, env = config::ROOT_ENV)]
    root: Option<PathBuf>,

    /// Base URL of the release archives
    #[arg(long, global = true)]
    repo: Option<String>,

    /// URL of the JSON list of release tags
    #[arg(long, global = true)]
    tag_url: Option<String>,

    /// How long the remote version list stays cached (e.g. 90s, 10m, 1h)
    #[arg(long, global = true, value_parser = parse_duration)]
    cache_ttl: Option<Duration>,

    /// Show debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List installed versions, or remote versions with --remote
    List {
        /// Only show remote families contained in this string (e.g. 1.21)
        filter: Option<String>,

        /// List versions available for download
        #[arg(long)]
        remote: bool,

        /// Drop the cached remote version list first
        #[arg(long)]
        clear_cache: bool,
    },
    /// Install a version; the latest stable one if omitted
    Install { version: Option<String> },
    /// Switch the active version
    Use { version: String },
    /// Remove an installed version
    Uninstall { version: String },
    /// Show build information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log = logging::init(cli.log_format, logging::level_for(cli.verbose))?;

    let root = cli.root.clone().unwrap_or_else(config::root_dir);
    let mut config = Config::load(&root)?;
    if let Some(repo) = cli.repo {
        config.repo = repo;
    }
    if let Some(tag_url) = cli.tag_url {
        config.tag_url = tag_url;
    }
    if let Some(ttl) = cli.cache_ttl {
        config.cache_ttl = ttl.as_secs();
    }
    if let Some(level) = logging::config_level(config.verbose, cli.verbose, log.from_env()) {
        log.set_level(level)?;
    }
    config.verbose |= cli.verbose;
    config.validate()?;
    tracing::debug!("Loaded config: {:?}", config);

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(run(cli.command, &config))
}

async fn run(command: Command, config: &Config) -> anyhow::Result<()> {
    let toolchain = Toolchain::from_config(config);

    match command {
        Command::List {
            filter,
            remote,
            clear_cache,
        } => {
            if clear_cache {
                toolchain.clear_cache()?;
            }
            let listing = toolchain
                .list(remote, filter.as_deref().unwrap_or_default())
                .await?;
            print_listing(&listing);
        }
        Command::Install { version } => match toolchain.install(version.as_deref()).await? {
            InstallOutcome::Installed(version) => println!("Installed {version}"),
            InstallOutcome::AlreadyInstalled(version) => {
                println!("{version} is already installed")
            }
        },
        Command::Use { version } => match toolchain.use_version(&version)? {
            UseOutcome::Activated => println!("Now using {version}"),
            UseOutcome::AlreadyActive => println!("Already using {version}"),
        },
        Command::Uninstall { version } => {
            toolchain.uninstall(&version)?;
            println!("Uninstalled {version}");
        }
        Command::Version => print_version(),
    }

    Ok(())
}

fn print_listing(listing: &VersionListing) {
    match listing {
        VersionListing::Local { versions, current } => {
            for installed in versions {
                if installed.active {
                    println!("{} *", installed.version);
                } else {
                    println!("{}", installed.version);
                }
            }
            println!();
            println!("current: {}", current.as_deref().unwrap_or(NONE_VERSION));
        }
        VersionListing::Remote(groups) => {
            for (family, members) in groups.iter() {
                println!("{:<6} {}", family, members.join(" "));
            }
        }
    }
}

fn print_version() {
    let platform = Platform::current();
    println!("{:<14}{}", "Version:", env!("CARGO_PKG_VERSION"));
    println!("{:<14}{}/{}", "OS/Arch:", platform.os, platform.arch);
}
