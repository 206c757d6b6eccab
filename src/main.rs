//! `library`: interactive catalogue of books, DVDs and magazines.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use library_catalogue::config::{DEFAULT_ADMIN_SECRET, DEFAULT_DATA_DIR};
use library_catalogue::{Config, LibraryService, Shell};

/// Borrow, return and reserve library items from the terminal.
#[derive(Parser)]
#[command(name = "library", version, about)]
struct Cli {
    /// Directory holding items.json and users.json.
    #[arg(long, env = "LIBRARY_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Password for the admin menu.
    #[arg(long, env = "LIBRARY_ADMIN_SECRET", default_value = DEFAULT_ADMIN_SECRET)]
    admin_secret: String,

    /// Create missing collection files as empty arrays before loading.
    #[arg(long)]
    init: bool,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            data_dir: cli.data_dir,
            admin_secret: cli.admin_secret,
            init: cli.init,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from(Cli::parse());
    let (mut service, _issues) = LibraryService::from_config(&config)
        .with_context(|| format!("preparing {}", config.data_dir.display()))?;

    let stdin = io::stdin();
    let mut shell = Shell::new(&mut service, stdin.lock(), io::stdout());
    shell.run().context("terminal session failed")?;
    Ok(())
}
