// horn: HashiCorp release notes.
// Idempotently caches release notes under ~/.horn and greps them for a literal string.

mod cache;
mod check;
mod cli;
mod config;
mod error;
mod hashicorp;
mod logging;
mod search;

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use crate::cache::{FsStore, ReleaseStore, default_cache_dir};
use crate::cli::Cli;
use crate::config::Config;
use crate::error::{HornError, Result};
use crate::hashicorp::{Endpoints, HttpClient};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("horn: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    if !cli.check && cli.grep.is_none() {
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref())?;
    let root = cli
        .cache_dir
        .clone()
        .or_else(|| config.cache_dir.clone())
        .or_else(default_cache_dir)
        .ok_or(HornError::NoHomeDir)?;

    let store = FsStore::new(root);
    let endpoints = Endpoints::from_config(&config);
    let client = HttpClient::new(&config)?;

    if cli.check {
        check::check_releases(&client, &store, &endpoints, &config.products).await?;
    }

    if let Some(pattern) = &cli.grep {
        let releases = store.keys()?;
        search::search_releases(
            &client,
            &store,
            &endpoints,
            &releases,
            pattern,
            cli.notes_source(),
        )
        .await?;
    }

    Ok(())
}
