mod cli;
mod commands;
mod error;
mod output;

use std::sync::Arc;

use clap::Parser;

use kabuview_core::{HistoryCache, HistoryService, YahooAdapter};

use crate::cli::{Cli, Commands};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("kabuview=info".parse().expect("static directive parses")),
        )
        .with_target(false)
        .init();

    if let Err(error) = run().await {
        eprintln!("error: {error}");
        if let Some(hint) = error.hint() {
            eprintln!("hint: {hint}");
        }
        std::process::exit(error.exit_code());
    }
}

async fn run() -> Result<(), CliError> {
    let cli = Cli::parse();

    let cache = if cli.no_cache {
        HistoryCache::disabled()
    } else {
        HistoryCache::with_default_ttl()
    };
    let service = HistoryService::new(Arc::new(YahooAdapter::default()), cache);

    match &cli.command {
        Commands::Summary(args) => commands::summary::run(args, &service, &cli).await,
        Commands::History(args) => commands::history::run(args, &service, &cli).await,
        Commands::Export(args) => commands::export::run(args, &service).await,
    }
}
