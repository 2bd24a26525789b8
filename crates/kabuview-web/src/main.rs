mod error;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use kabuview_core::{HistoryCache, HistoryService, YahooAdapter};

use crate::routes::{router, AppState};

#[derive(Debug, Parser)]
#[command(name = "kabuview-web")]
#[command(about = "Serve the kabuview stock dashboard", version)]
struct Args {
    /// Address to bind the HTTP server on.
    #[arg(long, default_value = "127.0.0.1:8080")]
    addr: SocketAddr,

    /// Cache TTL in seconds for repeated identical queries.
    #[arg(long, default_value_t = 300)]
    cache_ttl_secs: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("kabuview=info".parse().expect("static directive parses")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    let cache = HistoryCache::new(std::time::Duration::from_secs(args.cache_ttl_secs));
    let service = HistoryService::new(Arc::new(YahooAdapter::default()), cache);
    let app = router(AppState { service });

    let listener = tokio::net::TcpListener::bind(args.addr).await?;
    info!(addr = %args.addr, "kabuview dashboard listening");
    axum::serve(listener, app).await?;

    Ok(())
}
