//! # Kabuview Core
//!
//! Domain types and the fetch/transform pipeline behind the kabuview
//! stock-history dashboard.
//!
//! ## Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`domain`] | Validated tickers, dates, ranges, and OHLCV bars |
//! | [`data_source`] | Provider adapter contract and history request/result |
//! | [`adapters`] | Yahoo Finance chart-endpoint adapter |
//! | [`http_client`] | HTTP transport abstraction over reqwest |
//! | [`cache`] | TTL-keyed memoization of fetch results |
//! | [`analytics`] | Summary statistics and moving averages |
//! | [`report`] | Display table and CSV export |
//! | [`chart`] | Declarative chart payloads for the browser renderer |
//! | [`service`] | Per-request orchestration used by both surfaces |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use kabuview_core::{
//!     DateRange, HistoryCache, HistoryService, Ticker, YahooAdapter,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = HistoryService::new(
//!         Arc::new(YahooAdapter::default()),
//!         HistoryCache::with_default_ttl(),
//!     );
//!
//!     let ticker = Ticker::parse("7203.T")?;
//!     let range = DateRange::parse("2023-01-01", "2023-06-30")?;
//!     let dashboard = service.dashboard(&ticker, &range).await?;
//!
//!     println!("{}: {:+.2}%", dashboard.company_name, dashboard.summary.change_pct);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Input problems are [`ValidationError`]s raised before any fetch;
//! provider problems are [`SourceError`]s tagged with a kind
//! ([`SourceErrorKind::NoData`] for an unknown symbol/period versus
//! transport or parse failures). Neither is retried.

pub mod adapters;
pub mod analytics;
pub mod cache;
pub mod chart;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod report;
pub mod service;

// Re-export commonly used types at crate root for convenience

pub use adapters::YahooAdapter;

pub use analytics::{derive_rows, sma, DerivedRow, SummaryStats, MA_LONG_WINDOW, MA_SHORT_WINDOW};

pub use cache::{HistoryCache, QueryKey};

pub use chart::{candlestick_chart, overlay_chart, CandlestickChart, OverlayChart};

pub use data_source::{
    HistoryRequest, HistoryResult, MarketDataSource, SourceError, SourceErrorKind,
};

pub use domain::{Bar, DateRange, PriceSeries, Ticker, TradingDate};

pub use error::ValidationError;

pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

pub use report::{
    csv_filename, display_rows, round_display, to_csv, DisplayRow, ReportError, DISPLAY_HEADERS,
};

pub use service::{CsvExport, Dashboard, HistoryService, ServiceError};
