//! Request orchestration: cache lookup, single fetch, transform, and
//! presentation assembly.
//!
//! Each call is a fresh, linear pass over current inputs; the TTL cache
//! is the only state shared between calls.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::analytics::{derive_rows, SummaryStats};
use crate::cache::{HistoryCache, QueryKey};
use crate::chart::{candlestick_chart, overlay_chart, CandlestickChart, OverlayChart};
use crate::data_source::{HistoryRequest, HistoryResult, MarketDataSource, SourceError};
use crate::report::{csv_filename, display_rows, to_csv, DisplayRow, ReportError};
use crate::{DateRange, Ticker, TradingDate};

/// Errors surfaced by service operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Everything one render cycle needs, assembled from a single fetch.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub ticker: Ticker,
    pub company_name: String,
    /// Non-blocking notice, e.g. a future end date.
    pub warning: Option<String>,
    pub summary: SummaryStats,
    pub row_count: usize,
    /// Table rows sorted by date descending, rounded for display.
    pub rows: Vec<DisplayRow>,
    pub candlestick: CandlestickChart,
    pub overlay: OverlayChart,
}

/// CSV export artifact: suggested filename plus encoded bytes.
#[derive(Debug, Clone)]
pub struct CsvExport {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// History fetch and transform pipeline shared by the CLI and the web
/// server.
#[derive(Clone)]
pub struct HistoryService {
    source: Arc<dyn MarketDataSource>,
    cache: HistoryCache,
}

impl HistoryService {
    pub fn new(source: Arc<dyn MarketDataSource>, cache: HistoryCache) -> Self {
        Self { source, cache }
    }

    /// Get-or-populate fetch: one provider call per distinct
    /// (ticker, start, end) within the cache TTL. A cache hit returns
    /// the same shared snapshot.
    pub async fn history(
        &self,
        ticker: &Ticker,
        range: &DateRange,
    ) -> Result<Arc<HistoryResult>, SourceError> {
        let key = QueryKey::new(ticker.clone(), range);

        if let Some(hit) = self.cache.get(&key).await {
            debug!(ticker = %ticker, "history cache hit");
            return Ok(hit);
        }

        info!(ticker = %ticker, start = %range.start(), end = %range.end(), "fetching history");
        let result = self
            .source
            .history(HistoryRequest::new(ticker.clone(), *range))
            .await
            .inspect_err(|error| warn!(ticker = %ticker, error = %error, "history fetch failed"))?;

        let snapshot = Arc::new(result);
        self.cache.put(key, Arc::clone(&snapshot)).await;
        Ok(snapshot)
    }

    /// Full render-cycle assembly: fetch, derive, and package summary,
    /// table rows, and both chart payloads.
    pub async fn dashboard(
        &self,
        ticker: &Ticker,
        range: &DateRange,
    ) -> Result<Dashboard, ServiceError> {
        let result = self.history(ticker, range).await?;

        let summary = SummaryStats::from_series(&result.series)
            .ok_or_else(|| SourceError::internal("fetched series was unexpectedly empty"))?;

        let derived = derive_rows(&result.series);
        let candlestick = candlestick_chart(
            format!("{} ({})", result.company_name, ticker),
            &derived,
        );
        let overlay = overlay_chart("Close and moving averages", &derived);
        let rows = display_rows(&derived);

        Ok(Dashboard {
            ticker: ticker.clone(),
            company_name: result.company_name.clone(),
            warning: range.future_end_warning(TradingDate::today()),
            summary,
            row_count: rows.len(),
            rows,
            candlestick,
            overlay,
        })
    }

    /// CSV export of the display table, named `{ticker}_{start}_to_{end}.csv`.
    pub async fn export_csv(
        &self,
        ticker: &Ticker,
        range: &DateRange,
    ) -> Result<CsvExport, ServiceError> {
        let result = self.history(ticker, range).await?;
        let rows = display_rows(&derive_rows(&result.series));

        Ok(CsvExport {
            filename: csv_filename(ticker, range),
            bytes: to_csv(&rows)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::data_source::SourceErrorKind;
    use crate::{Bar, PriceSeries};

    struct FakeSource {
        closes: Vec<f64>,
        calls: AtomicUsize,
    }

    impl FakeSource {
        fn with_closes(closes: &[f64]) -> Self {
            Self {
                closes: closes.to_vec(),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl MarketDataSource for FakeSource {
        fn history<'a>(
            &'a self,
            req: HistoryRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HistoryResult, SourceError>> + Send + 'a>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let closes = self.closes.clone();
            Box::pin(async move {
                if closes.is_empty() {
                    return Err(SourceError::no_data(format!(
                        "no data found for {}",
                        req.ticker
                    )));
                }

                let bars = closes
                    .iter()
                    .enumerate()
                    .map(|(i, &close)| {
                        let date = TradingDate::parse(&format!("2023-01-{:02}", i + 2))
                            .expect("valid date");
                        Bar::new(date, close, close + 2.0, close - 2.0, close, Some(1_000))
                            .expect("valid bar")
                    })
                    .collect();

                Ok(HistoryResult {
                    series: PriceSeries::new(req.ticker, bars).expect("valid series"),
                    company_name: String::from("Fake Co"),
                })
            })
        }
    }

    fn inputs() -> (Ticker, DateRange) {
        (
            Ticker::parse("FAKE").expect("valid ticker"),
            DateRange::parse("2023-01-01", "2023-01-10").expect("valid range"),
        )
    }

    #[tokio::test]
    async fn repeated_queries_hit_the_cache() {
        let source = Arc::new(FakeSource::with_closes(&[100.0, 102.0]));
        let service = HistoryService::new(source.clone(), HistoryCache::with_default_ttl());
        let (ticker, range) = inputs();

        let first = service.history(&ticker, &range).await.expect("must fetch");
        let second = service.history(&ticker, &range).await.expect("must hit");

        assert_eq!(source.call_count(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn distinct_ranges_fetch_separately() {
        let source = Arc::new(FakeSource::with_closes(&[100.0, 102.0]));
        let service = HistoryService::new(source.clone(), HistoryCache::with_default_ttl());
        let (ticker, range) = inputs();
        let wider = DateRange::parse("2023-01-01", "2023-02-10").expect("valid range");

        service.history(&ticker, &range).await.expect("must fetch");
        service.history(&ticker, &wider).await.expect("must fetch");

        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn no_data_error_propagates_unretried() {
        let source = Arc::new(FakeSource::with_closes(&[]));
        let service = HistoryService::new(source.clone(), HistoryCache::with_default_ttl());
        let (ticker, range) = inputs();

        let error = service
            .history(&ticker, &range)
            .await
            .expect_err("must fail");
        assert_eq!(error.kind(), SourceErrorKind::NoData);
        assert_eq!(source.call_count(), 1);

        // Failures are not cached; the next call fetches again.
        let _ = service.history(&ticker, &range).await;
        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn dashboard_assembles_summary_rows_and_charts() {
        let source = Arc::new(FakeSource::with_closes(&[100.0, 102.0, 101.0, 105.0, 107.0]));
        let service = HistoryService::new(source, HistoryCache::disabled());
        let (ticker, range) = inputs();

        let dashboard = service
            .dashboard(&ticker, &range)
            .await
            .expect("must assemble");

        assert_eq!(dashboard.company_name, "Fake Co");
        assert_eq!(dashboard.row_count, 5);
        assert_eq!(dashboard.summary.change, 2.0);
        assert_eq!(dashboard.rows[0].date, "2023-01-06");
        assert_eq!(dashboard.candlestick.dates[0], "2023-01-02");
        assert_eq!(dashboard.candlestick.title, "Fake Co (FAKE)");
        assert_eq!(dashboard.overlay.ma5[4], Some(103.0));
    }

    #[tokio::test]
    async fn export_names_file_from_query() {
        let source = Arc::new(FakeSource::with_closes(&[100.0, 102.0]));
        let service = HistoryService::new(source, HistoryCache::disabled());
        let (ticker, range) = inputs();

        let export = service
            .export_csv(&ticker, &range)
            .await
            .expect("must export");

        assert_eq!(export.filename, "FAKE_2023-01-01_to_2023-01-10.csv");
        assert_eq!(&export.bytes[..3], &[0xEF, 0xBB, 0xBF]);
    }
}
