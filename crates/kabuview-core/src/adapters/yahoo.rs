use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::data_source::{HistoryRequest, HistoryResult, MarketDataSource, SourceError};
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::{Bar, PriceSeries, TradingDate, ValidationError};

const CHART_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Yahoo Finance adapter over the unauthenticated v8 chart endpoint.
///
/// One request per history query: the chart payload carries both the
/// OHLCV arrays and the instrument metadata used for the display name
/// (`longName`, falling back to `shortName`, then the ticker itself).
#[derive(Clone)]
pub struct YahooAdapter {
    http_client: Arc<dyn HttpClient>,
}

impl Default for YahooAdapter {
    fn default() -> Self {
        Self {
            http_client: Arc::new(ReqwestHttpClient::new()),
        }
    }
}

impl YahooAdapter {
    pub fn with_http_client(http_client: Arc<dyn HttpClient>) -> Self {
        Self { http_client }
    }

    fn chart_url(req: &HistoryRequest) -> String {
        // period2 is exclusive upstream, matching the range contract.
        format!(
            "{}/{}?period1={}&period2={}&interval=1d",
            CHART_BASE_URL,
            urlencoding::encode(req.ticker.as_str()),
            req.range.start().unix_midnight(),
            req.range.end().unix_midnight(),
        )
    }

    async fn fetch_history(&self, req: &HistoryRequest) -> Result<HistoryResult, SourceError> {
        let url = Self::chart_url(req);
        debug!(ticker = %req.ticker, url = %url, "fetching yahoo chart");

        let request = HttpRequest::get(&url)
            .with_header("referer", "https://finance.yahoo.com/")
            .with_timeout_ms(10_000);

        let response = self.http_client.execute(request).await.map_err(|error| {
            warn!(ticker = %req.ticker, error = %error, "yahoo transport error");
            SourceError::unavailable(format!("yahoo transport error: {}", error.message()))
        })?;

        // 404 is Yahoo's answer for an unknown symbol.
        if response.status == 404 {
            return Err(no_data_error(req));
        }

        if !response.is_success() {
            return Err(SourceError::unavailable(format!(
                "yahoo returned status {}",
                response.status
            )));
        }

        parse_chart_body(&response.body, req)
    }
}

impl MarketDataSource for YahooAdapter {
    fn history<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HistoryResult, SourceError>> + Send + 'a>> {
        Box::pin(async move { self.fetch_history(&req).await })
    }
}

fn no_data_error(req: &HistoryRequest) -> SourceError {
    SourceError::no_data(format!(
        "no data found for {} between {} and {}; check the ticker and period",
        req.ticker,
        req.range.start(),
        req.range.end(),
    ))
}

fn parse_chart_body(body: &str, req: &HistoryRequest) -> Result<HistoryResult, SourceError> {
    let chart_response: ChartResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::internal(format!("failed to parse yahoo chart response: {e}")))?;

    if let Some(error) = &chart_response.chart.error {
        // "Not Found" style descriptions mean an unknown symbol, not an outage.
        if error.code.eq_ignore_ascii_case("not found") {
            return Err(no_data_error(req));
        }
        return Err(SourceError::unavailable(format!(
            "yahoo chart API error: {}",
            error.description
        )));
    }

    let Some(result) = chart_response.chart.result.and_then(|mut r| {
        if r.is_empty() {
            None
        } else {
            Some(r.remove(0))
        }
    }) else {
        return Err(no_data_error(req));
    };

    let company_name = result
        .meta
        .as_ref()
        .and_then(|meta| {
            meta.long_name
                .clone()
                .or_else(|| meta.short_name.clone())
                .filter(|name| !name.trim().is_empty())
        })
        .unwrap_or_else(|| req.ticker.to_string());

    let timestamps = result.timestamp.unwrap_or_default();
    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .unwrap_or_default();

    let mut bars: Vec<Bar> = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        // Rows with any missing OHLC field are skipped, not zero-filled.
        let (Some(Some(open)), Some(Some(high)), Some(Some(low)), Some(Some(close))) = (
            quote.open.get(i),
            quote.high.get(i),
            quote.low.get(i),
            quote.close.get(i),
        ) else {
            continue;
        };

        let date = TradingDate::from_unix_timestamp(ts).map_err(validation_to_error)?;

        // Keep the first row per calendar day so dates stay strictly increasing.
        if bars.last().is_some_and(|last| last.date >= date) {
            continue;
        }

        let volume = quote.volume.get(i).copied().flatten().map(|v| v as u64);
        bars.push(Bar::new(date, *open, *high, *low, *close, volume).map_err(validation_to_error)?);
    }

    if bars.is_empty() {
        return Err(no_data_error(req));
    }

    let series = PriceSeries::new(req.ticker.clone(), bars).map_err(validation_to_error)?;
    debug!(ticker = %req.ticker, rows = series.len(), "yahoo chart parsed");

    Ok(HistoryResult {
        series,
        company_name,
    })
}

fn validation_to_error(error: ValidationError) -> SourceError {
    SourceError::internal(error.to_string())
}

// Yahoo chart API response structures. The adjclose indicator block is
// intentionally not modeled; adjusted close never reaches the display table.
#[derive(Debug, Clone, Deserialize)]
struct ChartResponse {
    chart: ChartData,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartData {
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartApiError>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartApiError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartResult {
    #[serde(default)]
    meta: Option<ChartMeta>,
    timestamp: Option<Vec<i64>>,
    indicators: ChartIndicators,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartMeta {
    #[serde(rename = "longName", default)]
    long_name: Option<String>,
    #[serde(rename = "shortName", default)]
    short_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChartIndicators {
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<i64>>,
}
