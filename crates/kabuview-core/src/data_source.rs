//! Provider adapter contract and request/response types.
//!
//! A market-data provider exposes one endpoint: historical daily OHLCV
//! rows for a (ticker, date range) query, plus a display name for the
//! instrument. The outcome is tagged: either a populated series with a
//! name, or a [`SourceError`]. There is no partial-success state.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::{DateRange, PriceSeries, Ticker};

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// Provider answered but had no rows for the symbol/period.
    NoData,
    /// Transport failure or upstream non-success status.
    Unavailable,
    /// Request rejected before reaching the provider.
    InvalidRequest,
    /// Malformed provider payload or internal invariant failure.
    Internal,
}

/// Structured source error surfaced to the user without retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    pub fn no_data(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::NoData,
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::NoData => "source.no_data",
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Request payload for the history endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub ticker: Ticker,
    pub range: DateRange,
}

impl HistoryRequest {
    pub fn new(ticker: Ticker, range: DateRange) -> Self {
        Self { ticker, range }
    }
}

/// Normalized provider outcome: a time-ordered series plus the
/// instrument's display name.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryResult {
    pub series: PriceSeries,
    pub company_name: String,
}

/// Source adapter contract.
///
/// Implementations must be `Send + Sync` as they are shared across
/// request handlers.
pub trait MarketDataSource: Send + Sync {
    /// Fetch historical daily bars for the requested ticker and range.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the provider has no rows for the
    /// symbol/period, when transport fails, or when the payload cannot
    /// be parsed. None of these outcomes is retried.
    fn history<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HistoryResult, SourceError>> + Send + 'a>>;
}
