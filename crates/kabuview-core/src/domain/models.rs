use serde::{Deserialize, Serialize};

use crate::{Ticker, TradingDate, ValidationError};

/// Daily OHLCV bar record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: TradingDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<u64>,
}

impl Bar {
    pub fn new(
        date: TradingDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: Option<u64>,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("open", open)?;
        validate_non_negative("high", high)?;
        validate_non_negative("low", low)?;
        validate_non_negative("close", close)?;

        if high < low {
            return Err(ValidationError::InvalidBarRange);
        }

        if open < low || open > high || close < low || close > high {
            return Err(ValidationError::InvalidBarBounds);
        }

        Ok(Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        })
    }
}

/// Time-ordered daily series for one ticker.
///
/// Invariant: bar dates are strictly increasing with no duplicates
/// within one fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub ticker: Ticker,
    pub bars: Vec<Bar>,
}

impl PriceSeries {
    pub fn new(ticker: Ticker, bars: Vec<Bar>) -> Result<Self, ValidationError> {
        for window in bars.windows(2) {
            let (prev, next) = (&window[0], &window[1]);
            if next.date == prev.date {
                return Err(ValidationError::DuplicateDate {
                    date: next.date.format_iso(),
                });
            }
            if next.date < prev.date {
                return Err(ValidationError::OutOfOrderDate {
                    date: next.date.format_iso(),
                });
            }
        }

        Ok(Self { ticker, bars })
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Closing prices in stored (ascending-date) order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.close).collect()
    }
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}
