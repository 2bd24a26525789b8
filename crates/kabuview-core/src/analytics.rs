//! Pure transforms over a [`PriceSeries`]: summary statistics and
//! trailing simple moving averages.

use serde::{Deserialize, Serialize};

use crate::{Bar, PriceSeries};

/// Short moving-average window over closing prices.
pub const MA_SHORT_WINDOW: usize = 5;
/// Long moving-average window over closing prices.
pub const MA_LONG_WINDOW: usize = 25;

/// Headline statistics for a fetched period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub latest_close: f64,
    /// Latest close minus prior close; 0 when fewer than 2 rows exist.
    pub change: f64,
    /// `change / prior_close * 100`; 0 when fewer than 2 rows exist.
    pub change_pct: f64,
    pub period_high: f64,
    pub period_low: f64,
}

impl SummaryStats {
    /// Compute the summary for a non-empty series; `None` when empty.
    pub fn from_series(series: &PriceSeries) -> Option<Self> {
        let last = series.bars.last()?;
        let prior_close = series
            .len()
            .checked_sub(2)
            .and_then(|i| series.bars.get(i))
            .map(|bar| bar.close);

        let (change, change_pct) = match prior_close {
            Some(prior) => {
                let change = last.close - prior;
                (change, change / prior * 100.0)
            }
            None => (0.0, 0.0),
        };

        let period_high = series
            .bars
            .iter()
            .map(|bar| bar.high)
            .fold(f64::MIN, f64::max);
        let period_low = series
            .bars
            .iter()
            .map(|bar| bar.low)
            .fold(f64::MAX, f64::min);

        Some(Self {
            latest_close: last.close,
            change,
            change_pct,
            period_high,
            period_low,
        })
    }
}

/// Bar augmented with the moving-average values at its position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedRow {
    #[serde(flatten)]
    pub bar: Bar,
    pub ma5: Option<f64>,
    pub ma25: Option<f64>,
}

/// Trailing simple moving average: `out[i]` is the unweighted mean of
/// `values[i-window+1..=i]`, `None` until the window is full.
pub fn sma(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    let mut out = Vec::with_capacity(values.len());
    let mut running = 0.0;
    for (i, &value) in values.iter().enumerate() {
        running += value;
        if i >= window {
            running -= values[i - window];
        }
        if i + 1 >= window {
            out.push(Some(running / window as f64));
        } else {
            out.push(None);
        }
    }
    out
}

/// Augment each bar with MA5/MA25 over the closing price, preserving
/// the stored ascending-date order.
pub fn derive_rows(series: &PriceSeries) -> Vec<DerivedRow> {
    let closes = series.closes();
    let ma_short = sma(&closes, MA_SHORT_WINDOW);
    let ma_long = sma(&closes, MA_LONG_WINDOW);

    series
        .bars
        .iter()
        .zip(ma_short)
        .zip(ma_long)
        .map(|((bar, ma5), ma25)| DerivedRow {
            bar: bar.clone(),
            ma5,
            ma25,
        })
        .collect()
}
