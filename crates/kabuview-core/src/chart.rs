//! Declarative chart payloads handed to the browser-side renderer.
//!
//! Nothing here draws anything: both payloads are plain column-aligned
//! data, serialized to JSON for whichever charting library consumes them.

use serde::{Deserialize, Serialize};

use crate::analytics::DerivedRow;

/// Candlestick chart with a volume sub-chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandlestickChart {
    pub title: String,
    pub dates: Vec<String>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub volume: Vec<Option<u64>>,
}

/// Closing price with MA5/MA25 overlays; `null` where a window is unfilled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayChart {
    pub title: String,
    pub dates: Vec<String>,
    pub close: Vec<f64>,
    pub ma5: Vec<Option<f64>>,
    pub ma25: Vec<Option<f64>>,
}

/// Build the candlestick+volume payload in ascending-date order.
pub fn candlestick_chart(title: impl Into<String>, rows: &[DerivedRow]) -> CandlestickChart {
    CandlestickChart {
        title: title.into(),
        dates: rows.iter().map(|r| r.bar.date.format_iso()).collect(),
        open: rows.iter().map(|r| r.bar.open).collect(),
        high: rows.iter().map(|r| r.bar.high).collect(),
        low: rows.iter().map(|r| r.bar.low).collect(),
        close: rows.iter().map(|r| r.bar.close).collect(),
        volume: rows.iter().map(|r| r.bar.volume).collect(),
    }
}

/// Build the close+MA overlay payload in ascending-date order.
pub fn overlay_chart(title: impl Into<String>, rows: &[DerivedRow]) -> OverlayChart {
    OverlayChart {
        title: title.into(),
        dates: rows.iter().map(|r| r.bar.date.format_iso()).collect(),
        close: rows.iter().map(|r| r.bar.close).collect(),
        ma5: rows.iter().map(|r| r.ma5).collect(),
        ma25: rows.iter().map(|r| r.ma25).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::derive_rows;
    use crate::{Bar, PriceSeries, Ticker, TradingDate};

    fn rows() -> Vec<DerivedRow> {
        let ticker = Ticker::parse("TEST").expect("valid ticker");
        let bars = [100.0, 102.0, 101.0, 105.0, 107.0]
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                let date = TradingDate::parse(&format!("2023-01-{:02}", i + 2))
                    .expect("valid date");
                Bar::new(date, close, close + 1.0, close - 1.0, close, Some(500))
                    .expect("valid bar")
            })
            .collect();
        derive_rows(&PriceSeries::new(ticker, bars).expect("valid series"))
    }

    #[test]
    fn columns_stay_aligned() {
        let chart = candlestick_chart("Test Co (TEST)", &rows());
        assert_eq!(chart.dates.len(), 5);
        assert_eq!(chart.open.len(), chart.close.len());
        assert_eq!(chart.volume.len(), chart.dates.len());
        assert_eq!(chart.dates[0], "2023-01-02");
        assert_eq!(chart.close[4], 107.0);
    }

    #[test]
    fn overlay_carries_nulls_for_unfilled_windows() {
        let chart = overlay_chart("Close and moving averages", &rows());
        assert_eq!(chart.ma5[..4], [None, None, None, None]);
        assert_eq!(chart.ma5[4], Some(103.0));
        assert!(chart.ma25.iter().all(Option::is_none));

        let json = serde_json::to_value(&chart).expect("must serialize");
        assert!(json["ma5"][0].is_null());
        assert_eq!(json["ma5"][4], 103.0);
    }
}
