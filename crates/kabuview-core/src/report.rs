//! Presentation layer: display rows, column labels, and CSV export.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analytics::DerivedRow;
use crate::{DateRange, Ticker};

/// Column labels in display order. Adjusted close is dropped before
/// this point and never reaches the table.
pub const DISPLAY_HEADERS: [&str; 8] = [
    "Date", "Open", "High", "Low", "Close", "Volume", "MA5", "MA25",
];

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Errors raised while serializing the display table.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("csv write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("csv buffer error: {0}")]
    Buffer(String),
}

/// One display-ready table row: labels applied, numerics rounded to
/// 2 decimal places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Open")]
    pub open: f64,
    #[serde(rename = "High")]
    pub high: f64,
    #[serde(rename = "Low")]
    pub low: f64,
    #[serde(rename = "Close")]
    pub close: f64,
    #[serde(rename = "Volume")]
    pub volume: Option<u64>,
    #[serde(rename = "MA5")]
    pub ma5: Option<f64>,
    #[serde(rename = "MA25")]
    pub ma25: Option<f64>,
}

/// Round a display value to 2 decimal places.
pub fn round_display(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Build display rows sorted by date descending. The stored series
/// keeps its ascending order; the sort is display-only.
pub fn display_rows(derived: &[DerivedRow]) -> Vec<DisplayRow> {
    derived
        .iter()
        .rev()
        .map(|row| DisplayRow {
            date: row.bar.date.format_iso(),
            open: round_display(row.bar.open),
            high: round_display(row.bar.high),
            low: round_display(row.bar.low),
            close: round_display(row.bar.close),
            volume: row.bar.volume,
            ma5: row.ma5.map(round_display),
            ma25: row.ma25.map(round_display),
        })
        .collect()
}

/// Serialize display rows to CSV: UTF-8 with byte-order mark, header
/// row, blank cells for undefined values.
pub fn to_csv(rows: &[DisplayRow]) -> Result<Vec<u8>, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(DISPLAY_HEADERS)?;

    for row in rows {
        writer.write_record([
            row.date.clone(),
            format!("{:.2}", row.open),
            format!("{:.2}", row.high),
            format!("{:.2}", row.low),
            format!("{:.2}", row.close),
            row.volume.map(|v| v.to_string()).unwrap_or_default(),
            row.ma5.map(|v| format!("{v:.2}")).unwrap_or_default(),
            row.ma25.map(|v| format!("{v:.2}")).unwrap_or_default(),
        ])?;
    }

    let body = writer
        .into_inner()
        .map_err(|e| ReportError::Buffer(e.to_string()))?;

    let mut out = Vec::with_capacity(UTF8_BOM.len() + body.len());
    out.extend_from_slice(&UTF8_BOM);
    out.extend_from_slice(&body);
    Ok(out)
}

/// Download filename for an export: `{ticker}_{start}_to_{end}.csv`.
pub fn csv_filename(ticker: &Ticker, range: &DateRange) -> String {
    format!("{}_{}_to_{}.csv", ticker, range.start(), range.end())
}
