use serde_json::Value;

use kabuview_core::{DisplayRow, DISPLAY_HEADERS};

use crate::error::CliError;

pub fn render_json(value: &Value, pretty: bool) -> Result<(), CliError> {
    let payload = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{payload}");
    Ok(())
}

pub fn render_history_table(rows: &[DisplayRow]) {
    println!("{}", header_line());
    for row in rows {
        println!("{}", format_row(row));
    }
}

fn header_line() -> String {
    let [date, open, high, low, close, volume, ma5, ma25] = DISPLAY_HEADERS;
    format!(
        "{date:<12} {open:>10} {high:>10} {low:>10} {close:>10} {volume:>12} {ma5:>10} {ma25:>10}"
    )
}

fn format_row(row: &DisplayRow) -> String {
    format!(
        "{:<12} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>12} {:>10} {:>10}",
        row.date,
        row.open,
        row.high,
        row.low,
        row.close,
        row.volume.map(|v| v.to_string()).unwrap_or_default(),
        format_optional(row.ma5),
        format_optional(row.ma25),
    )
}

fn format_optional(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> DisplayRow {
        DisplayRow {
            date: String::from("2023-01-06"),
            open: 107.99,
            high: 110.0,
            low: 105.0,
            close: 108.0,
            volume: Some(10_004),
            ma5: Some(103.47),
            ma25: None,
        }
    }

    #[test]
    fn header_and_rows_share_column_layout() {
        let header = header_line();
        let line = format_row(&row());
        assert_eq!(header.split_whitespace().count(), 8);
        // MA25 column is blank for the sample row.
        assert_eq!(line.split_whitespace().count(), 7);
        assert!(line.starts_with("2023-01-06"));
        assert!(line.contains("103.47"));
    }

    #[test]
    fn blank_cells_for_undefined_values() {
        assert_eq!(format_optional(None), "");
        assert_eq!(format_optional(Some(103.4736)), "103.47");
    }
}
