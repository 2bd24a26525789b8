use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::ValidationError;

const ISO_DATE: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Calendar date keying one daily bar, formatted as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TradingDate(Date);

impl TradingDate {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Date::parse(input.trim(), ISO_DATE)
            .map(Self)
            .map_err(|_| ValidationError::InvalidDate {
                value: input.to_owned(),
            })
    }

    /// Today's date in UTC, used for the future-end-date warning.
    pub fn today() -> Self {
        Self(OffsetDateTime::now_utc().date())
    }

    /// Date of a provider unix timestamp, interpreted in UTC.
    pub fn from_unix_timestamp(ts: i64) -> Result<Self, ValidationError> {
        OffsetDateTime::from_unix_timestamp(ts)
            .map(|dt| Self(dt.date()))
            .map_err(|_| ValidationError::InvalidDate {
                value: ts.to_string(),
            })
    }

    /// Unix seconds at UTC midnight, used for provider range parameters.
    pub fn unix_midnight(self) -> i64 {
        self.0.midnight().assume_utc().unix_timestamp()
    }

    pub fn format_iso(self) -> String {
        self.0
            .format(ISO_DATE)
            .expect("TradingDate must be ISO formattable")
    }

    pub fn into_inner(self) -> Date {
        self.0
    }
}

impl From<Date> for TradingDate {
    fn from(value: Date) -> Self {
        Self(value)
    }
}

impl Display for TradingDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_iso())
    }
}

impl Serialize for TradingDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_iso())
    }
}

impl<'de> Deserialize<'de> for TradingDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

/// Validated query period: `start` is strictly before `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: TradingDate,
    end: TradingDate,
}

impl DateRange {
    /// Build a range, rejecting `start >= end` before any fetch is attempted.
    pub fn new(start: TradingDate, end: TradingDate) -> Result<Self, ValidationError> {
        if start >= end {
            return Err(ValidationError::EmptyDateRange {
                start: start.format_iso(),
                end: end.format_iso(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        Self::new(TradingDate::parse(start)?, TradingDate::parse(end)?)
    }

    pub const fn start(&self) -> TradingDate {
        self.start
    }

    pub const fn end(&self) -> TradingDate {
        self.end
    }

    /// Non-blocking warning when the end date lies beyond `today`.
    pub fn future_end_warning(&self, today: TradingDate) -> Option<String> {
        if self.end > today {
            Some(format!(
                "end date {} is in the future; rows stop at the latest trading day",
                self.end
            ))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_date() {
        let date = TradingDate::parse("2023-01-10").expect("must parse");
        assert_eq!(date.format_iso(), "2023-01-10");
    }

    #[test]
    fn rejects_malformed_date() {
        let err = TradingDate::parse("10/01/2023").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidDate { .. }));
    }

    #[test]
    fn rejects_start_not_before_end() {
        let err = DateRange::parse("2023-01-10", "2023-01-10").expect_err("must fail");
        assert!(matches!(err, ValidationError::EmptyDateRange { .. }));

        let err = DateRange::parse("2023-02-01", "2023-01-01").expect_err("must fail");
        assert!(matches!(err, ValidationError::EmptyDateRange { .. }));
    }

    #[test]
    fn warns_on_future_end_date() {
        let range = DateRange::parse("2023-01-01", "2023-03-01").expect("valid range");
        let today = TradingDate::parse("2023-02-01").expect("valid date");
        assert!(range.future_end_warning(today).is_some());

        let later = TradingDate::parse("2023-03-01").expect("valid date");
        assert!(range.future_end_warning(later).is_none());
    }

    #[test]
    fn unix_midnight_is_utc() {
        let date = TradingDate::parse("1970-01-02").expect("must parse");
        assert_eq!(date.unix_midnight(), 86_400);
    }
}
