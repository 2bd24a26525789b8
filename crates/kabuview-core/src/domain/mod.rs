//! Domain types for daily price history.
//!
//! All types validate their invariants at construction time:
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Ticker`] | Validated instrument ticker |
//! | [`TradingDate`] | `YYYY-MM-DD` calendar date |
//! | [`DateRange`] | Query period with `start < end` |
//! | [`Bar`] | Daily OHLCV record |
//! | [`PriceSeries`] | Strictly date-ordered bar sequence |

mod date;
mod models;
mod ticker;

pub use date::{DateRange, TradingDate};
pub use models::{Bar, PriceSeries};
pub use ticker::Ticker;
