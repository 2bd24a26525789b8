pub mod export;
pub mod history;
pub mod summary;

use kabuview_core::{DateRange, Ticker};

use crate::cli::QueryArgs;
use crate::error::CliError;

/// Parse and validate the shared (ticker, start, end) arguments.
/// Range errors stop the command before any fetch.
pub fn parse_query(args: &QueryArgs) -> Result<(Ticker, DateRange), CliError> {
    let ticker = Ticker::parse(&args.ticker)?;
    let range = DateRange::parse(&args.start, &args.end)?;
    Ok((ticker, range))
}
