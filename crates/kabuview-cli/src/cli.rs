use clap::{Args, Parser, Subcommand, ValueEnum};

/// Output rendering for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "kabuview")]
#[command(about = "Fetch and summarize historical stock prices", version)]
pub struct Cli {
    /// Output format for command results.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Bypass the in-memory result cache.
    #[arg(long, global = true)]
    pub no_cache: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show summary statistics for a ticker and period.
    Summary(QueryArgs),
    /// Show the daily history table, newest first.
    History(HistoryArgs),
    /// Write the history table to a CSV file.
    Export(ExportArgs),
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Instrument ticker, e.g. AAPL or 7203.T.
    pub ticker: String,

    /// Period start date (YYYY-MM-DD, inclusive).
    #[arg(long)]
    pub start: String,

    /// Period end date (YYYY-MM-DD, exclusive).
    #[arg(long)]
    pub end: String,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Print at most this many rows.
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Output path; defaults to {ticker}_{start}_to_{end}.csv in the
    /// current directory.
    #[arg(long)]
    pub out: Option<std::path::PathBuf>,
}
