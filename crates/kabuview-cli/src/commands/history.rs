use kabuview_core::HistoryService;

use crate::cli::{Cli, HistoryArgs, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::parse_query;

pub async fn run(args: &HistoryArgs, service: &HistoryService, cli: &Cli) -> Result<(), CliError> {
    let (ticker, range) = parse_query(&args.query)?;
    let dashboard = service.dashboard(&ticker, &range).await?;

    let rows = match args.limit {
        Some(limit) => &dashboard.rows[..limit.min(dashboard.rows.len())],
        None => &dashboard.rows[..],
    };

    match cli.format {
        OutputFormat::Json => output::render_json(&serde_json::to_value(rows)?, cli.pretty)?,
        OutputFormat::Table => {
            if let Some(warning) = &dashboard.warning {
                eprintln!("warning: {warning}");
            }
            output::render_history_table(rows);
        }
    }

    Ok(())
}
