use kabuview_core::HistoryService;

use crate::cli::{Cli, OutputFormat, QueryArgs};
use crate::error::CliError;
use crate::output;

use super::parse_query;

pub async fn run(args: &QueryArgs, service: &HistoryService, cli: &Cli) -> Result<(), CliError> {
    let (ticker, range) = parse_query(args)?;
    let dashboard = service.dashboard(&ticker, &range).await?;

    match cli.format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "ticker": dashboard.ticker,
                "company_name": dashboard.company_name,
                "summary": dashboard.summary,
                "row_count": dashboard.row_count,
                "warning": dashboard.warning,
            });
            output::render_json(&value, cli.pretty)?;
        }
        OutputFormat::Table => {
            if let Some(warning) = &dashboard.warning {
                eprintln!("warning: {warning}");
            }
            println!("{} ({})", dashboard.company_name, dashboard.ticker);
            println!("latest close : {:.2}", dashboard.summary.latest_close);
            println!(
                "change       : {:+.2} ({:+.2}%)",
                dashboard.summary.change, dashboard.summary.change_pct
            );
            println!("period high  : {:.2}", dashboard.summary.period_high);
            println!("period low   : {:.2}", dashboard.summary.period_low);
            println!("rows         : {}", dashboard.row_count);
        }
    }

    Ok(())
}
