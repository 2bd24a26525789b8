use kabuview_core::{HistoryService, TradingDate};

use crate::cli::ExportArgs;
use crate::error::CliError;

use super::parse_query;

pub async fn run(args: &ExportArgs, service: &HistoryService) -> Result<(), CliError> {
    let (ticker, range) = parse_query(&args.query)?;

    if let Some(warning) = range.future_end_warning(TradingDate::today()) {
        eprintln!("warning: {warning}");
    }

    let export = service.export_csv(&ticker, &range).await?;

    let path = args
        .out
        .clone()
        .unwrap_or_else(|| std::path::PathBuf::from(&export.filename));

    std::fs::write(&path, &export.bytes)?;
    println!("wrote {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Arc;

    use kabuview_core::{
        Bar, HistoryCache, HistoryRequest, HistoryResult, MarketDataSource, PriceSeries,
        SourceError, TradingDate,
    };

    use super::*;
    use crate::cli::QueryArgs;

    struct FakeSource;

    impl MarketDataSource for FakeSource {
        fn history<'a>(
            &'a self,
            req: HistoryRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HistoryResult, SourceError>> + Send + 'a>> {
            Box::pin(async move {
                let bars = [100.0, 102.0]
                    .iter()
                    .enumerate()
                    .map(|(i, &close)| {
                        let date = TradingDate::parse(&format!("2023-01-{:02}", i + 2))
                            .expect("valid date");
                        Bar::new(date, close, close + 1.0, close - 1.0, close, Some(100))
                            .expect("valid bar")
                    })
                    .collect();

                Ok(HistoryResult {
                    series: PriceSeries::new(req.ticker, bars).expect("valid series"),
                    company_name: String::from("Fake Co"),
                })
            })
        }
    }

    #[tokio::test]
    async fn writes_bom_prefixed_csv_even_with_future_end_date() {
        let service = HistoryService::new(Arc::new(FakeSource), HistoryCache::disabled());
        let path = std::env::temp_dir().join(format!("kabuview_export_{}.csv", std::process::id()));
        let args = ExportArgs {
            query: QueryArgs {
                ticker: String::from("FAKE"),
                start: String::from("2023-01-01"),
                // Beyond any plausible test-run date, so the warning path runs.
                end: String::from("2999-01-01"),
            },
            out: Some(path.clone()),
        };

        run(&args, &service).await.expect("must export");

        let bytes = std::fs::read(&path).expect("file written");
        assert!(bytes.starts_with(&[0xEF, 0xBB, 0xBF]));
        assert!(String::from_utf8_lossy(&bytes).contains("2023-01-03"));

        std::fs::remove_file(&path).expect("cleanup");
    }
}
