use aicli_core::batch::{BatchProcessor, BatchSummary};
use aicli_core::cli::args::{BatchTarget, ProcessDataArgs};
use aicli_core::config::AicliConfig;
use anyhow::{Context, Result};
use console::style;

use super::client_for;

/// Handle the process-data command
pub async fn handle_process_data_command(config: &AicliConfig, args: &ProcessDataArgs) -> Result<()> {
    let target = args.target()?;
    let client = client_for(config)?;
    let processor = BatchProcessor::new(
        client.as_ref(),
        args.prompt.as_deref(),
        config.batch.row_timeout(),
    )
    .context("Failed to parse the global prompt template")?;

    match target {
        BatchTarget::Csv { input, output } => {
            let summary = processor.process_csv_file(&input, &output).await?;
            report(&summary, &output.display().to_string());
        }
        BatchTarget::Db { path, table } => {
            let summary = processor.process_db_file(&path, &table).await?;
            report(&summary, &format!("{}:{table}", path.display()));
        }
    }
    Ok(())
}

fn report(summary: &BatchSummary, destination: &str) {
    println!(
        "{} {} rows processed ({} succeeded, {} failed, {} skipped) -> {destination}",
        style("Done:").green().bold(),
        summary.processed,
        summary.succeeded,
        summary.failed,
        summary.skipped,
    );
}
