use property_reconciler::config::Config;
use property_reconciler::models::ReconciliationReport;
use property_reconciler::reconcile::assemble_all;
use property_reconciler::sources::{JsonFileSource, PayloadSource};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    info!("Property Reconciler");
    info!("Input: {}", config.input_path.display());

    let source = JsonFileSource::new(&config.input_path);
    let payloads = source.fetch().await?;
    info!("Loaded {} raw payloads from {}", payloads.len(), source.source_name());

    let results = assemble_all(&payloads);

    for result in &results {
        for warning in &result.warnings {
            warn!(record_id = %result.value.id, "{}", warning);
        }
    }

    let inactive = results
        .iter()
        .filter(|r| !r.value.status.is_active())
        .count();
    info!("Reconciled {} records ({} inactive)", results.len(), inactive);

    let report = ReconciliationReport::new(source.source_name(), results);

    // Save each record to a separate file if requested
    if let Some(dir) = &config.records_dir {
        tokio::fs::create_dir_all(dir).await?;

        let stems = report.record_file_stems();
        for (i, (record, stem)) in report.records.iter().zip(&stems).enumerate() {
            if *stem != ReconciliationReport::file_stem(record, i) {
                warn!(record_id = %record.id, "Duplicate record id, saving as {}.json", stem);
            }
            let record_json = serde_json::to_string_pretty(record)?;
            tokio::fs::write(dir.join(format!("{}.json", stem)), record_json).await?;
        }

        info!("Saved {} record files to {}", report.records.len(), dir.display());
    }

    let json = serde_json::to_string_pretty(&report)?;
    tokio::fs::write(&config.output_path, json).await?;
    info!(
        "Saved report to {} ({} warnings)",
        config.output_path.display(),
        report.warning_count
    );

    Ok(())
}
