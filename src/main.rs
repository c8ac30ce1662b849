//! txn-features entrypoint: one batch run over a PaySim CSV feed.
//! Reads the feed, derives rolling per-account features, writes the
//! transformed export and a JSON summary line on stdout.

use chrono::Utc;
use std::path::PathBuf;
use tracing::{info, warn};
use txn_features::{
    config::Config,
    features::FeaturePipeline,
    logging::{RunSummary, StructuredLogger},
    paysim::{self, PaySimTransform, RandomOffices},
};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config_path = std::env::var("TXN_FEATURES_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.json"));
    let config = Config::load(&config_path);

    StructuredLogger::init(&config.log);

    info!(
        input = %config.input_path.display(),
        output = %config.output_path.display(),
        parallel = config.features.parallel,
        "txn-features starting"
    );

    let records = paysim::read_file(&config.input_path)?;
    if records.is_empty() {
        warn!("input feed is empty; writing header-only export");
    }

    let pipeline = FeaturePipeline::new(config.features.clone());
    let offices = RandomOffices::from_config(config.paysim.office_seed);
    let mut transform = PaySimTransform::new(config.paysim.clone(), pipeline, offices);
    let out = transform.transform(&records);

    paysim::write_file(&config.output_path, &out.rows)?;

    let input = config.input_path.display().to_string();
    let output = config.output_path.display().to_string();
    let summary = RunSummary {
        ts: Utc::now().to_rfc3339(),
        input: &input,
        output: &output,
        records: records.len(),
        enriched: out.rows.len(),
        rejected: out.rejected.len(),
        accounts: out.accounts,
        first_rejection: out.rejected.first().map(ToString::to_string),
    };
    StructuredLogger::emit_json(&summary, &mut std::io::stdout().lock())?;

    Ok(())
}
