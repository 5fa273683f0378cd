use chrono::Utc;
use tracing_subscriber::EnvFilter;

use inventory_core::aggregate::AggregateOptions;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let region_override = std::env::args().nth(1);
    let started_at = Utc::now();

    let report =
        inventory_aws::collect_inventory(region_override.as_deref(), &AggregateOptions::default())
            .await;

    for outcome in report.failures() {
        if let Some(error) = &outcome.error {
            tracing::warn!(
                adapter = outcome.adapter_name.as_str(),
                kind = error.kind(),
                error = %error,
                "domain failed to report"
            );
        }
    }
    tracing::info!(
        total_records = report.total_records(),
        failed_adapters = report.failures().count(),
        started_at = %started_at.to_rfc3339(),
        "snapshot complete"
    );

    let wire = report.to_wire();
    println!(
        "{}",
        serde_json::to_string_pretty(&wire).expect("wire report should serialize")
    );
}
