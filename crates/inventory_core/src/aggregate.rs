use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{info, warn};

use crate::adapter::AdapterRegistry;
use crate::contract::{AdapterOutcome, ClassifiedError};
use crate::report::InventoryReport;

pub const DEFAULT_ADAPTER_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct AggregateOptions {
    /// Independent time budget applied to each adapter's fetch.
    pub adapter_timeout: Duration,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            adapter_timeout: DEFAULT_ADAPTER_TIMEOUT,
        }
    }
}

/// Runs every registered adapter against the same resolved region and
/// assembles the combined report.
///
/// Adapters are dispatched as independent tasks before any is awaited, so
/// total latency is bounded by the slowest single adapter. Each task is
/// given its own time budget; an elapsed budget abandons the fetch (the
/// detached task runs to its own completion and its late result is
/// discarded) and records a `Timeout` outcome. No adapter failure, panic, or
/// timeout affects any other adapter or the call itself: `aggregate` always
/// returns one outcome per registered adapter.
pub async fn aggregate(
    registry: &AdapterRegistry,
    region: &str,
    options: &AggregateOptions,
) -> InventoryReport {
    let budget = options.adapter_timeout;
    let mut pending = Vec::with_capacity(registry.len());

    for adapter in registry.iter() {
        let adapter = Arc::clone(adapter);
        let name = adapter.name();
        let region = region.to_string();

        let fetch = tokio::spawn(async move { adapter.fetch(&region).await });
        let outcome = tokio::spawn(async move {
            match timeout(budget, fetch).await {
                Ok(Ok(Ok(records))) => AdapterOutcome::success(name, records),
                Ok(Ok(Err(error))) => AdapterOutcome::failure(name, error),
                Ok(Err(join_error)) => AdapterOutcome::failure(
                    name,
                    ClassifiedError::Unknown(format!("adapter task failed: {join_error}")),
                ),
                Err(_) => AdapterOutcome::failure(
                    name,
                    ClassifiedError::Timeout(format!(
                        "fetch did not complete within the {}ms adapter budget",
                        budget.as_millis()
                    )),
                ),
            }
        });
        pending.push((name, outcome));
    }

    let mut outcomes = Vec::with_capacity(pending.len());
    for (name, handle) in pending {
        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(join_error) => AdapterOutcome::failure(
                name,
                ClassifiedError::Unknown(format!("adapter task failed: {join_error}")),
            ),
        };
        match &outcome.error {
            None => info!(
                adapter = outcome.adapter_name.as_str(),
                records = outcome.records.len(),
                "adapter completed"
            ),
            Some(error) => warn!(
                adapter = outcome.adapter_name.as_str(),
                kind = error.kind(),
                error = %error,
                "adapter failed"
            ),
        }
        outcomes.push(outcome);
    }

    InventoryReport::assemble(outcomes)
}
