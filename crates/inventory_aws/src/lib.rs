//! AWS backend adapters and runtime wiring for the inventory aggregation
//! engine. Each adapter owns its own SDK client and converts one domain's
//! listings into normalized records; orchestration and the report contract
//! live in `inventory_core`.

pub mod adapters;
pub mod classify;
pub mod region;

use std::sync::Arc;

use aws_config::{BehaviorVersion, Region, SdkConfig};

use inventory_core::adapter::AdapterRegistry;
use inventory_core::aggregate::{aggregate, AggregateOptions};
use inventory_core::report::InventoryReport;

use crate::adapters::{
    AlbAdapter, Ec2Adapter, EcsAdapter, IamAdapter, RdsAdapter, Route53Adapter, S3Adapter,
};

/// All seven backend domains, in the stable reporting order.
pub fn default_registry(config: &SdkConfig) -> AdapterRegistry {
    AdapterRegistry::new()
        .with(Arc::new(Ec2Adapter::new(config)))
        .with(Arc::new(RdsAdapter::new(config)))
        .with(Arc::new(IamAdapter::new(config)))
        .with(Arc::new(EcsAdapter::new(config)))
        .with(Arc::new(S3Adapter::new(config)))
        .with(Arc::new(AlbAdapter::new(config)))
        .with(Arc::new(Route53Adapter::new(config)))
}

/// One snapshot: resolve the region once, hand the same value to every
/// adapter, and aggregate. Partial failure is reflected in the report's
/// outcomes, never as an error from this call.
pub async fn collect_inventory(
    region_override: Option<&str>,
    options: &AggregateOptions,
) -> InventoryReport {
    let region = region::resolve_region(region_override).await;
    let config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.clone()))
        .load()
        .await;
    let registry = default_registry(&config);
    aggregate(&registry, &region, options).await
}
