//! Aggregation engine for the cloud resource inventory.
//!
//! This crate owns the normalized record contract, the adapter seam, the
//! fault-isolating orchestration, and report assembly. It intentionally
//! excludes AWS SDK and credential concerns; see `crates/inventory_aws` for
//! the concrete backend adapters.

pub mod adapter;
pub mod aggregate;
pub mod contract;
pub mod report;
