use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::contract::{AdapterOutcome, NormalizedRecord, ResourceType};

/// One point-in-time snapshot: records grouped by resource type plus the
/// ordered per-adapter outcomes. The outcome sequence lets a caller tell
/// "domain has zero resources" apart from "domain failed to report".
/// Assembled once per aggregation call and immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct InventoryReport {
    groups: BTreeMap<ResourceType, Vec<NormalizedRecord>>,
    outcomes: Vec<AdapterOutcome>,
}

impl InventoryReport {
    /// Merges outcome records into the type-keyed grouping, preserving each
    /// adapter's internal ordering. No re-sorting, no deduplication, no
    /// cross-referencing across adapters.
    pub fn assemble(outcomes: Vec<AdapterOutcome>) -> Self {
        let mut groups: BTreeMap<ResourceType, Vec<NormalizedRecord>> = BTreeMap::new();
        for outcome in &outcomes {
            for record in &outcome.records {
                groups
                    .entry(record.record_type)
                    .or_default()
                    .push(record.clone());
            }
        }
        Self { groups, outcomes }
    }

    pub fn records(&self, resource_type: ResourceType) -> &[NormalizedRecord] {
        self.groups
            .get(&resource_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn groups(&self) -> &BTreeMap<ResourceType, Vec<NormalizedRecord>> {
        &self.groups
    }

    pub fn outcomes(&self) -> &[AdapterOutcome] {
        &self.outcomes
    }

    pub fn failures(&self) -> impl Iterator<Item = &AdapterOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.is_failure())
    }

    pub fn total_records(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Serialized response shape: one entry per resource type key, every key
    /// always present, each holding that type's records as flat field maps.
    pub fn to_wire(&self) -> Value {
        let mut wire = Map::new();
        for resource_type in ResourceType::ALL {
            let records = self.records(resource_type);
            wire.insert(
                resource_type.wire_key().to_string(),
                serde_json::to_value(records).expect("normalized records should serialize"),
            );
        }
        Value::Object(wire)
    }
}
