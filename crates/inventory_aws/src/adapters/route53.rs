use std::collections::BTreeMap;

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_route53::types::{HostedZone, ResourceRecordSet, RrType};
use aws_sdk_route53::Client;

use inventory_core::adapter::ServiceAdapter;
use inventory_core::contract::{ClassifiedError, NormalizedRecord, ResourceType, GLOBAL_REGION};

use crate::adapters::attr;
use crate::classify::classify_sdk_error;

pub struct Route53Adapter {
    client: Client,
}

impl Route53Adapter {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }

    async fn list_zones(&self) -> Result<Vec<HostedZone>, ClassifiedError> {
        let mut zones = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let output = self
                .client
                .list_hosted_zones()
                .set_marker(marker)
                .send()
                .await
                .map_err(classify_sdk_error)?;

            zones.extend(output.hosted_zones().iter().cloned());

            if !output.is_truncated() {
                break;
            }
            marker = output.next_marker().map(str::to_string);
        }

        Ok(zones)
    }

    async fn list_record_sets(&self, zone: &HostedZone) -> Result<Vec<NormalizedRecord>, ClassifiedError> {
        let mut records = Vec::new();
        let mut start_name: Option<String> = None;
        let mut start_type: Option<RrType> = None;
        let mut start_identifier: Option<String> = None;

        loop {
            let output = self
                .client
                .list_resource_record_sets()
                .hosted_zone_id(zone.id())
                .set_start_record_name(start_name)
                .set_start_record_type(start_type)
                .set_start_record_identifier(start_identifier)
                .send()
                .await
                .map_err(classify_sdk_error)?;

            for record_set in output.resource_record_sets() {
                records.push(map_record_set(zone, record_set));
            }

            if !output.is_truncated() {
                break;
            }
            start_name = output.next_record_name().map(str::to_string);
            start_type = output.next_record_type().cloned();
            start_identifier = output.next_record_identifier().map(str::to_string);
        }

        Ok(records)
    }
}

#[async_trait]
impl ServiceAdapter for Route53Adapter {
    fn name(&self) -> &'static str {
        "route53"
    }

    // DNS is region-less; records are labeled "global".
    async fn fetch(&self, _region: &str) -> Result<Vec<NormalizedRecord>, ClassifiedError> {
        let mut records = Vec::new();
        for zone in self.list_zones().await? {
            records.extend(self.list_record_sets(&zone).await?);
        }
        Ok(records)
    }
}

fn map_record_set(zone: &HostedZone, record_set: &ResourceRecordSet) -> NormalizedRecord {
    let record_type = record_set.r#type().as_str();
    let first_value = record_set
        .resource_records()
        .first()
        .map(|resource_record| resource_record.value())
        .unwrap_or_default();

    NormalizedRecord {
        id: format!("{}:{}:{}", zone.id(), record_set.name(), record_type),
        name: record_set.name().to_string(),
        record_type: ResourceType::DnsRecord,
        region: GLOBAL_REGION.to_string(),
        status: String::new(),
        created_at: String::new(),
        attributes: BTreeMap::from([
            ("recordType".to_string(), attr(record_type)),
            ("recordValue".to_string(), attr(first_value)),
            ("ttl".to_string(), attr(record_set.ttl())),
            ("zoneName".to_string(), attr(zone.name())),
        ]),
    }
}
