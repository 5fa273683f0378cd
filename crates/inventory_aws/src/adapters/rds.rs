use std::collections::BTreeMap;

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_rds::types::DbInstance;
use aws_sdk_rds::Client;

use inventory_core::adapter::ServiceAdapter;
use inventory_core::contract::{ClassifiedError, NormalizedRecord, ResourceType};

use crate::adapters::{attr, iso8601};
use crate::classify::classify_sdk_error;

pub struct RdsAdapter {
    client: Client,
}

impl RdsAdapter {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl ServiceAdapter for RdsAdapter {
    fn name(&self) -> &'static str {
        "rds"
    }

    async fn fetch(&self, region: &str) -> Result<Vec<NormalizedRecord>, ClassifiedError> {
        let mut records = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let output = self
                .client
                .describe_db_instances()
                .set_marker(marker)
                .send()
                .await
                .map_err(classify_sdk_error)?;

            for db_instance in output.db_instances() {
                records.push(map_db_instance(db_instance, region));
            }

            marker = output.marker().map(str::to_string);
            if marker.is_none() {
                break;
            }
        }

        Ok(records)
    }
}

fn map_db_instance(db_instance: &DbInstance, region: &str) -> NormalizedRecord {
    let id = db_instance
        .db_instance_identifier()
        .unwrap_or_default()
        .to_string();
    let size = attr(db_instance.allocated_storage())
        .as_i64()
        .map(|gib| gib.to_string())
        .unwrap_or_default();

    NormalizedRecord {
        name: id.clone(),
        record_type: ResourceType::ManagedDatabase,
        region: region.to_string(),
        status: db_instance
            .db_instance_status()
            .unwrap_or_default()
            .to_string(),
        created_at: iso8601(db_instance.instance_create_time()),
        attributes: BTreeMap::from([
            (
                "engine".to_string(),
                attr(db_instance.engine().unwrap_or_default()),
            ),
            ("size".to_string(), attr(size)),
            (
                "endpoint".to_string(),
                attr(
                    db_instance
                        .endpoint()
                        .and_then(|endpoint| endpoint.address())
                        .unwrap_or_default(),
                ),
            ),
        ]),
        id,
    }
}
