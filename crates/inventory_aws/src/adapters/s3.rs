use std::collections::BTreeMap;

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::types::Bucket;
use aws_sdk_s3::Client;

use inventory_core::adapter::ServiceAdapter;
use inventory_core::contract::{ClassifiedError, NormalizedRecord, ResourceType};

use crate::adapters::iso8601;
use crate::classify::classify_sdk_error;

pub struct S3Adapter {
    client: Client,
}

impl S3Adapter {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl ServiceAdapter for S3Adapter {
    fn name(&self) -> &'static str {
        "s3"
    }

    async fn fetch(&self, region: &str) -> Result<Vec<NormalizedRecord>, ClassifiedError> {
        let mut records = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let output = self
                .client
                .list_buckets()
                .set_continuation_token(continuation_token)
                .send()
                .await
                .map_err(classify_sdk_error)?;

            for bucket in output.buckets() {
                records.push(map_bucket(bucket, region));
            }

            continuation_token = output.continuation_token().map(str::to_string);
            if continuation_token.is_none() {
                break;
            }
        }

        Ok(records)
    }
}

fn map_bucket(bucket: &Bucket, region: &str) -> NormalizedRecord {
    let id = bucket.name().unwrap_or_default().to_string();

    NormalizedRecord {
        name: id.clone(),
        record_type: ResourceType::ObjectStore,
        region: region.to_string(),
        status: String::new(),
        created_at: iso8601(bucket.creation_date()),
        attributes: BTreeMap::new(),
        id,
    }
}
