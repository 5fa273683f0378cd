use std::collections::BTreeMap;

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_ecs::types::Cluster;
use aws_sdk_ecs::Client;

use inventory_core::adapter::ServiceAdapter;
use inventory_core::contract::{ClassifiedError, NormalizedRecord, ResourceType};

use crate::adapters::attr;
use crate::classify::classify_sdk_error;

// DescribeClusters accepts at most this many ARNs per call.
const DESCRIBE_BATCH: usize = 100;

pub struct EcsAdapter {
    client: Client,
}

impl EcsAdapter {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl ServiceAdapter for EcsAdapter {
    fn name(&self) -> &'static str {
        "ecs"
    }

    async fn fetch(&self, region: &str) -> Result<Vec<NormalizedRecord>, ClassifiedError> {
        let mut cluster_arns = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let output = self
                .client
                .list_clusters()
                .set_next_token(next_token)
                .send()
                .await
                .map_err(classify_sdk_error)?;

            cluster_arns.extend(output.cluster_arns().iter().cloned());

            next_token = output.next_token().map(str::to_string);
            if next_token.is_none() {
                break;
            }
        }

        let mut records = Vec::new();
        for batch in cluster_arns.chunks(DESCRIBE_BATCH) {
            let output = self
                .client
                .describe_clusters()
                .set_clusters(Some(batch.to_vec()))
                .send()
                .await
                .map_err(classify_sdk_error)?;

            for cluster in output.clusters() {
                records.push(map_cluster(cluster, region));
            }
        }

        Ok(records)
    }
}

fn map_cluster(cluster: &Cluster, region: &str) -> NormalizedRecord {
    let id = cluster.cluster_arn().unwrap_or_default().to_string();
    let name = cluster
        .cluster_name()
        .filter(|name| !name.is_empty())
        .map_or_else(|| id.clone(), str::to_string);

    NormalizedRecord {
        name,
        record_type: ResourceType::ContainerCluster,
        region: region.to_string(),
        status: cluster.status().unwrap_or_default().to_string(),
        created_at: String::new(),
        attributes: BTreeMap::from([
            (
                "serviceCount".to_string(),
                attr(cluster.active_services_count()),
            ),
            ("taskCount".to_string(), attr(cluster.running_tasks_count())),
            (
                "containerInstanceCount".to_string(),
                attr(cluster.registered_container_instances_count()),
            ),
        ]),
        id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_a_cluster_with_counts() {
        let cluster = Cluster::builder()
            .cluster_arn("arn:aws:ecs:eu-west-1:123456789012:cluster/prod")
            .cluster_name("prod")
            .status("ACTIVE")
            .active_services_count(2)
            .running_tasks_count(7)
            .registered_container_instances_count(3)
            .build();

        let record = map_cluster(&cluster, "eu-west-1");
        assert_eq!(record.id, "arn:aws:ecs:eu-west-1:123456789012:cluster/prod");
        assert_eq!(record.name, "prod");
        assert_eq!(record.record_type, ResourceType::ContainerCluster);
        assert_eq!(record.status, "ACTIVE");
        assert_eq!(record.created_at, "");
        assert_eq!(record.attributes["serviceCount"], 2);
        assert_eq!(record.attributes["taskCount"], 7);
        assert_eq!(record.attributes["containerInstanceCount"], 3);
    }

    #[test]
    fn nameless_cluster_falls_back_to_its_arn() {
        let cluster = Cluster::builder()
            .cluster_arn("arn:aws:ecs:us-east-1:123456789012:cluster/x")
            .build();

        let record = map_cluster(&cluster, "us-east-1");
        assert_eq!(record.name, record.id);
        assert_eq!(record.status, "");
    }
}
