use std::collections::BTreeMap;

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_ec2::types::Instance;
use aws_sdk_ec2::Client;

use inventory_core::adapter::ServiceAdapter;
use inventory_core::contract::{ClassifiedError, NormalizedRecord, ResourceType};

use crate::adapters::{attr, iso8601};
use crate::classify::classify_sdk_error;

pub struct Ec2Adapter {
    client: Client,
}

impl Ec2Adapter {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl ServiceAdapter for Ec2Adapter {
    fn name(&self) -> &'static str {
        "ec2"
    }

    async fn fetch(&self, region: &str) -> Result<Vec<NormalizedRecord>, ClassifiedError> {
        let mut records = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let output = self
                .client
                .describe_instances()
                .set_next_token(next_token)
                .send()
                .await
                .map_err(classify_sdk_error)?;

            for reservation in output.reservations() {
                for instance in reservation.instances() {
                    records.push(map_instance(instance, region));
                }
            }

            next_token = output.next_token().map(str::to_string);
            if next_token.is_none() {
                break;
            }
        }

        Ok(records)
    }
}

fn map_instance(instance: &Instance, region: &str) -> NormalizedRecord {
    let id = instance.instance_id().unwrap_or_default().to_string();
    let name = instance
        .tags()
        .iter()
        .find(|tag| tag.key() == Some("Name"))
        .and_then(|tag| tag.value())
        .filter(|value| !value.is_empty())
        .map_or_else(|| id.clone(), str::to_string);

    NormalizedRecord {
        name,
        record_type: ResourceType::Compute,
        region: region.to_string(),
        status: instance
            .state()
            .and_then(|state| state.name())
            .map(|name| name.as_str().to_string())
            .unwrap_or_default(),
        created_at: iso8601(instance.launch_time()),
        attributes: BTreeMap::from([
            (
                "instanceType".to_string(),
                attr(instance.instance_type().map(|ty| ty.as_str()).unwrap_or_default()),
            ),
            (
                "privateIp".to_string(),
                attr(instance.private_ip_address().unwrap_or_default()),
            ),
            (
                "publicIp".to_string(),
                attr(instance.public_ip_address().unwrap_or_default()),
            ),
            (
                "availabilityZone".to_string(),
                attr(
                    instance
                        .placement()
                        .and_then(|placement| placement.availability_zone())
                        .unwrap_or_default(),
                ),
            ),
        ]),
        id,
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_ec2::types::{
        Instance, InstanceState, InstanceStateName, InstanceType, Placement, Tag,
    };
    use aws_smithy_types::date_time::DateTime;

    use super::*;

    #[test]
    fn maps_a_tagged_instance_with_nested_state() {
        let instance = Instance::builder()
            .instance_id("i-0abc123")
            .instance_type(InstanceType::T3Micro)
            .state(
                InstanceState::builder()
                    .name(InstanceStateName::Running)
                    .build(),
            )
            .placement(Placement::builder().availability_zone("eu-west-1a").build())
            .private_ip_address("10.0.0.5")
            .launch_time(DateTime::from_secs(1_700_000_000))
            .tags(Tag::builder().key("Name").value("frontend").build())
            .tags(Tag::builder().key("env").value("prod").build())
            .build();

        let record = map_instance(&instance, "eu-west-1");
        assert_eq!(record.id, "i-0abc123");
        assert_eq!(record.name, "frontend");
        assert_eq!(record.record_type, ResourceType::Compute);
        assert_eq!(record.region, "eu-west-1");
        assert_eq!(record.status, "running");
        assert_eq!(record.created_at, "2023-11-14T22:13:20Z");
        assert_eq!(record.attributes["instanceType"], "t3.micro");
        assert_eq!(record.attributes["privateIp"], "10.0.0.5");
        assert_eq!(record.attributes["publicIp"], "");
        assert_eq!(record.attributes["availabilityZone"], "eu-west-1a");
    }

    #[test]
    fn untagged_instance_falls_back_to_its_id() {
        let instance = Instance::builder().instance_id("i-0noname").build();

        let record = map_instance(&instance, "us-east-1");
        assert_eq!(record.name, "i-0noname");
        assert_eq!(record.status, "");
        assert_eq!(record.created_at, "");
    }
}
