use std::collections::BTreeMap;

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_elasticloadbalancingv2::types::{LoadBalancer, LoadBalancerTypeEnum};
use aws_sdk_elasticloadbalancingv2::Client;

use inventory_core::adapter::ServiceAdapter;
use inventory_core::contract::{ClassifiedError, NormalizedRecord, ResourceType};

use crate::adapters::{attr, iso8601};
use crate::classify::classify_sdk_error;

pub struct AlbAdapter {
    client: Client,
}

impl AlbAdapter {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl ServiceAdapter for AlbAdapter {
    fn name(&self) -> &'static str {
        "elbv2"
    }

    async fn fetch(&self, region: &str) -> Result<Vec<NormalizedRecord>, ClassifiedError> {
        let mut records = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let output = self
                .client
                .describe_load_balancers()
                .set_marker(marker)
                .send()
                .await
                .map_err(classify_sdk_error)?;

            for load_balancer in output.load_balancers() {
                if is_application(load_balancer) {
                    records.push(map_load_balancer(load_balancer, region));
                }
            }

            marker = output.next_marker().map(str::to_string);
            if marker.is_none() {
                break;
            }
        }

        Ok(records)
    }
}

// Inventory covers application load balancers only; network and gateway
// balancers are a different listing domain.
fn is_application(load_balancer: &LoadBalancer) -> bool {
    matches!(
        load_balancer.r#type(),
        Some(LoadBalancerTypeEnum::Application)
    )
}

fn map_load_balancer(load_balancer: &LoadBalancer, region: &str) -> NormalizedRecord {
    let id = load_balancer
        .load_balancer_arn()
        .unwrap_or_default()
        .to_string();
    let name = load_balancer
        .load_balancer_name()
        .filter(|name| !name.is_empty())
        .map_or_else(|| id.clone(), str::to_string);

    NormalizedRecord {
        name,
        record_type: ResourceType::LoadBalancer,
        region: region.to_string(),
        status: load_balancer
            .state()
            .and_then(|state| state.code())
            .map(|code| code.as_str().to_string())
            .unwrap_or_default(),
        created_at: iso8601(load_balancer.created_time()),
        attributes: BTreeMap::from([
            (
                "dnsName".to_string(),
                attr(load_balancer.dns_name().unwrap_or_default()),
            ),
            (
                "scheme".to_string(),
                attr(
                    load_balancer
                        .scheme()
                        .map(|scheme| scheme.as_str())
                        .unwrap_or_default(),
                ),
            ),
        ]),
        id,
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_elasticloadbalancingv2::types::{
        LoadBalancerSchemeEnum, LoadBalancerState, LoadBalancerStateEnum,
    };
    use aws_smithy_types::date_time::DateTime;

    use super::*;

    #[test]
    fn maps_an_application_load_balancer() {
        let load_balancer = LoadBalancer::builder()
            .load_balancer_arn("arn:aws:elasticloadbalancing:eu-west-1:123456789012:loadbalancer/app/web/abc")
            .load_balancer_name("web")
            .r#type(LoadBalancerTypeEnum::Application)
            .state(
                LoadBalancerState::builder()
                    .code(LoadBalancerStateEnum::Active)
                    .build(),
            )
            .scheme(LoadBalancerSchemeEnum::InternetFacing)
            .dns_name("web-123.eu-west-1.elb.amazonaws.com")
            .created_time(DateTime::from_secs(1_700_000_000))
            .build();

        let record = map_load_balancer(&load_balancer, "eu-west-1");
        assert_eq!(record.name, "web");
        assert_eq!(record.record_type, ResourceType::LoadBalancer);
        assert_eq!(record.status, "active");
        assert_eq!(record.created_at, "2023-11-14T22:13:20Z");
        assert_eq!(
            record.attributes["dnsName"],
            "web-123.eu-west-1.elb.amazonaws.com"
        );
        assert_eq!(record.attributes["scheme"], "internet-facing");
    }

    #[test]
    fn only_application_balancers_pass_the_filter() {
        let application = LoadBalancer::builder()
            .r#type(LoadBalancerTypeEnum::Application)
            .build();
        let network = LoadBalancer::builder()
            .r#type(LoadBalancerTypeEnum::Network)
            .build();
        let untyped = LoadBalancer::builder().build();

        assert!(is_application(&application));
        assert!(!is_application(&network));
        assert!(!is_application(&untyped));
    }

    #[test]
    fn missing_nested_state_degrades_to_empty_status() {
        let load_balancer = LoadBalancer::builder()
            .load_balancer_arn("arn:aws:elasticloadbalancing:us-east-1:123456789012:loadbalancer/app/bare/def")
            .r#type(LoadBalancerTypeEnum::Application)
            .build();

        let record = map_load_balancer(&load_balancer, "us-east-1");
        assert_eq!(record.status, "");
        assert_eq!(record.attributes["dnsName"], "");
    }
}
