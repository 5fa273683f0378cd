use std::collections::BTreeMap;

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_iam::types::User;
use aws_sdk_iam::Client;

use inventory_core::adapter::ServiceAdapter;
use inventory_core::contract::{ClassifiedError, NormalizedRecord, ResourceType, GLOBAL_REGION};

use crate::adapters::{attr, iso8601};
use crate::classify::classify_sdk_error;

pub struct IamAdapter {
    client: Client,
}

impl IamAdapter {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl ServiceAdapter for IamAdapter {
    fn name(&self) -> &'static str {
        "iam"
    }

    // Identity is region-less; records are labeled "global".
    async fn fetch(&self, _region: &str) -> Result<Vec<NormalizedRecord>, ClassifiedError> {
        let mut records = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let output = self
                .client
                .list_users()
                .set_marker(marker)
                .send()
                .await
                .map_err(classify_sdk_error)?;

            for user in output.users() {
                records.push(map_user(user));
            }

            if !output.is_truncated() {
                break;
            }
            marker = output.marker().map(str::to_string);
        }

        Ok(records)
    }
}

fn map_user(user: &User) -> NormalizedRecord {
    NormalizedRecord {
        id: user.user_id().to_string(),
        name: user.user_name().to_string(),
        record_type: ResourceType::IdentityPrincipal,
        region: GLOBAL_REGION.to_string(),
        status: String::new(),
        created_at: iso8601(Some(user.create_date())),
        attributes: BTreeMap::from([("arn".to_string(), attr(user.arn()))]),
    }
}

#[cfg(test)]
mod tests {
    use aws_smithy_types::date_time::DateTime;

    use super::*;

    #[test]
    fn users_are_global_with_no_lifecycle_status() {
        let user = User::builder()
            .path("/")
            .user_name("alice")
            .user_id("AIDAEXAMPLE")
            .arn("arn:aws:iam::123456789012:user/alice")
            .create_date(DateTime::from_secs(1_700_000_000))
            .build()
            .expect("user should build");

        let record = map_user(&user);
        assert_eq!(record.id, "AIDAEXAMPLE");
        assert_eq!(record.name, "alice");
        assert_eq!(record.record_type, ResourceType::IdentityPrincipal);
        assert_eq!(record.region, GLOBAL_REGION);
        assert_eq!(record.status, "");
        assert_eq!(record.created_at, "2023-11-14T22:13:20Z");
        assert_eq!(
            record.attributes["arn"],
            "arn:aws:iam::123456789012:user/alice"
        );
    }
}
