//! One adapter per backend domain. Each owns its own SDK client, paginates
//! its backend internally, and maps listings through a pure `map_*` helper
//! so the mapping is testable without network access.

mod alb;
mod ec2;
mod ecs;
mod iam;
mod rds;
mod route53;
mod s3;

pub use alb::AlbAdapter;
pub use ec2::Ec2Adapter;
pub use ecs::EcsAdapter;
pub use iam::IamAdapter;
pub use rds::RdsAdapter;
pub use route53::Route53Adapter;
pub use s3::S3Adapter;

use aws_smithy_types::date_time::{DateTime, Format};
use serde::Serialize;
use serde_json::Value;

/// ISO-8601 rendering; unknown timestamps degrade to the empty string.
pub(crate) fn iso8601(timestamp: Option<&DateTime>) -> String {
    timestamp
        .and_then(|value| value.fmt(Format::DateTime).ok())
        .unwrap_or_default()
}

/// Attribute value from any serializable SDK field.
pub(crate) fn attr(value: impl Serialize) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_epoch_renders_as_iso8601() {
        let timestamp = DateTime::from_secs(1_700_000_000);
        assert_eq!(iso8601(Some(&timestamp)), "2023-11-14T22:13:20Z");
    }

    #[test]
    fn missing_timestamp_renders_empty_not_sentinel() {
        assert_eq!(iso8601(None), "");
    }
}
