use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Region label for resource types that are not scoped to a region.
pub const GLOBAL_REGION: &str = "global";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    #[serde(rename = "EC2")]
    Compute,
    #[serde(rename = "RDS")]
    ManagedDatabase,
    #[serde(rename = "IAM")]
    IdentityPrincipal,
    #[serde(rename = "ECS")]
    ContainerCluster,
    #[serde(rename = "S3")]
    ObjectStore,
    #[serde(rename = "ALB")]
    LoadBalancer,
    #[serde(rename = "Route53")]
    DnsRecord,
}

impl ResourceType {
    pub const ALL: [ResourceType; 7] = [
        Self::Compute,
        Self::ManagedDatabase,
        Self::IdentityPrincipal,
        Self::ContainerCluster,
        Self::ObjectStore,
        Self::LoadBalancer,
        Self::DnsRecord,
    ];

    /// Stable key used for this type's group in the serialized report.
    pub fn wire_key(self) -> &'static str {
        match self {
            Self::Compute => "ec2Instances",
            Self::ManagedDatabase => "rdsInstances",
            Self::IdentityPrincipal => "iamUsers",
            Self::ContainerCluster => "ecsClusters",
            Self::ObjectStore => "s3Buckets",
            Self::LoadBalancer => "albs",
            Self::DnsRecord => "route53Records",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Compute => "EC2",
            Self::ManagedDatabase => "RDS",
            Self::IdentityPrincipal => "IAM",
            Self::ContainerCluster => "ECS",
            Self::ObjectStore => "S3",
            Self::LoadBalancer => "ALB",
            Self::DnsRecord => "Route53",
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Common shape every adapter emits, regardless of backend domain.
///
/// `region` and `status` are always present; absence is the empty string,
/// never a null, so consumers need no missing-field handling. `attributes`
/// carries domain-specific extension fields only and never duplicates a core
/// field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: ResourceType,
    pub region: String,
    pub status: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

/// Classified failure of a single adapter invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ClassifiedError {
    #[error("backend rejected credentials or permissions: {0}")]
    AuthFailure(String),
    #[error("backend throttled the request: {0}")]
    Throttled(String),
    #[error("backend domain not available in this account or region: {0}")]
    NotAvailable(String),
    #[error("{0}")]
    Timeout(String),
    #[error("backend response could not be normalized: {0}")]
    Malformed(String),
    #[error("{0}")]
    Unknown(String),
}

impl ClassifiedError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AuthFailure(_) => "auth_failure",
            Self::Throttled(_) => "throttled",
            Self::NotAvailable(_) => "not_available",
            Self::Timeout(_) => "timeout",
            Self::Malformed(_) => "malformed",
            Self::Unknown(_) => "unknown",
        }
    }
}

/// Result of one adapter invocation: either records or a classified error,
/// never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdapterOutcome {
    #[serde(rename = "adapterName")]
    pub adapter_name: String,
    pub records: Vec<NormalizedRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ClassifiedError>,
}

impl AdapterOutcome {
    pub fn success(adapter_name: impl Into<String>, records: Vec<NormalizedRecord>) -> Self {
        Self {
            adapter_name: adapter_name.into(),
            records,
            error: None,
        }
    }

    pub fn failure(adapter_name: impl Into<String>, error: ClassifiedError) -> Self {
        Self {
            adapter_name: adapter_name.into(),
            records: Vec::new(),
            error: Some(error),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}
