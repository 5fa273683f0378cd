use std::sync::Arc;

use async_trait::async_trait;

use crate::contract::{ClassifiedError, NormalizedRecord};

/// One backend domain's read-only listing seam.
///
/// Implementations fetch the raw listing from exactly one backend, handle
/// that backend's pagination internally, and map every entry into a
/// [`NormalizedRecord`]. Failures never escape as panics; every backend
/// fault is converted into a [`ClassifiedError`]. Adapters for region-less
/// domains ignore the region argument and label their records `"global"`.
#[async_trait]
pub trait ServiceAdapter: Send + Sync {
    /// Stable identifier of the backend domain this adapter queries.
    fn name(&self) -> &'static str;

    async fn fetch(&self, region: &str) -> Result<Vec<NormalizedRecord>, ClassifiedError>;
}

/// Ordered, open collection of adapters. Domains are added or removed here
/// without touching orchestration logic.
#[derive(Default)]
pub struct AdapterRegistry {
    adapters: Vec<Arc<dyn ServiceAdapter>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, adapter: Arc<dyn ServiceAdapter>) -> Self {
        self.adapters.push(adapter);
        self
    }

    pub fn register(&mut self, adapter: Arc<dyn ServiceAdapter>) {
        self.adapters.push(adapter);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn ServiceAdapter>> {
        self.adapters.iter()
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullAdapter(&'static str);

    #[async_trait]
    impl ServiceAdapter for NullAdapter {
        fn name(&self) -> &'static str {
            self.0
        }

        async fn fetch(&self, _region: &str) -> Result<Vec<NormalizedRecord>, ClassifiedError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn registry_preserves_registration_order() {
        let registry = AdapterRegistry::new()
            .with(Arc::new(NullAdapter("ec2")))
            .with(Arc::new(NullAdapter("rds")))
            .with(Arc::new(NullAdapter("iam")));

        let names: Vec<&str> = registry.iter().map(|adapter| adapter.name()).collect();
        assert_eq!(names, vec!["ec2", "rds", "iam"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn empty_registry_is_empty() {
        assert!(AdapterRegistry::new().is_empty());
    }
}
