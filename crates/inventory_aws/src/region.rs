use aws_config::meta::region::{ProvideRegion, RegionProviderChain};

/// Used when no other source yields a region.
pub const FALLBACK_REGION: &str = "us-east-1";

/// Precedence over the candidate sources, first non-empty wins. Pure so the
/// ordering is testable without touching process environment.
pub fn effective_region(
    explicit: Option<&str>,
    process_env: Option<&str>,
    provider_chain: Option<&str>,
) -> String {
    [explicit, process_env, provider_chain]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|candidate| !candidate.is_empty())
        .map_or_else(|| FALLBACK_REGION.to_string(), str::to_string)
}

/// Resolves the effective operating region. Never fails: explicit override,
/// then process environment, then the SDK default provider chain (profile,
/// IMDS, ...), then [`FALLBACK_REGION`].
pub async fn resolve_region(explicit: Option<&str>) -> String {
    let process_env = std::env::var("AWS_REGION")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .or_else(|| std::env::var("AWS_DEFAULT_REGION").ok());
    let provider_chain = RegionProviderChain::default_provider()
        .region()
        .await
        .map(|region| region.to_string());

    effective_region(explicit, process_env.as_deref(), provider_chain.as_deref())
}
