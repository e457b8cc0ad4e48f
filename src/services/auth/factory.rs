/// Factory: build the `StrategyRegistry` from application `Config`.
use std::sync::Arc;

use anyhow::Context;

use crate::config::Config;
use crate::services::auth::{
    StrategyRegistry,
    strategies::{ApiKeyStrategy, BearerTokenStrategy, SecretTable, api_key, bearer},
};

/// Registers the bundled strategies that have secrets configured, then applies
/// the configured default. Any registry error aborts startup.
pub fn build_registry(config: &Config) -> anyhow::Result<Arc<StrategyRegistry>> {
    let mut registry = StrategyRegistry::new();

    let tokens = SecretTable::new(config.bearer_tokens.iter().map(|(t, s)| (t, s.as_str())));
    if !tokens.is_empty() {
        registry.register(bearer::NAME, Arc::new(BearerTokenStrategy::new(tokens)))?;
    }

    let keys = SecretTable::new(config.api_keys.iter().map(|(k, s)| (k, s.as_str())));
    if !keys.is_empty() {
        registry.register(api_key::NAME, Arc::new(ApiKeyStrategy::new(keys)))?;
    }

    if let Some(name) = config.default_strategy.as_deref() {
        registry
            .set_default(name)
            .with_context(|| format!("AUTH_DEFAULT_STRATEGY={name}"))?;
    }

    tracing::info!(registry = ?registry, "auth registry ready");
    Ok(Arc::new(registry))
}
