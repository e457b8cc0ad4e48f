use std::{collections::HashMap, fmt, sync::Arc};

use thiserror::Error;

use crate::services::auth::strategy::Strategy;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("strategy with name \"{0}\" already registered")]
    DuplicateName(String),
    #[error("strategy \"{0}\" doesn't exist; register it before making it the default")]
    UnknownStrategy(String),
}

/// Named authentication strategies plus the designated default.
///
/// - The default is stored as a key into `entries`, so it cannot dangle.
/// - Entries are never removed.
/// - Mutation happens during startup; the registry is then moved into an
///   `Arc` in `AppState` and only read from there.
#[derive(Default)]
pub struct StrategyRegistry {
    entries: HashMap<String, Arc<dyn Strategy>>,
    default: Option<String>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `strategy` under `name`. Not an upsert: a taken name is an error
    /// and leaves the existing entry untouched.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        strategy: Arc<dyn Strategy>,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        tracing::info!(strategy = %name, "auth strategy registered");
        self.entries.insert(name, strategy);
        Ok(())
    }

    /// Marks `name` as the default. Replaces any previous default.
    pub fn set_default(&mut self, name: &str) -> Result<(), RegistryError> {
        if !self.entries.contains_key(name) {
            return Err(RegistryError::UnknownStrategy(name.to_string()));
        }

        tracing::info!(strategy = %name, "default auth strategy set");
        self.default = Some(name.to_string());
        Ok(())
    }

    pub fn default_name(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn default_strategy(&self) -> Option<Arc<dyn Strategy>> {
        self.default.as_deref().and_then(|name| self.lookup(name))
    }

    /// Absence is a normal outcome here; the resolver decides what it means.
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Strategy>> {
        self.entries.get(name).cloned()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("StrategyRegistry")
            .field("entries", &names)
            .field("default", &self.default)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::strategy::{Reply, StrategyError, Verification};
    use async_trait::async_trait;
    use axum::http::request::Parts;

    struct Fixed(Verification);

    #[async_trait]
    impl Strategy for Fixed {
        async fn verify(
            &self,
            _parts: &Parts,
            _reply: &mut Reply,
        ) -> Result<Verification, StrategyError> {
            Ok(self.0.clone())
        }
    }

    fn fixed(v: Verification) -> Arc<dyn Strategy> {
        Arc::new(Fixed(v))
    }

    #[test]
    fn register_then_lookup_returns_same_strategy() {
        let mut registry = StrategyRegistry::new();
        let strategy = fixed(Verification::valid(serde_json::json!({})));
        registry.register("custom", strategy.clone()).unwrap();

        let found = registry.lookup("custom").unwrap();
        assert!(Arc::ptr_eq(&found, &strategy));
    }

    #[test]
    fn duplicate_register_fails_and_keeps_first() {
        let mut registry = StrategyRegistry::new();
        let first = fixed(Verification::valid(serde_json::json!({})));
        registry.register("custom", first.clone()).unwrap();

        let err = registry
            .register("custom", fixed(Verification::invalid()))
            .unwrap_err();

        assert_eq!(err, RegistryError::DuplicateName("custom".into()));
        assert!(Arc::ptr_eq(&registry.lookup("custom").unwrap(), &first));
    }

    #[test]
    fn set_default_points_at_registered_strategy() {
        let mut registry = StrategyRegistry::new();
        let strategy = fixed(Verification::invalid());
        registry.register("custom", strategy.clone()).unwrap();
        registry.set_default("custom").unwrap();

        assert_eq!(registry.default_name(), Some("custom"));
        assert!(Arc::ptr_eq(&registry.default_strategy().unwrap(), &strategy));
    }

    #[test]
    fn set_default_unknown_fails_and_keeps_previous_default() {
        let mut registry = StrategyRegistry::new();
        registry
            .register("custom", fixed(Verification::invalid()))
            .unwrap();
        registry.set_default("custom").unwrap();

        let err = registry.set_default("non-existent").unwrap_err();

        assert_eq!(err, RegistryError::UnknownStrategy("non-existent".into()));
        assert_eq!(registry.default_name(), Some("custom"));
    }

    #[test]
    fn set_default_replaces_previous_default() {
        let mut registry = StrategyRegistry::new();
        registry.register("a", fixed(Verification::invalid())).unwrap();
        registry.register("b", fixed(Verification::invalid())).unwrap();
        registry.set_default("a").unwrap();
        registry.set_default("b").unwrap();

        assert_eq!(registry.default_name(), Some("b"));
    }

    #[test]
    fn lookup_unknown_and_missing_default_are_none() {
        let registry = StrategyRegistry::new();
        assert!(registry.lookup("nope").is_none());
        assert!(registry.default_strategy().is_none());
    }
}
