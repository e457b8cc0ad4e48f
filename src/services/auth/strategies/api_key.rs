use async_trait::async_trait;
use axum::http::{HeaderName, request::Parts};
use serde_json::json;

use super::SecretTable;
use crate::services::auth::strategy::{Reply, Strategy, StrategyError, Verification};

pub const NAME: &str = "api-key";
pub const HEADER: HeaderName = HeaderName::from_static("x-api-key");

/// `x-api-key: <key>` against a static key table.
#[derive(Debug, Clone)]
pub struct ApiKeyStrategy {
    keys: SecretTable,
}

impl ApiKeyStrategy {
    pub fn new(keys: SecretTable) -> Self {
        Self { keys }
    }
}

#[async_trait]
impl Strategy for ApiKeyStrategy {
    async fn verify(
        &self,
        parts: &Parts,
        _reply: &mut Reply,
    ) -> Result<Verification, StrategyError> {
        let subject = parts
            .headers
            .get(&HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|key| self.keys.subject(key.trim()));

        Ok(match subject {
            Some(subject) => Verification::valid(json!({
                "subject": subject,
                "scheme": NAME,
            })),
            None => Verification::invalid(),
        })
    }
}
