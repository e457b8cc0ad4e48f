use async_trait::async_trait;
use axum::http::{HeaderValue, header, request::Parts};
use serde_json::json;

use super::SecretTable;
use crate::services::auth::strategy::{Reply, Strategy, StrategyError, Verification};

pub const NAME: &str = "bearer";

/// `Authorization: Bearer <token>` against a static token table.
///
/// Sets `WWW-Authenticate: Bearer` on every failed attempt.
#[derive(Debug, Clone)]
pub struct BearerTokenStrategy {
    tokens: SecretTable,
}

impl BearerTokenStrategy {
    pub fn new(tokens: SecretTable) -> Self {
        Self { tokens }
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[async_trait]
impl Strategy for BearerTokenStrategy {
    async fn verify(
        &self,
        parts: &Parts,
        reply: &mut Reply,
    ) -> Result<Verification, StrategyError> {
        let subject = bearer_token(parts).and_then(|token| self.tokens.subject(token));

        match subject {
            Some(subject) => Ok(Verification::valid(json!({
                "subject": subject,
                "scheme": NAME,
            }))),
            None => {
                reply
                    .headers
                    .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
                Ok(Verification::invalid())
            }
        }
    }
}
