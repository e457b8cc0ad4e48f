//! Strategy interface: the host-supplied verification procedure.
//!
//! The core never looks inside a strategy. It hands over the request head and
//! a reply slot, awaits the `Verification`, and acts on `is_valid` only.
use async_trait::async_trait;
use axum::http::{HeaderMap, request::Parts};
use thiserror::Error;

/// Opaque credentials payload produced by a successful strategy.
pub type Credentials = serde_json::Value;

/// Result of running a strategy against one request.
///
/// `credentials` is only meaningful when `is_valid` is true. A valid outcome
/// without credentials is kept as `None`; it is not normalised to an empty value.
#[derive(Debug, Clone, PartialEq)]
pub struct Verification {
    pub is_valid: bool,
    pub credentials: Option<Credentials>,
}

impl Verification {
    pub fn valid(credentials: Credentials) -> Self {
        Self {
            is_valid: true,
            credentials: Some(credentials),
        }
    }

    pub fn valid_without_credentials() -> Self {
        Self {
            is_valid: true,
            credentials: None,
        }
    }

    pub fn invalid() -> Self {
        Self {
            is_valid: false,
            credentials: None,
        }
    }
}

/// Response-side effects a strategy wants applied (e.g. `WWW-Authenticate`).
///
/// The middleware merges these headers into whatever response the request ends
/// up with: the 401, or the handler's response.
#[derive(Debug, Default)]
pub struct Reply {
    pub headers: HeaderMap,
}

impl Reply {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A strategy failed to run at all (backend down, bug, ...).
///
/// This is a fault, not a rejection: it surfaces as a 500.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct StrategyError(#[from] anyhow::Error);

impl StrategyError {
    pub fn msg(message: impl std::fmt::Display + std::fmt::Debug + Send + Sync + 'static) -> Self {
        Self(anyhow::Error::msg(message))
    }
}

#[async_trait]
pub trait Strategy: Send + Sync {
    async fn verify(&self, parts: &Parts, reply: &mut Reply)
    -> Result<Verification, StrategyError>;
}
