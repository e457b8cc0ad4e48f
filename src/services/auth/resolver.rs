//! Per-request authentication decision.
//!
//! Rules, first match wins:
//! 1. `Disabled` -> anonymous, no strategy consulted
//! 2. pick a candidate: `Default`/`Try` -> registry default; `Strategy(name)` -> lookup,
//!    unknown name -> `InvalidStrategy`
//! 3. no candidate -> anonymous
//! 4. run the candidate
//! 5. invalid -> anonymous under `Try`, otherwise reject
//! 6. valid -> authenticated with the strategy's credentials as-is
use axum::http::request::Parts;
use thiserror::Error;

use crate::services::auth::{
    registry::StrategyRegistry,
    route_auth::RouteAuth,
    strategy::{Credentials, Reply, StrategyError},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Continue to the handler without auth state.
    Anonymous,
    /// Continue to the handler with auth state attached.
    Authenticated(Option<Credentials>),
    /// Short-circuit with 401; the handler must not run.
    Reject,
}

#[derive(Debug, Error)]
pub enum ResolveError {
    /// The route names a strategy that was never registered.
    #[error("invalid auth strategy {0}")]
    InvalidStrategy(String),
    #[error("auth strategy failed: {0}")]
    Strategy(#[from] StrategyError),
}

pub async fn resolve(
    registry: &StrategyRegistry,
    route_auth: &RouteAuth,
    parts: &Parts,
    reply: &mut Reply,
) -> Result<Decision, ResolveError> {
    let (name, strategy) = match route_auth {
        RouteAuth::Disabled => return Ok(Decision::Anonymous),
        RouteAuth::Default | RouteAuth::Try => {
            (registry.default_name(), registry.default_strategy())
        }
        RouteAuth::Strategy(name) => {
            let strategy = registry
                .lookup(name)
                .ok_or_else(|| ResolveError::InvalidStrategy(name.clone()))?;
            (Some(name.as_str()), Some(strategy))
        }
    };

    let Some(strategy) = strategy else {
        return Ok(Decision::Anonymous);
    };

    let verification = strategy.verify(parts, reply).await?;

    let decision = if verification.is_valid {
        Decision::Authenticated(verification.credentials)
    } else if route_auth.tolerates_failure() {
        Decision::Anonymous
    } else {
        Decision::Reject
    };

    tracing::debug!(
        strategy = name.unwrap_or("-"),
        route_auth = %route_auth,
        is_valid = verification.is_valid,
        "auth strategy evaluated"
    );

    Ok(decision)
}
