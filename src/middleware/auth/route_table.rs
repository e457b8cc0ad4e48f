//! Route-level auth configuration, keyed by `(Method, route template)`.
//!
//! The template is what axum reports as `MatchedPath` (e.g. `/api/v1/users/{id}`),
//! so entries must be declared with the full, nested path.
use std::collections::HashMap;

use axum::http::Method;

use crate::services::auth::RouteAuth;

#[derive(Debug, Clone, Default)]
pub struct RouteAuthTable {
    routes: HashMap<(Method, String), RouteAuth>,
}

impl RouteAuthTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the policy for one method + path. A later declaration for the
    /// same key replaces the earlier one.
    pub fn declare(mut self, method: Method, path: impl Into<String>, auth: RouteAuth) -> Self {
        self.routes.insert((method, path.into()), auth);
        self
    }

    /// Re-keys every entry under `prefix`, for routers mounted with `nest`.
    pub fn nest(self, prefix: &str) -> Self {
        let prefix = prefix.trim_end_matches('/');
        let routes = self
            .routes
            .into_iter()
            .map(|((method, path), auth)| ((method, format!("{prefix}{path}")), auth))
            .collect();
        Self { routes }
    }

    /// Undeclared routes get `RouteAuth::Default`. `HEAD` falls back to the
    /// `GET` declaration, matching axum's routing of `HEAD` to `GET` handlers.
    pub fn get(&self, method: &Method, path: &str) -> RouteAuth {
        let find = |m: &Method| self.routes.get(&(m.clone(), path.to_string()));

        find(method)
            .or_else(|| (*method == Method::HEAD).then(|| find(&Method::GET)).flatten())
            .cloned()
            .unwrap_or_default()
    }
}
