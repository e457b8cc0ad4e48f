//! Route ごとの認証 hook: strategy を解決・実行し → AuthCtx を extensions に入れる
//!
//! - route の RouteAuth は `MatchedPath` で RouteAuthTable から引く
//! - 判定そのものは `services::auth::resolve` が行い、ここは HTTP への写像だけ
//! - strategy が Reply に書いた header は、どの結果でも最終 response に載せる

use axum::{
    Router,
    body::Body,
    extract::{MatchedPath, State},
    http::{Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::{Decision, ResolveError, Reply, resolve};
use crate::state::AppState;

/// router の全 route に認証 hook を掛ける。
///
/// routing 後に走らせる必要があるので `layer` ではなく `route_layer` を使う
/// (`MatchedPath` が見えるのは routing 後だけ)。
/// route を全て追加し終えた後に呼ぶこと。
///
/// 例：
/// ```ignore
/// let app = Router::new().nest("/api/v1", api::v1::routes());
/// let app = middleware::auth::access::apply(app, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());
    let route_auth = state.route_auth.get(req.method(), &path);

    let (mut parts, body) = req.into_parts();
    let mut reply = Reply::new();

    let decision = match resolve(&state.auth, &route_auth, &parts, &mut reply).await {
        Ok(decision) => decision,
        Err(err) => {
            match &err {
                ResolveError::InvalidStrategy(name) => {
                    tracing::warn!(path = %path, strategy = %name, "route references unknown auth strategy");
                }
                ResolveError::Strategy(e) => {
                    tracing::error!(path = %path, error = ?e, "auth strategy failed");
                }
            }
            let mut response = AppError::from(err).into_response();
            response.headers_mut().extend(reply.headers);
            return Ok(response);
        }
    };

    let mut response = match decision {
        Decision::Reject => {
            tracing::warn!(path = %path, route_auth = %route_auth, "authentication rejected");
            StatusCode::UNAUTHORIZED.into_response()
        }
        Decision::Anonymous => next.run(Request::from_parts(parts, body)).await,
        Decision::Authenticated(credentials) => {
            // middleware → extractor への受け渡し
            parts.extensions.insert(AuthCtx::new(credentials));
            next.run(Request::from_parts(parts, body)).await
        }
    };

    response.headers_mut().extend(reply.headers);
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::v1::extractors::MaybeAuthCtx;
    use crate::middleware::auth::RouteAuthTable;
    use crate::services::auth::{
        RouteAuth, Strategy, StrategyError, StrategyRegistry, Verification,
    };
    use async_trait::async_trait;
    use axum::{
        Json,
        http::{HeaderValue, Method, header, request::Parts},
        routing::get,
    };
    use serde_json::{Value, json};
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };
    use tower::ServiceExt;

    struct Fixed(Verification);

    #[async_trait]
    impl Strategy for Fixed {
        async fn verify(
            &self,
            _parts: &Parts,
            reply: &mut Reply,
        ) -> Result<Verification, StrategyError> {
            reply
                .headers
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Custom"));
            Ok(self.0.clone())
        }
    }

    struct Broken;

    #[async_trait]
    impl Strategy for Broken {
        async fn verify(
            &self,
            _parts: &Parts,
            reply: &mut Reply,
        ) -> Result<Verification, StrategyError> {
            reply
                .headers
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Broken"));
            Err(StrategyError::msg("session store unreachable"))
        }
    }

    fn invalid() -> Arc<dyn Strategy> {
        Arc::new(Fixed(Verification::invalid()))
    }

    fn valid(credentials: Value) -> Arc<dyn Strategy> {
        Arc::new(Fixed(Verification::valid(credentials)))
    }

    struct TestApp {
        router: Router,
        hits: Arc<AtomicUsize>,
    }

    impl TestApp {
        fn new(registry: StrategyRegistry, route_auth: Option<RouteAuth>) -> Self {
            let hits = Arc::new(AtomicUsize::new(0));
            let counter = hits.clone();

            let handler = move |MaybeAuthCtx(ctx): MaybeAuthCtx| {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Json(json!({
                        "auth": ctx.map(|c| json!({ "credentials": c.credentials })),
                    }))
                }
            };

            let table = match route_auth {
                Some(auth) => RouteAuthTable::new().declare(Method::GET, "/", auth),
                None => RouteAuthTable::new(),
            };
            let state = AppState::new(Arc::new(registry), table);

            let router = apply(Router::new().route("/", get(handler)), state.clone());

            Self {
                router: router.with_state(state),
                hits,
            }
        }

        async fn get(&self) -> (StatusCode, Response) {
            let response = self
                .router
                .clone()
                .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
                .await
                .unwrap();
            (response.status(), response)
        }

        fn hits(&self) -> usize {
            self.hits.load(Ordering::SeqCst)
        }
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn with_default(strategy: Arc<dyn Strategy>) -> StrategyRegistry {
        let mut registry = StrategyRegistry::new();
        registry.register("custom", strategy).unwrap();
        registry.set_default("custom").unwrap();
        registry
    }

    #[tokio::test]
    async fn default_strategy_failure_replies_401() {
        let app = TestApp::new(with_default(invalid()), None);

        let (status, response) = app.get().await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Custom");
        assert_eq!(app.hits(), 0);
    }

    #[tokio::test]
    async fn auth_false_skips_failing_default() {
        let app = TestApp::new(with_default(invalid()), Some(RouteAuth::Disabled));

        let (status, response) = app.get().await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "auth": null }));
        assert_eq!(app.hits(), 1);
    }

    #[tokio::test]
    async fn auth_false_skips_passing_default() {
        let app = TestApp::new(with_default(valid(json!("cred"))), Some(RouteAuth::Disabled));

        let (status, response) = app.get().await;

        assert_eq!(status, StatusCode::OK);
        assert!(response.headers().get(header::WWW_AUTHENTICATE).is_none());
        assert_eq!(body_json(response).await, json!({ "auth": null }));
    }

    #[tokio::test]
    async fn try_tolerates_failed_default() {
        let app = TestApp::new(with_default(invalid()), Some(RouteAuth::Try));

        let (status, response) = app.get().await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Custom");
        assert_eq!(body_json(response).await, json!({ "auth": null }));
        assert_eq!(app.hits(), 1);
    }

    #[tokio::test]
    async fn try_attaches_credentials_on_success() {
        let app = TestApp::new(with_default(valid(json!("cred"))), Some(RouteAuth::Try));

        let (status, response) = app.get().await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "auth": { "credentials": "cred" } })
        );
    }

    #[tokio::test]
    async fn route_strategy_overrides_default() {
        let mut registry = with_default(invalid());
        registry.register("token", valid(json!("cred"))).unwrap();
        let app = TestApp::new(registry, Some(RouteAuth::strategy("token")));

        let (status, response) = app.get().await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "auth": { "credentials": "cred" } })
        );
        assert_eq!(app.hits(), 1);
    }

    #[tokio::test]
    async fn unknown_route_strategy_is_500() {
        let app = TestApp::new(
            with_default(valid(json!("cred"))),
            Some(RouteAuth::strategy("token")),
        );

        let (status, response) = app.get().await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await["error"]["code"],
            "INVALID_AUTH_STRATEGY"
        );
        assert_eq!(app.hits(), 0);
    }

    #[tokio::test]
    async fn no_default_and_no_route_strategy_runs_unauthenticated() {
        let mut registry = StrategyRegistry::new();
        registry.register("custom", invalid()).unwrap();
        let app = TestApp::new(registry, None);

        let (status, response) = app.get().await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "auth": null }));
        assert_eq!(app.hits(), 1);
    }

    #[tokio::test]
    async fn valid_without_credentials_keeps_auth_with_empty_credentials() {
        let strategy: Arc<dyn Strategy> = Arc::new(Fixed(Verification::valid_without_credentials()));
        let app = TestApp::new(with_default(strategy), None);

        let (status, response) = app.get().await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "auth": { "credentials": null } })
        );
    }

    #[tokio::test]
    async fn strategy_fault_is_500_not_401() {
        let app = TestApp::new(with_default(Arc::new(Broken)), Some(RouteAuth::Try));

        let (status, response) = app.get().await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Broken");
        assert_eq!(
            body_json(response).await["error"]["code"],
            "INTERNAL_SERVER_ERROR"
        );
        assert_eq!(app.hits(), 0);
    }

    #[tokio::test]
    async fn string_false_route_config_is_500_not_disabled() {
        let route_auth: RouteAuth = serde_json::from_value(json!("false")).unwrap();
        let app = TestApp::new(with_default(valid(json!("cred"))), Some(route_auth));

        let (status, response) = app.get().await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await["error"]["code"],
            "INVALID_AUTH_STRATEGY"
        );
        assert_eq!(app.hits(), 0);
    }
}
