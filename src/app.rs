/*
 * Responsibility
 * - Config読み込み → StrategyRegistry 組み立て → Router 組み立て
 * - Middleware の適用 (route ごとの認証 hook / HTTP 共通 layer)
 * - axum::serve() で起動
 */
use anyhow::Result;
use axum::Router;
use tracing_subscriber::EnvFilter;

use crate::{
    api,
    config::Config,
    error::AppError,
    middleware,
    services::auth::build_registry,
    state::AppState,
};

const API_V1: &str = "/api/v1";

pub async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    tracing::info!(config = ?config, "configuration loaded");
    if !config.app_env.is_production() {
        tracing::warn!("running in development mode");
    }

    let state = build_state(&config)?;
    let app = middleware::http::apply(build_router(state), &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_state(config: &Config) -> Result<AppState> {
    let registry = build_registry(config)?;
    let route_auth = api::v1::route_auth().nest(API_V1);
    Ok(AppState::new(registry, route_auth))
}

fn build_router(state: AppState) -> Router {
    let app = Router::new().nest(API_V1, api::v1::routes());

    // auth hook は route 追加後に掛ける (fallback には掛からない)
    middleware::auth::access::apply(app, state.clone())
        .fallback(|| async { AppError::not_found("route") })
        .with_state(state)
}
