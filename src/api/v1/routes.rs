/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - route ごとの認証ポリシー (RouteAuthTable) もここで宣言する
 *   - 宣言なし = default strategy
 */
use axum::{Router, http::Method, routing::get};

use crate::middleware::auth::RouteAuthTable;
use crate::services::auth::{RouteAuth, strategies::api_key};
use crate::state::AppState;

use crate::api::v1::handlers::{
    greeting::greeting,
    health::health,
    me::{key_owner, me},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/me", get(me))
        .route("/greeting", get(greeting))
        .route("/keys/me", get(key_owner))
}

/// `routes()` と同じ相対 path で宣言する (nest 時に prefix を付ける)
pub fn route_auth() -> RouteAuthTable {
    RouteAuthTable::new()
        .declare(Method::GET, "/health", RouteAuth::Disabled)
        .declare(Method::GET, "/greeting", RouteAuth::Try)
        .declare(Method::GET, "/keys/me", RouteAuth::strategy(api_key::NAME))
}
