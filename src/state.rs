/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - auth: 起動時に組み立てた StrategyRegistry (以後 read-only)
 *   - route_auth: route ごとの認証ポリシー
 * - Clone 前提で持つ (内部は Arc で Clone cheap)
 */
use std::sync::Arc;

use crate::middleware::auth::RouteAuthTable;
use crate::services::auth::StrategyRegistry;

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth: Arc<StrategyRegistry>,
    pub route_auth: Arc<RouteAuthTable>,
}

impl AppState {
    pub fn new(auth: Arc<StrategyRegistry>, route_auth: RouteAuthTable) -> Self {
        Self {
            auth,
            route_auth: Arc::new(route_auth),
        }
    }
}
