/*
 * Responsibility
 * - GET /me : route 設定なし (default strategy に従う)
 * - GET /keys/me : api-key strategy 指定
 * - middleware が入れた AuthCtx をそのまま返す
 */
use axum::Json;
use serde::Serialize;

use crate::api::v1::extractors::{AuthCtxExtractor, MaybeAuthCtx};
use crate::services::auth::Credentials;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub authenticated: bool,
    pub credentials: Option<Credentials>,
}

/// default strategy が未設定なら未認証のまま到達する
pub async fn me(MaybeAuthCtx(ctx): MaybeAuthCtx) -> Json<MeResponse> {
    Json(MeResponse {
        authenticated: ctx.is_some(),
        credentials: ctx.and_then(|c| c.credentials),
    })
}

/// strategy 指定 route なので AuthCtx が必ずある
pub async fn key_owner(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<MeResponse> {
    Json(MeResponse {
        authenticated: true,
        credentials: ctx.credentials,
    })
}
