/*
 * Responsibility
 * - GET /greeting (auth:"try")
 * - 認証に失敗しても guest として応答する
 */
use axum::Json;
use serde_json::{Value, json};

use crate::api::v1::extractors::MaybeAuthCtx;

pub async fn greeting(MaybeAuthCtx(ctx): MaybeAuthCtx) -> Json<Value> {
    let name = ctx
        .as_ref()
        .and_then(|c| c.subject())
        .unwrap_or("guest");

    Json(json!({ "message": format!("hello, {name}") }))
}
