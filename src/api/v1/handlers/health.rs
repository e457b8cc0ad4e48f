/*
 * Responsibility
 * - GET /health (疎通用)
 * - auth:false の route (default strategy が設定されていても認証しない)
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
