/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - 認証の解決エラー (ResolveError) を統一的に変換
 *
 * Notes
 * - 認証の拒否 (401) は AppError ではない。middleware が status だけを返す
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::ResolveError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found: {resource}")]
    NotFound { resource: &'static str },
    /// A route references a strategy that is not registered (routing table defect).
    #[error("invalid auth strategy {name}")]
    InvalidStrategy { name: String },
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::NotFound { resource } => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{resource} not found."),
            ),
            AppError::InvalidStrategy { name } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INVALID_AUTH_STRATEGY",
                format!("invalid auth strategy {name}"),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                "internal server error".into(),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ResolveError> for AppError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::InvalidStrategy(name) => AppError::InvalidStrategy { name },
            // Strategy internals are not exposed to the client.
            ResolveError::Strategy(_) => AppError::Internal,
        }
    }
}
