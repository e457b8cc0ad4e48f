use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};

use super::AuthCtx;

/// Handler で、 AuthCtx を受け取るための extractor
/// middleware が AuthCtx を request.extensions() に insert 済みである前提
/// 見つからない場合は 401 を返す（認証がかかってない・try で失敗した）
pub struct AuthCtxExtractor(pub AuthCtx);

impl<S> FromRequestParts<S> for AuthCtxExtractor
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthCtx>()
            .cloned()
            .map(AuthCtxExtractor)
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}

/// 未認証でも handler を実行したい route 用 (auth:false / try)
pub struct MaybeAuthCtx(pub Option<AuthCtx>);

impl<S> FromRequestParts<S> for MaybeAuthCtx
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthCtx(parts.extensions.get::<AuthCtx>().cloned()))
    }
}
