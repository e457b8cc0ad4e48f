/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が strategy を実行して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - credentials の中身は strategy が決める (core は解釈しない)
 * - extensions に AuthCtx が無い = 未認証 (auth:false / try 失敗 / default 未設定)
 */
use crate::services::auth::Credentials;

/// 認証に成功したリクエストに付与されるコンテキスト
///
/// - `credentials` は strategy が返したものをそのまま保持する
/// - `None` は「成功したが credentials なし」であり、未認証とは区別される
#[derive(Debug, Clone, PartialEq)]
pub struct AuthCtx {
    pub credentials: Option<Credentials>,
}

impl AuthCtx {
    pub fn new(credentials: Option<Credentials>) -> Self {
        Self { credentials }
    }

    /// Convenience for strategies that put a `subject` string in their credentials.
    pub fn subject(&self) -> Option<&str> {
        self.credentials.as_ref()?.get("subject")?.as_str()
    }
}
