/*
 * Responsibility
 * - middleware の公開インターフェース (re-export)
 * - auth: route ごとの strategy 解決, http: request-id / trace / limit / timeout
 */
pub mod auth;
pub mod http;
