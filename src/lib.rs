/*
 * Responsibility
 * - route ごとに切り替え可能な認証 strategy 層 (registry + resolver + axum hook)
 * - bin (main.rs) と host application の双方から使う公開 module
 */
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
