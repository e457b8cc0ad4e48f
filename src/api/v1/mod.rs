/*
 * Responsibility
 * - v1 の公開ポイント (routes() / route_auth() の re-export など)
 */
pub mod extractors;
pub mod handlers;
mod routes;

pub use routes::{route_auth, routes};
