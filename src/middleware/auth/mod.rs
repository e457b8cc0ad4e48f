pub mod access;
mod route_table;

pub use crate::services::auth::RouteAuth;
pub use route_table::RouteAuthTable;
