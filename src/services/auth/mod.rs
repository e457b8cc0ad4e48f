pub mod factory;
pub mod registry;
pub mod resolver;
pub mod route_auth;
pub mod strategies;
pub mod strategy;

pub use factory::build_registry;
pub use registry::{RegistryError, StrategyRegistry};
pub use resolver::{Decision, ResolveError, resolve};
pub use route_auth::RouteAuth;
pub use strategy::{Credentials, Reply, Strategy, StrategyError, Verification};
