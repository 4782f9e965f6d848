//! Scope-aware HTTP request method rewriting.

// Core
pub mod directive;
pub mod module;
pub mod rewrite;
pub mod scope;

// Host
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use module::{MethodModule, ScopeModule};
pub use rewrite::{rewrite_method, HookResult};
pub use scope::{merge_directory, merge_server, ConfigError, ScopeConfig, ScopeKind, ScopeTree};
