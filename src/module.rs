//! Host-facing capability interface.
//!
//! A host binds a [`ScopeModule`] into its own configuration loader and
//! request pipeline: it creates a scope object per server and per
//! directory, feeds it the module's directive lines, merges scopes while
//! composing its configuration tree, and calls [`ScopeModule::fixup`] once
//! per request with the already-resolved effective configuration.

use axum::http::Request;

use crate::rewrite::{rewrite_method, HookResult};
use crate::scope::{merge_directory, merge_server, ConfigError, ScopeConfig};

/// Operations a scope-aware request module exposes to its host.
pub trait ScopeModule: Send + Sync + 'static {
    /// Per-scope configuration object.
    type Config: Clone + Send + Sync + 'static;

    /// Module name for logs.
    fn name(&self) -> &'static str;

    /// Configuration keyword this module owns (matched case-insensitively).
    fn directive(&self) -> &'static str;

    fn create_server_scope(&self, host: Option<&str>) -> Self::Config;

    fn create_directory_scope(&self, path: Option<&str>) -> Self::Config;

    /// Apply the raw arguments of one directive line to `scope`.
    fn apply_directive(&self, scope: &mut Self::Config, args: &str) -> Result<(), ConfigError>;

    fn merge_directory(&self, parent: &Self::Config, child: &Self::Config) -> Self::Config;

    fn merge_server(&self, base: &Self::Config, overlay: &Self::Config) -> Self::Config;

    /// Pre-dispatch fixup. Must run before anything branches on the method.
    fn fixup<B>(&self, config: &Self::Config, request: &mut Request<B>) -> HookResult;
}

/// Method rewriting module (`Method replace <from> <to>`).
#[derive(Debug, Clone, Copy, Default)]
pub struct MethodModule;

impl ScopeModule for MethodModule {
    type Config = ScopeConfig;

    fn name(&self) -> &'static str {
        "method"
    }

    fn directive(&self) -> &'static str {
        "Method"
    }

    fn create_server_scope(&self, host: Option<&str>) -> ScopeConfig {
        ScopeConfig::server(host)
    }

    fn create_directory_scope(&self, path: Option<&str>) -> ScopeConfig {
        ScopeConfig::directory(path)
    }

    fn apply_directive(&self, scope: &mut ScopeConfig, args: &str) -> Result<(), ConfigError> {
        scope.apply_directive(args)
    }

    fn merge_directory(&self, parent: &ScopeConfig, child: &ScopeConfig) -> ScopeConfig {
        merge_directory(parent, child)
    }

    fn merge_server(&self, base: &ScopeConfig, overlay: &ScopeConfig) -> ScopeConfig {
        merge_server(base, overlay)
    }

    fn fixup<B>(&self, config: &ScopeConfig, request: &mut Request<B>) -> HookResult {
        rewrite_method(config, request)
    }
}
