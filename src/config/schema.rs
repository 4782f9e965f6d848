//! Configuration schema definitions.
//!
//! This module defines the site configuration read by the host: listener,
//! timeouts, observability, and the scope sections (main server, virtual
//! hosts, locations) that carry directive lines.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Main server scope.
    pub server: ServerSection,

    /// Virtual hosts layered over the main server.
    pub virtual_hosts: Vec<VirtualHostSection>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Main server scope.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerSection {
    /// Server hostname, used in the scope label.
    pub hostname: Option<String>,

    /// Directive lines, e.g. "Method replace OPTIONS GET".
    pub directives: Vec<String>,

    /// Location scopes under this server.
    pub locations: Vec<LocationSection>,
}

/// Virtual host scope, merged over the main server.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VirtualHostSection {
    /// Primary host name to match.
    pub server_name: String,

    /// Additional host names to match.
    #[serde(default)]
    pub aliases: Vec<String>,

    #[serde(default)]
    pub directives: Vec<String>,

    #[serde(default)]
    pub locations: Vec<LocationSection>,
}

/// Path-scoped section.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocationSection {
    /// Path prefix, matched on segment boundaries.
    pub path: String,

    #[serde(default)]
    pub directives: Vec<String>,
}
