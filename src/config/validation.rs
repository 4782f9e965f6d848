//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Detect duplicate host names and location paths
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Directive lines are checked later, when the scope tree is built

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{GatewayConfig, LocationSection};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid listener bind address '{0}'")]
    BindAddress(String),

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,

    #[error("virtual host #{0} has an empty server_name")]
    EmptyServerName(usize),

    #[error("host name '{0}' is claimed by more than one virtual host")]
    DuplicateHost(String),

    #[error("location path '{path}' in {scope} must start with '/'")]
    RelativePath { scope: String, path: String },

    #[error("location path '{path}' declared twice in {scope}")]
    DuplicatePath { scope: String, path: String },
}

/// Validate a parsed configuration.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    check_locations("server", &config.server.locations, &mut errors);

    let mut seen_hosts = HashSet::new();
    for (idx, vhost) in config.virtual_hosts.iter().enumerate() {
        if vhost.server_name.trim().is_empty() {
            errors.push(ValidationError::EmptyServerName(idx));
        }
        for name in std::iter::once(&vhost.server_name).chain(vhost.aliases.iter()) {
            let name = name.trim().to_ascii_lowercase();
            if !name.is_empty() && !seen_hosts.insert(name.clone()) {
                errors.push(ValidationError::DuplicateHost(name));
            }
        }
        check_locations(
            &format!("virtual host '{}'", vhost.server_name),
            &vhost.locations,
            &mut errors,
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_locations(scope: &str, locations: &[LocationSection], errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();
    for location in locations {
        if !location.path.starts_with('/') {
            errors.push(ValidationError::RelativePath {
                scope: scope.to_string(),
                path: location.path.clone(),
            });
        }
        if !seen.insert(location.path.as_str()) {
            errors.push(ValidationError::DuplicatePath {
                scope: scope.to_string(),
                path: location.path.clone(),
            });
        }
    }
}
