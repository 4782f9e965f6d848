//! Scope lookup.
//!
//! # Responsibilities
//! - Store effective configurations per server and per location
//! - Pick the virtual host for a request, falling back to the main server
//! - Pick the deepest covering location, falling back to the server scope
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) host and location scans (acceptable for typical config sizes)
//! - Locations kept longest-prefix first so the first hit is the deepest

use crate::routing::matcher::{HostMatcher, Matcher, PathPrefixMatcher, Target};

/// A location and its precomputed effective configuration.
#[derive(Debug, Clone)]
pub struct LocationEntry<C> {
    pub matcher: PathPrefixMatcher,
    pub effective: C,
}

/// A server (main or virtual host) with its locations.
#[derive(Debug, Clone)]
pub struct ServerEntry<C> {
    pub name: String,
    pub effective: C,
    locations: Vec<LocationEntry<C>>,
}

impl<C> ServerEntry<C> {
    pub fn new(
        name: impl Into<String>,
        effective: C,
        mut locations: Vec<LocationEntry<C>>,
    ) -> Self {
        // Stable: equal prefixes keep their build order.
        locations.sort_by(|a, b| b.matcher.prefix().len().cmp(&a.matcher.prefix().len()));
        Self {
            name: name.into(),
            effective,
            locations,
        }
    }

    pub fn locations(&self) -> &[LocationEntry<C>] {
        &self.locations
    }

    /// Deepest location covering `path`, else the server scope.
    fn lookup(&self, path: &str) -> &C {
        self.locations
            .iter()
            .find(|loc| loc.matcher.covers(path))
            .map(|loc| &loc.effective)
            .unwrap_or(&self.effective)
    }
}

/// Maps requests to the effective configuration governing them.
#[derive(Debug, Clone)]
pub struct ScopeRouter<C> {
    main: ServerEntry<C>,
    virtual_hosts: Vec<(HostMatcher, ServerEntry<C>)>,
}

impl<C> ScopeRouter<C> {
    pub fn new(main: ServerEntry<C>, virtual_hosts: Vec<(HostMatcher, ServerEntry<C>)>) -> Self {
        Self {
            main,
            virtual_hosts,
        }
    }

    pub fn main(&self) -> &ServerEntry<C> {
        &self.main
    }

    pub fn virtual_hosts(&self) -> impl Iterator<Item = &ServerEntry<C>> {
        self.virtual_hosts.iter().map(|(_, server)| server)
    }

    /// Server whose name or alias matches the request host.
    pub fn server_for(&self, target: &Target<'_>) -> &ServerEntry<C> {
        self.virtual_hosts
            .iter()
            .find(|(matcher, _)| matcher.matches(target))
            .map(|(_, server)| server)
            .unwrap_or(&self.main)
    }

    /// Effective configuration for the request.
    pub fn resolve(&self, target: &Target<'_>) -> &C {
        self.server_for(target).lookup(target.path)
    }
}
