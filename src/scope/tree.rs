//! Scope tree construction.
//!
//! Turns the configuration sections into one frozen, effective
//! configuration per resolvable scope. All merging happens here, once per
//! load; the result answers lookups without further merging.
//!
//! Composition:
//! - main server: declared server scope with its directives
//! - virtual host: `merge_server(main, vhost)`
//! - location: fold of `merge_directory` from the server's effective scope
//!   over every location covering its path, shallowest first, main server
//!   locations ahead of the virtual host's own at equal depth

use serde::Serialize;
use thiserror::Error;

use crate::config::schema::{GatewayConfig, LocationSection};
use crate::directive::{parse_line, DirectiveError};
use crate::module::{MethodModule, ScopeModule};
use crate::routing::{
    is_segment_prefix, HostMatcher, LocationEntry, PathPrefixMatcher, ScopeRouter, ServerEntry,
    Target,
};

/// Failure while building the scope tree.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("{scope}: invalid directive '{line}': {source}")]
    Directive {
        scope: String,
        line: String,
        #[source]
        source: DirectiveError,
    },
}

/// A location as declared, before merging.
struct Declared<C> {
    path: String,
    config: C,
}

/// Effective configurations for every server and location.
#[derive(Debug)]
pub struct ScopeTree<M: ScopeModule = MethodModule> {
    module: M,
    router: ScopeRouter<M::Config>,
}

impl<M: ScopeModule> ScopeTree<M> {
    /// Build the tree for `config`, applying directives with `module`.
    pub fn build(module: M, config: &GatewayConfig) -> Result<Self, BuildError> {
        let main_name = config.server.hostname.clone().unwrap_or_default();
        let main = declare_server(
            &module,
            config.server.hostname.as_deref(),
            &config.server.directives,
            "server",
        )?;
        let main_locations = declare_locations(&module, &config.server.locations, "server")?;
        let main_entry = compose(&module, main_name, main.clone(), &main_locations);

        let mut virtual_hosts = Vec::with_capacity(config.virtual_hosts.len());
        for vhost in &config.virtual_hosts {
            let scope = format!("virtual host '{}'", vhost.server_name);
            let declared =
                declare_server(&module, Some(&vhost.server_name), &vhost.directives, &scope)?;
            let effective = module.merge_server(&main, &declared);

            let own = declare_locations(&module, &vhost.locations, &scope)?;
            let locations: Vec<&Declared<M::Config>> =
                main_locations.iter().chain(own.iter()).collect();

            let entry = compose(&module, vhost.server_name.clone(), effective, &locations);
            let names = std::iter::once(&vhost.server_name).chain(vhost.aliases.iter());
            virtual_hosts.push((HostMatcher::new(names), entry));
        }

        tracing::debug!(
            module = module.name(),
            virtual_hosts = virtual_hosts.len(),
            locations = main_entry.locations().len(),
            "Scope tree built"
        );

        Ok(Self {
            module,
            router: ScopeRouter::new(main_entry, virtual_hosts),
        })
    }

    pub fn module(&self) -> &M {
        &self.module
    }

    pub fn router(&self) -> &ScopeRouter<M::Config> {
        &self.router
    }

    /// Effective configuration governing a request target.
    pub fn resolve(&self, target: &Target<'_>) -> &M::Config {
        self.router.resolve(target)
    }
}

impl<M: ScopeModule> ScopeTree<M>
where
    M::Config: Serialize,
{
    /// Serializable view of every effective scope.
    pub fn describe(&self) -> TreeView<'_, M::Config> {
        TreeView {
            main: ServerView::of(self.router.main()),
            virtual_hosts: self.router.virtual_hosts().map(ServerView::of).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TreeView<'a, C> {
    pub main: ServerView<'a, C>,
    pub virtual_hosts: Vec<ServerView<'a, C>>,
}

#[derive(Debug, Serialize)]
pub struct ServerView<'a, C> {
    pub name: &'a str,
    pub effective: &'a C,
    pub locations: Vec<LocationView<'a, C>>,
}

#[derive(Debug, Serialize)]
pub struct LocationView<'a, C> {
    pub path: &'a str,
    pub effective: &'a C,
}

impl<'a, C> ServerView<'a, C> {
    fn of(server: &'a ServerEntry<C>) -> Self {
        Self {
            name: &server.name,
            effective: &server.effective,
            locations: server
                .locations()
                .iter()
                .map(|loc| LocationView {
                    path: loc.matcher.prefix(),
                    effective: &loc.effective,
                })
                .collect(),
        }
    }
}

fn apply_lines<M: ScopeModule>(
    module: &M,
    config: &mut M::Config,
    lines: &[String],
    scope: &str,
) -> Result<(), BuildError> {
    for raw in lines {
        apply_line(module, config, raw).map_err(|source| BuildError::Directive {
            scope: scope.to_string(),
            line: raw.clone(),
            source,
        })?;
    }
    Ok(())
}

fn apply_line<M: ScopeModule>(
    module: &M,
    config: &mut M::Config,
    raw: &str,
) -> Result<(), DirectiveError> {
    let line = parse_line(raw)?;
    if !line.is(module.directive()) {
        return Err(DirectiveError::Unknown(line.keyword));
    }
    module.apply_directive(config, line.args)?;
    Ok(())
}

fn declare_server<M: ScopeModule>(
    module: &M,
    host: Option<&str>,
    lines: &[String],
    scope: &str,
) -> Result<M::Config, BuildError> {
    let mut config = module.create_server_scope(host);
    apply_lines(module, &mut config, lines, scope)?;
    Ok(config)
}

fn declare_locations<M: ScopeModule>(
    module: &M,
    sections: &[LocationSection],
    server_scope: &str,
) -> Result<Vec<Declared<M::Config>>, BuildError> {
    sections
        .iter()
        .map(|section| {
            let scope = format!("location '{}' in {}", section.path, server_scope);
            let mut config = module.create_directory_scope(Some(&section.path));
            apply_lines(module, &mut config, &section.directives, &scope)?;
            Ok(Declared {
                path: section.path.clone(),
                config,
            })
        })
        .collect()
}

/// Precompute the effective configuration of every location.
///
/// `declared` is in declaration order; a later entry with the same path
/// shadows an earlier one in the lookup table but both take part in folds.
fn compose<M: ScopeModule, D: std::borrow::Borrow<Declared<M::Config>>>(
    module: &M,
    name: String,
    server: M::Config,
    declared: &[D],
) -> ServerEntry<M::Config> {
    let declared: Vec<&Declared<M::Config>> = declared.iter().map(|d| d.borrow()).collect();

    let entries = declared
        .iter()
        .enumerate()
        .filter(|(idx, leaf)| !declared[idx + 1..].iter().any(|later| later.path == leaf.path))
        .map(|(_, leaf)| {
            let mut chain: Vec<&Declared<M::Config>> = declared
                .iter()
                .copied()
                .filter(|candidate| is_segment_prefix(&candidate.path, &leaf.path))
                .collect();
            chain.sort_by_key(|candidate| candidate.path.len());

            let effective = chain.iter().fold(server.clone(), |parent, child| {
                module.merge_directory(&parent, &child.config)
            });

            LocationEntry {
                matcher: PathPrefixMatcher::new(leaf.path.clone()),
                effective,
            }
        })
        .collect();

    ServerEntry::new(name, server, entries)
}
