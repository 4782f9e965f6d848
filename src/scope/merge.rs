//! Scope merging.
//!
//! The child's rule fields always win verbatim, unset included. A merge only
//! recomputes the bookkeeping: locality comes from the child, the congenital
//! flag records whether the parent or any of its ancestors declared a rule,
//! and mismatched kinds collapse to `Combined`.

use crate::scope::config::{ScopeConfig, ScopeKind};

/// Merge a directory scope into its parent.
pub fn merge_directory(parent: &ScopeConfig, child: &ScopeConfig) -> ScopeConfig {
    combine(parent, child)
}

/// Merge a server overlay (e.g. a virtual host) onto its base server.
pub fn merge_server(base: &ScopeConfig, overlay: &ScopeConfig) -> ScopeConfig {
    combine(base, overlay)
}

fn combine(parent: &ScopeConfig, child: &ScopeConfig) -> ScopeConfig {
    let kind = if parent.kind == child.kind {
        parent.kind
    } else {
        ScopeKind::Combined
    };

    ScopeConfig {
        kind,
        locally_set: child.locally_set,
        action: child.action.clone(),
        match_value: child.match_value.clone(),
        replacement: child.replacement.clone(),
        congenital: parent.congenital || parent.locally_set,
        label: child.label.clone(),
    }
}
