//! Method fixup middleware.
//!
//! Resolves the scope governing the request and runs the module's fixup
//! hook. Wrapped around the whole router (see `http::server::with_fixup`),
//! so it runs before route matching and method dispatch.

use std::sync::Arc;

use arc_swap::ArcSwap;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::module::ScopeModule;
use crate::observability::metrics;
use crate::rewrite::HookResult;
use crate::routing::Target;
use crate::scope::ScopeTree;

/// Shared handle to the currently published scope tree.
#[derive(Clone)]
pub struct FixupState {
    tree: Arc<ArcSwap<ScopeTree>>,
}

impl FixupState {
    pub fn new(tree: ScopeTree) -> Self {
        Self {
            tree: Arc::new(ArcSwap::from_pointee(tree)),
        }
    }

    /// Publish a freshly built tree. In-flight requests keep their snapshot.
    pub fn publish(&self, tree: ScopeTree) {
        self.tree.store(Arc::new(tree));
    }

    pub fn snapshot(&self) -> Arc<ScopeTree> {
        self.tree.load_full()
    }
}

/// What the fixup stage decided, attached to the request for later layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedScope {
    pub label: String,
    pub original_method: String,
}

/// Run the method rewrite ahead of dispatch.
pub async fn method_fixup(
    State(state): State<FixupState>,
    mut request: Request,
    next: Next,
) -> Response {
    let tree = state.snapshot();
    let config = tree.resolve(&Target::from_request(&request));
    let original = request.method().clone();

    match tree.module().fixup(config, &mut request) {
        HookResult::Continue => {}
    }

    if *request.method() != original {
        tracing::debug!(
            scope = %config.label(),
            from = %original,
            to = %request.method(),
            "Request method rewritten"
        );
        metrics::record_rewrite(original.as_str(), request.method().as_str(), config.label());
    } else if config.is_congenital() && !config.is_locally_set() {
        tracing::trace!(
            scope = %config.label(),
            "No local Method rule; ancestor rules are not inherited"
        );
    }
    metrics::record_request(request.method().as_str());

    request.extensions_mut().insert(ResolvedScope {
        label: config.label().to_string(),
        original_method: original.to_string(),
    });

    next.run(request).await
}
