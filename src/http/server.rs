//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the echo handler
//! - Wire up middleware (tracing, request ID, timeout)
//! - Wrap the whole router in the method fixup so it runs before dispatch
//! - Bind server to listener
//! - Rebuild and publish scope trees on config updates

use std::convert::Infallible;
use std::time::Duration;

use axum::{
    extract::Request,
    middleware,
    response::Response,
    routing::any,
    Router, ServiceExt as _,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::{util::BoxCloneService, Layer, ServiceBuilder};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::http::request::{UuidRequestId, X_REQUEST_ID};
use crate::http::response::echo_handler;
use crate::module::MethodModule;
use crate::observability::metrics;
use crate::rewrite::{method_fixup, FixupState};
use crate::scope::{BuildError, ScopeTree};

/// A router wrapped in the method fixup, ready to serve.
pub type App = BoxCloneService<Request, Response, Infallible>;

/// Wrap `router` so the method fixup sees every request before method
/// dispatch. `Router::layer` would run it after dispatch.
pub fn with_fixup(router: Router, fixup: FixupState) -> App {
    let service = middleware::from_fn_with_state(fixup, method_fixup).layer(router);
    BoxCloneService::new(service)
}

/// HTTP server hosting the method rewrite module.
pub struct HttpServer {
    app: App,
    fixup: FixupState,
}

impl HttpServer {
    /// Build the scope tree for `config` and assemble the service.
    pub fn new(config: GatewayConfig) -> Result<Self, BuildError> {
        let tree = ScopeTree::build(MethodModule, &config)?;
        let fixup = FixupState::new(tree);
        let app = with_fixup(Self::build_router(&config), fixup.clone());

        Ok(Self { app, fixup })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig) -> Router {
        let timeout = Duration::from_secs(config.timeouts.request_secs);
        Router::new()
            .route("/", any(echo_handler))
            .route("/{*path}", any(echo_handler))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID.clone(), UuidRequestId))
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID.clone()))
                    .layer(TimeoutLayer::new(timeout)),
            )
    }

    /// The assembled service, for in-process use.
    pub fn app(&self) -> App {
        self.app.clone()
    }

    /// Run the server until `shutdown` fires.
    ///
    /// Configurations arriving on `config_updates` replace the scope tree;
    /// one that fails to build is logged and dropped.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<GatewayConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let fixup = self.fixup.clone();
        tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                match ScopeTree::build(MethodModule, &config) {
                    Ok(tree) => {
                        fixup.publish(tree);
                        metrics::record_reload(true);
                        tracing::info!("Scope tree reloaded");
                    }
                    Err(e) => {
                        metrics::record_reload(false);
                        tracing::error!(
                            error = %e,
                            "Rejected reloaded config, keeping current scopes"
                        );
                    }
                }
            }
        });

        axum::serve(listener, self.app.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
