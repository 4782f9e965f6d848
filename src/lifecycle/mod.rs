//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Build scope tree → Start listener
//!
//! Shutdown (shutdown.rs):
//!     Signal received (signals.rs) → trigger → server drains and exits
//! ```
//!
//! # Design Decisions
//! - Fail fast: a config or directive error aborts startup
//! - Listener starts last (traffic only when scopes are ready)

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
