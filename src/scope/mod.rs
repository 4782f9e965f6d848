//! Scope configuration subsystem.
//!
//! # Data Flow
//! ```text
//! Load phase (single-threaded):
//!     server / virtual host / location sections
//!     → config.rs (declared ScopeConfig per section, directives applied)
//!     → merge.rs (server overlays, then location chains)
//!     → tree.rs (frozen effective ScopeConfig per resolvable scope)
//!
//! Request phase (read-only):
//!     (host, path) → tree.rs resolve → &ScopeConfig
//! ```
//!
//! # Design Decisions
//! - Scopes are immutable once their tree is built
//! - Merging is pure and non-commutative: the child's rule always wins
//! - The congenital flag and kind are bookkeeping only; they never gate a rewrite

pub mod config;
pub mod merge;
pub mod tree;

pub use config::{ConfigError, ScopeConfig, ScopeKind, ACTION_REPLACE};
pub use merge::{merge_directory, merge_server};
pub use tree::{BuildError, ScopeTree};
