//! Scope resolution subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (host, path)
//!     → matcher.rs (Target extraction, host / path conditions)
//!     → router.rs (virtual host, then deepest location)
//!     → Return: effective configuration for the request
//!
//! Compilation (at startup / reload):
//!     scope tree builder
//!     → ServerEntry per server with precomputed location scopes
//!     → Freeze as immutable ScopeRouter
//! ```
//!
//! # Design Decisions
//! - Compiled at load time, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always resolves to the same scope
//! - Unmatched hosts fall back to the main server

pub mod matcher;
pub mod router;

pub use matcher::{is_segment_prefix, HostMatcher, Matcher, PathPrefixMatcher, Target};
pub use router::{LocationEntry, ScopeRouter, ServerEntry};
