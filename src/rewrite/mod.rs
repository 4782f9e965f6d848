//! Request method rewriting.
//!
//! # Data Flow
//! ```text
//! Incoming Request
//!     → middleware.rs (snapshot scope tree, resolve host + path)
//!     → rewriter.rs (apply replace rule to the method)
//!     → method dispatch / handler
//! ```

pub mod middleware;
pub mod rewriter;

pub use middleware::{method_fixup, FixupState, ResolvedScope};
pub use rewriter::{rewrite_method, rewrite_target, HookResult};
