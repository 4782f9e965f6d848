//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → rewrite::middleware (fixup stage wrapping the router: resolve
//!       scope, rewrite method)
//!     → method dispatch
//!     → server.rs layers (trace / request-id / timeout)
//!     → response.rs (echo of the post-fixup request)
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{request_id, UuidRequestId, X_REQUEST_ID};
pub use response::{echo_handler, EchoBody};
pub use server::{with_fixup, App, HttpServer};
