//! Directive front end.
//!
//! # Data Flow
//! ```text
//! "Method replace OPTIONS GET"
//!     → parser.rs (keyword + raw args)
//!     → module owning the keyword
//!     → lexer.rs (words: action, value, value2)
//!     → ScopeConfig fields
//! ```

pub mod lexer;
pub mod parser;

pub use lexer::Words;
pub use parser::{parse_line, DirectiveError, DirectiveLine};
