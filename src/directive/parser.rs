//! Directive line parsing.
//!
//! A configuration line is a keyword followed by raw arguments. The keyword
//! is matched case-insensitively; the arguments are handed to the owning
//! module untouched so it can tokenize them itself.

use thiserror::Error;

use crate::directive::lexer::Words;
use crate::scope::ConfigError;

/// Errors raised while reading a directive line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DirectiveError {
    /// The line holds no keyword at all.
    #[error("empty directive line")]
    Empty,

    /// No module handles this keyword.
    #[error("unknown directive '{0}'")]
    Unknown(String),

    /// The module rejected the arguments.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A directive line split into keyword and raw arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveLine<'a> {
    pub keyword: String,
    pub args: &'a str,
}

impl DirectiveLine<'_> {
    /// Case-insensitive keyword comparison.
    pub fn is(&self, keyword: &str) -> bool {
        self.keyword.eq_ignore_ascii_case(keyword)
    }
}

/// Split a configuration line into its keyword and raw arguments.
pub fn parse_line(line: &str) -> Result<DirectiveLine<'_>, DirectiveError> {
    let mut words = Words::new(line);
    let keyword = words.next_word().ok_or(DirectiveError::Empty)?;

    Ok(DirectiveLine {
        keyword,
        args: words.remainder(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        let line = parse_line("  Method replace OPTIONS GET").unwrap();
        assert_eq!(line.keyword, "Method");
        assert_eq!(line.args, "replace OPTIONS GET");
        assert!(line.is("method"));
        assert!(line.is("METHOD"));
        assert!(!line.is("Header"));
    }

    #[test]
    fn test_keyword_only() {
        let line = parse_line("Method").unwrap();
        assert_eq!(line.args, "");
    }

    #[test]
    fn test_empty_line() {
        assert_eq!(parse_line("   "), Err(DirectiveError::Empty));
    }
}
