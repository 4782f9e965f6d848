//! Configuration word tokenizer.
//!
//! # Rules
//! - Leading whitespace is skipped
//! - A word opening with `"` or `'` runs to the matching unescaped quote;
//!   a backslash in front of that quote character is dropped
//! - Any other word runs to the next whitespace
//! - An unterminated quote consumes the rest of the input
//! - Whitespace trailing a word is consumed with it, so an exhausted input
//!   is always the empty string

/// Cursor over a raw argument string, yielding one word at a time.
#[derive(Debug, Clone)]
pub struct Words<'a> {
    rest: &'a str,
}

impl<'a> Words<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            rest: input.trim_start(),
        }
    }

    /// Returns true when no input is left.
    pub fn is_exhausted(&self) -> bool {
        self.rest.is_empty()
    }

    /// The unconsumed remainder of the input.
    pub fn remainder(&self) -> &'a str {
        self.rest
    }

    /// Take the next word, or `None` once the input is exhausted.
    pub fn next_word(&mut self) -> Option<String> {
        if self.rest.is_empty() {
            return None;
        }

        let word = match self.rest.chars().next() {
            Some(quote @ ('"' | '\'')) => {
                let body = &self.rest[1..];
                let end = find_closing_quote(body, quote);
                let word = unescape_quote(&body[..end], quote);
                // Skip the closing quote when there is one.
                let consumed = if end < body.len() { end + 2 } else { end + 1 };
                self.rest = &self.rest[consumed..];
                word
            }
            _ => {
                let end = self
                    .rest
                    .find(char::is_whitespace)
                    .unwrap_or(self.rest.len());
                let word = self.rest[..end].to_string();
                self.rest = &self.rest[end..];
                word
            }
        };

        self.rest = self.rest.trim_start();
        Some(word)
    }
}

impl Iterator for Words<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_word()
    }
}

/// Byte offset of the first `quote` in `body` not preceded by a backslash,
/// or `body.len()` when the quote is never closed.
fn find_closing_quote(body: &str, quote: char) -> usize {
    let mut escaped = false;
    for (idx, ch) in body.char_indices() {
        if ch == quote && !escaped {
            return idx;
        }
        escaped = ch == '\\' && !escaped;
    }
    body.len()
}

fn unescape_quote(raw: &str, quote: char) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\\' && chars.peek() == Some(&quote) {
            continue;
        }
        out.push(ch);
    }
    out
}
