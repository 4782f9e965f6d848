//! Per-scope rewrite configuration.

use serde::Serialize;
use thiserror::Error;

use crate::directive::Words;

/// The only action with defined behavior.
pub const ACTION_REPLACE: &str = "replace";

/// Errors raised while applying a directive to a scope.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    /// The directive carried no arguments.
    #[error("Method directive requires an action")]
    MissingAction,
}

/// Where a configuration came from.
///
/// `Combined` marks a merge of mismatched kinds. Diagnostic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeKind {
    Server,
    Directory,
    Combined,
}

/// Rewrite configuration attached to one scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopeConfig {
    pub(crate) kind: ScopeKind,
    pub(crate) locally_set: bool,
    pub(crate) action: Option<String>,
    pub(crate) match_value: Option<String>,
    pub(crate) replacement: Option<String>,
    pub(crate) congenital: bool,
    pub(crate) label: String,
}

impl ScopeConfig {
    fn empty(kind: ScopeKind, label: String) -> Self {
        Self {
            kind,
            locally_set: false,
            action: None,
            match_value: None,
            replacement: None,
            congenital: false,
            label,
        }
    }

    /// Fresh server-level scope, labelled `SVR(host)`.
    pub fn server(host: Option<&str>) -> Self {
        Self::empty(
            ScopeKind::Server,
            format!("SVR({})", host.unwrap_or_default()),
        )
    }

    /// Fresh directory/path-level scope, labelled `DIR(path)`.
    pub fn directory(path: Option<&str>) -> Self {
        Self::empty(
            ScopeKind::Directory,
            format!("DIR({})", path.unwrap_or_default()),
        )
    }

    /// Apply the raw arguments of a `Method` directive.
    ///
    /// Takes up to three words: action, value, value2. Later words are
    /// ignored. The action is not validated here; anything other than
    /// `replace` is simply inert at request time.
    pub fn apply_directive(&mut self, args: &str) -> Result<(), ConfigError> {
        let mut words = Words::new(args);
        let action = words.next_word().ok_or(ConfigError::MissingAction)?;

        if !words.is_exhausted() {
            let value = words.next_word();
            let value2 = words.next_word();
            if !words.is_exhausted() {
                tracing::debug!(
                    scope = %self.label,
                    ignored = %words.remainder(),
                    "Extra Method arguments ignored"
                );
            }
            self.match_value = value;
            self.replacement = value2;
        } else {
            self.match_value = None;
            self.replacement = None;
        }

        self.locally_set = true;
        self.action = Some(action);
        Ok(())
    }

    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    pub fn is_locally_set(&self) -> bool {
        self.locally_set
    }

    /// True when some ancestor scope declared its own rule.
    pub fn is_congenital(&self) -> bool {
        self.congenital
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    pub fn match_value(&self) -> Option<&str> {
        self.match_value.as_deref()
    }

    pub fn replacement(&self) -> Option<&str> {
        self.replacement.as_deref()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The `(match, replacement)` pair when this scope carries a complete
    /// `replace` rule.
    pub fn replace_rule(&self) -> Option<(&str, &str)> {
        let action = self.action.as_deref()?;
        if !action.eq_ignore_ascii_case(ACTION_REPLACE) {
            return None;
        }
        Some((self.match_value.as_deref()?, self.replacement.as_deref()?))
    }
}
