//! Method rewrite hook.

use axum::http::{Method, Request};

use crate::scope::ScopeConfig;

/// Disposition returned by a fixup hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum HookResult {
    /// Carry on with request processing.
    Continue,
}

/// Method the configured rule would turn `method` into, if any.
///
/// The match is ASCII case-insensitive; the replacement keeps its
/// configured casing.
pub fn rewrite_target<'a>(config: &'a ScopeConfig, method: &str) -> Option<&'a str> {
    let (from, to) = config.replace_rule()?;
    method.eq_ignore_ascii_case(from).then_some(to)
}

/// Rewrite the request method according to the effective scope.
///
/// Never rejects the request. A replacement that is not a valid method token
/// leaves the request untouched.
pub fn rewrite_method<B>(config: &ScopeConfig, request: &mut Request<B>) -> HookResult {
    let Some(target) = rewrite_target(config, request.method().as_str()) else {
        return HookResult::Continue;
    };

    match Method::from_bytes(target.as_bytes()) {
        Ok(method) => *request.method_mut() = method,
        Err(_) => {
            tracing::warn!(
                scope = %config.label(),
                replacement = %target,
                "Configured replacement is not a valid method, leaving request unchanged"
            );
        }
    }

    HookResult::Continue
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope(args: Option<&str>) -> ScopeConfig {
        let mut cfg = ScopeConfig::directory(Some("/"));
        if let Some(args) = args {
            cfg.apply_directive(args).unwrap();
        }
        cfg
    }

    fn run(cfg: &ScopeConfig, method: &str) -> String {
        let mut req = Request::builder()
            .method(method)
            .uri("/")
            .body(())
            .unwrap();
        assert_eq!(rewrite_method(cfg, &mut req), HookResult::Continue);
        req.method().as_str().to_string()
    }

    #[test]
    fn test_replace_options_with_get() {
        let cfg = scope(Some("replace OPTIONS GET"));
        assert_eq!(run(&cfg, "options"), "GET");
        assert_eq!(run(&cfg, "OPTIONS"), "GET");
        assert_eq!(run(&cfg, "OpTiOnS"), "GET");
        assert_eq!(run(&cfg, "GET"), "GET");
        assert_eq!(run(&cfg, "POST"), "POST");
    }

    #[test]
    fn test_replacement_keeps_configured_casing() {
        let cfg = scope(Some("replace OPTIONS get"));
        assert_eq!(run(&cfg, "OPTIONS"), "get");

        let cfg = scope(Some("replace PURGE Delete"));
        assert_eq!(run(&cfg, "purge"), "Delete");
    }

    #[test]
    fn test_missing_replacement_is_inert() {
        let cfg = scope(Some("replace DELETE"));
        for method in ["DELETE", "delete", "GET", "POST", "OPTIONS"] {
            assert_eq!(run(&cfg, method), method);
        }
    }

    #[test]
    fn test_unset_action_leaves_method_unchanged() {
        let cfg = scope(None);
        for method in ["GET", "post", "Options", "PROPFIND", "x-custom"] {
            assert_eq!(run(&cfg, method), method);
        }
    }

    #[test]
    fn test_unknown_action_is_inert() {
        let cfg = scope(Some("swap OPTIONS GET"));
        assert_eq!(run(&cfg, "OPTIONS"), "OPTIONS");
    }

    #[test]
    fn test_invalid_replacement_token_is_skipped() {
        let cfg = scope(Some(r#"replace OPTIONS "BAD METHOD""#));
        assert_eq!(run(&cfg, "OPTIONS"), "OPTIONS");
    }

    #[test]
    fn test_rewrite_target() {
        let cfg = scope(Some("replace HEAD GET"));
        assert_eq!(rewrite_target(&cfg, "head"), Some("GET"));
        assert_eq!(rewrite_target(&cfg, "HEADX"), None);
    }
}
