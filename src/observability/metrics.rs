//! Metrics collection and exposition.
//!
//! # Metrics
//! - `method_requests_total` (counter): requests past the fixup stage, by final method
//! - `method_rewrites_total` (counter): rewrites by original method, new method, scope
//! - `method_scope_reloads_total` (counter): scope tree reloads by outcome
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; without an installed recorder
//!   every call is a no-op
//! - Prometheus exporter only when enabled in config
//! - Method labels are limited to the standard methods; anything else is
//!   counted as `other` so clients cannot mint new series

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Label value for a request method.
fn method_label(method: &str) -> &'static str {
    match method {
        "GET" => "GET",
        "HEAD" => "HEAD",
        "POST" => "POST",
        "PUT" => "PUT",
        "DELETE" => "DELETE",
        "CONNECT" => "CONNECT",
        "OPTIONS" => "OPTIONS",
        "TRACE" => "TRACE",
        "PATCH" => "PATCH",
        _ => "other",
    }
}

pub fn record_request(method: &str) {
    counter!("method_requests_total", "method" => method_label(method)).increment(1);
}

pub fn record_rewrite(from: &str, to: &str, scope: &str) {
    counter!(
        "method_rewrites_total",
        "from" => method_label(from),
        "to" => method_label(to),
        "scope" => scope.to_string()
    )
    .increment(1);
}

pub fn record_reload(success: bool) {
    let outcome = if success { "success" } else { "failure" };
    counter!("method_scope_reloads_total", "outcome" => outcome).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_label() {
        assert_eq!(method_label("GET"), "GET");
        assert_eq!(method_label("OPTIONS"), "OPTIONS");
        assert_eq!(method_label("PATCH"), "PATCH");
        assert_eq!(method_label("get"), "other");
        assert_eq!(method_label("PURGE"), "other");
        assert_eq!(method_label(""), "other");
    }

    #[test]
    fn test_extension_methods_share_one_series() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            for i in 0..200 {
                let method = format!("JUNK{i}");
                record_request(&method);
                record_rewrite(&method, "GET", "SVR()");
            }
            record_request("GET");
        });

        let rendered = handle.render();
        let series = |name: &str| {
            rendered
                .lines()
                .filter(|line| line.starts_with(&format!("{name}{{")))
                .count()
        };
        assert_eq!(series("method_requests_total"), 2);
        assert_eq!(series("method_rewrites_total"), 1);
        assert!(rendered.contains(r#"method_requests_total{method="other"} 200"#));
        assert!(!rendered.contains("JUNK"));
    }
}
