//! End-to-end tests through a running gateway.

use std::time::Duration;

use method_rewrite::config::parse_config;

mod common;

const SITE: &str = r#"
[server]
hostname = "www.example.com"

[[server.locations]]
path = "/app"
directives = ["Method replace OPTIONS GET"]

[[server.locations]]
path = "/inert"
directives = ["Method replace DELETE"]

[[server.locations]]
path = "/app/raw"

[[virtual_hosts]]
server_name = "api.example.com"
directives = ["Method replace PURGE DELETE"]
"#;

#[tokio::test]
async fn test_replace_options_with_get() {
    let gw = common::start_gateway(SITE).await;

    let body = gw.send("options", None, "/app/index").await;
    assert_eq!(body.method, "GET");
    assert_eq!(body.original_method, "options");
    assert_eq!(body.scope.as_deref(), Some("DIR(/app)"));

    let body = gw.send("OPTIONS", None, "/app").await;
    assert_eq!(body.method, "GET");

    let body = gw.send("GET", None, "/app").await;
    assert_eq!(body.method, "GET");

    let body = gw.send("POST", None, "/app").await;
    assert_eq!(body.method, "POST");
}

#[tokio::test]
async fn test_rule_without_replacement_is_inert() {
    let gw = common::start_gateway(SITE).await;

    for method in ["DELETE", "delete", "GET", "POST", "OPTIONS"] {
        let body = gw.send(method, None, "/inert/x").await;
        assert_eq!(body.method, method);
        assert_eq!(body.scope.as_deref(), Some("DIR(/inert)"));
    }
}

#[tokio::test]
async fn test_nested_location_without_rule_does_not_inherit() {
    let gw = common::start_gateway(SITE).await;

    let body = gw.send("OPTIONS", None, "/app/raw/file").await;
    assert_eq!(body.method, "OPTIONS");
    assert_eq!(body.scope.as_deref(), Some("DIR(/app/raw)"));

    let body = gw.send("OPTIONS", None, "/elsewhere").await;
    assert_eq!(body.method, "OPTIONS");
    assert_eq!(body.scope.as_deref(), Some("SVR(www.example.com)"));
}

#[tokio::test]
async fn test_virtual_host_rule() {
    let gw = common::start_gateway(SITE).await;

    let body = gw.send("purge", Some("api.example.com"), "/cache").await;
    assert_eq!(body.method, "DELETE");
    assert_eq!(body.scope.as_deref(), Some("SVR(api.example.com)"));

    // Main server locations still apply inside the virtual host.
    let body = gw.send("options", Some("API.EXAMPLE.COM"), "/app").await;
    assert_eq!(body.method, "GET");

    let body = gw.send("purge", Some("www.example.com"), "/cache").await;
    assert_eq!(body.method, "PURGE");
}

#[tokio::test]
async fn test_request_id_assigned() {
    let gw = common::start_gateway(SITE).await;

    let body = gw.send("GET", None, "/").await;
    assert!(body.request_id.is_some());
}

#[tokio::test]
async fn test_config_reload_swaps_rules() {
    let gw = common::start_gateway(SITE).await;

    let body = gw.send("PATCH", None, "/app").await;
    assert_eq!(body.method, "PATCH");

    let reloaded = parse_config(
        r#"
        [[server.locations]]
        path = "/app"
        directives = ["Method replace PATCH PUT"]
        "#,
    )
    .unwrap();
    gw.config_tx.send(reloaded).unwrap();

    let mut method = String::new();
    for _ in 0..50 {
        method = gw.send("PATCH", None, "/app").await.method;
        if method == "PUT" {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(method, "PUT");

    // A config that fails to build leaves the current scopes in place.
    let broken = parse_config(
        r#"
        [server]
        directives = ["Method"]
        "#,
    )
    .unwrap();
    gw.config_tx.send(broken).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let body = gw.send("PATCH", None, "/app").await;
    assert_eq!(body.method, "PUT");
}
