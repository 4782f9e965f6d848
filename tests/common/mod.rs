//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use method_rewrite::config::{parse_config, GatewayConfig};
use method_rewrite::http::EchoBody;
use method_rewrite::{HttpServer, Shutdown};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

/// A gateway running on an ephemeral port.
pub struct Gateway {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    #[allow(dead_code)]
    pub config_tx: mpsc::UnboundedSender<GatewayConfig>,
    pub client: reqwest::Client,
}

impl Gateway {
    /// Send a request and decode the echo body.
    pub async fn send(&self, method: &str, host: Option<&str>, path: &str) -> EchoBody {
        let method = reqwest::Method::from_bytes(method.as_bytes()).unwrap();
        let mut req = self.client.request(method, format!("http://{}{}", self.addr, path));
        if let Some(host) = host {
            req = req.header("host", host);
        }
        let res = req.send().await.expect("Gateway unreachable");
        assert_eq!(res.status(), 200);
        res.json().await.unwrap()
    }
}

impl Drop for Gateway {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a gateway for the given TOML site configuration.
pub async fn start_gateway(toml: &str) -> Gateway {
    let config = parse_config(toml).unwrap();
    let server = HttpServer::new(config).unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let (config_tx, config_rx) = mpsc::unbounded_channel();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, config_rx, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;

    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();

    Gateway {
        addr,
        shutdown,
        config_tx,
        client,
    }
}
