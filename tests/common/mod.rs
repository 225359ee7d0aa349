//! Shared utilities for integration testing.

use std::net::SocketAddr;

use page_router::config::{PageConfig, RedirectConfig, RouterConfig};
use page_router::lifecycle::Shutdown;
use page_router::HttpServer;

/// A route table close to the shipped one: dashboard pages plus legacy
/// redirects.
pub fn sample_config() -> RouterConfig {
    let mut config = RouterConfig::default();
    config.pages = vec![
        page("landing", "/"),
        page("login", "/login"),
        page("earn", "/dashboard/earn"),
        page("portfolios", "/dashboard/portfolios"),
        page("portfolio-detail", "/dashboard/portfolios/$id"),
        redirect_page(
            "yield-legacy",
            "/dashboard/yield",
            "/dashboard/earn",
            Some("tab=yield"),
        ),
    ];
    config
}

pub fn page(name: &str, path: &str) -> PageConfig {
    PageConfig {
        name: name.to_string(),
        path: path.to_string(),
        redirect: None,
    }
}

pub fn redirect_page(name: &str, path: &str, to: &str, query: Option<&str>) -> PageConfig {
    PageConfig {
        name: name.to_string(),
        path: path.to_string(),
        redirect: Some(RedirectConfig {
            to: to.to_string(),
            query: query.map(str::to_string),
        }),
    }
}

/// Start the router on an ephemeral loopback port.
///
/// Returns the bound address and the shutdown handle; trigger it to
/// stop the server.
pub async fn spawn_router(config: RouterConfig) -> (SocketAddr, Shutdown) {
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config).expect("route table should build");

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("ephemeral port should bind");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}
