//! Shared utilities for integration tests: a mock upstream and a running facade.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use employee_facade::{FacadeConfig, HttpServer, Shutdown};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Path the mock upstream serves the employee resource under.
pub const UPSTREAM_PATH: &str = "/api/v1/employee";

/// Serve `router` on an ephemeral local port.
pub async fn spawn_upstream(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    addr
}

/// Facade configuration pointing at a mock upstream, with a short retry delay.
pub fn facade_config(upstream: SocketAddr, retry_delay: Duration) -> FacadeConfig {
    let mut config = FacadeConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.upstream.base_url = format!("http://{upstream}{UPSTREAM_PATH}");
    config.upstream.request_timeout_secs = 5;
    config.retries.delay_ms = retry_delay.as_millis() as u64;
    config
}

/// A running facade; dropping it stops the server.
pub struct Facade {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl Facade {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for Facade {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the facade on an ephemeral port.
pub async fn start_facade(config: FacadeConfig) -> Facade {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    Facade { addr, shutdown }
}

/// Mock upstream plus facade with a 50ms retry delay.
#[allow(dead_code)]
pub async fn start_with_upstream(router: Router) -> Facade {
    let upstream = spawn_upstream(router).await;
    start_facade(facade_config(upstream, Duration::from_millis(50))).await
}

/// HTTP client that never reuses connections or goes through a proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Upstream representation of an employee.
#[allow(dead_code)]
pub fn employee(id: &str, name: &str, salary: i32) -> Value {
    json!({
        "id": id,
        "employee_name": name,
        "employee_salary": salary,
        "employee_age": 30,
        "employee_title": "Engineer",
        "employee_email": format!("{}@company.com", name.to_lowercase()),
    })
}

/// Upstream `{ data, status }` envelope.
#[allow(dead_code)]
pub fn envelope(data: Value) -> Value {
    json!({ "data": data, "status": "Successfully processed request." })
}
