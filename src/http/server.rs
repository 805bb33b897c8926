//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all employee routes
//! - Wire up middleware (request ID, tracing, timeout, metrics)
//! - Build the upstream client and service shared by all handlers
//! - Serve until a shutdown signal arrives

use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::FacadeConfig;
use crate::employee::{EmployeeError, EmployeeResult, EmployeeService};
use crate::http::employee;
use crate::http::request::{request_id, UuidRequestId, X_REQUEST_ID};
use crate::lifecycle::{shutdown_signal, ShutdownListener};
use crate::observability::metrics;
use crate::resilience::RetryPolicy;
use crate::upstream::UpstreamClient;

/// Application state injected into handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: EmployeeService,
}

/// HTTP server for the employee facade.
pub struct HttpServer {
    router: Router,
    config: FacadeConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: FacadeConfig) -> EmployeeResult<Self> {
        let policy = RetryPolicy::from_config(&config.retries);
        let upstream = UpstreamClient::new(&config.upstream, policy)?;
        let state = AppState {
            service: EmployeeService::new(upstream),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &FacadeConfig, state: AppState) -> Router {
        Router::new()
            .route("/v1/employee/all", get(employee::list_all))
            .route("/v1/employee/highest/salary", get(employee::highest_salary))
            .route("/v1/employee/highest/top10", get(employee::top_earners))
            .route("/v1/employee/name/{search}", get(employee::search_by_name))
            .route("/v1/employee/create", post(employee::create))
            .route("/v1/employee/delete/{id}", delete(employee::delete_by_id))
            .route("/v1/employee/{id}", get(employee::get_by_id))
            .route_layer(middleware::from_fn(track_metrics))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(middleware::map_response(timeout_as_error_body))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id(request),
                )
            }))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownListener,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &FacadeConfig {
        &self.config
    }
}

/// Count and time every routed request.
async fn track_metrics(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| "unmatched".to_string(), |p| p.as_str().to_string());

    let response = next.run(request).await;
    metrics::record_request(&method, response.status().as_u16(), &route, start);
    response
}

/// Give the bare 408 from the inbound timeout the facade's JSON error body.
async fn timeout_as_error_body(response: Response) -> Response {
    if response.status() != StatusCode::REQUEST_TIMEOUT {
        return response;
    }
    EmployeeError::BadRequest("Request did not complete within the inbound timeout.".to_string())
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tower::ServiceExt;

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn server() -> HttpServer {
        let mut config = FacadeConfig::default();
        // Nothing listens here; these tests never reach the upstream.
        config.upstream.base_url = "http://127.0.0.1:9/api/v1/employee".to_string();
        HttpServer::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_unknown_route_is_404_with_request_id() {
        let response = server()
            .router()
            .oneshot(Request::get("/v2/nothing").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_client_request_id_is_echoed() {
        let response = server()
            .router()
            .oneshot(
                Request::get("/v2/nothing")
                    .header("x-request-id", "trace-me")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers()["x-request-id"], "trace-me");
    }

    #[tokio::test]
    async fn test_create_with_missing_fields_gets_error_body() {
        let response = server()
            .router()
            .oneshot(
                Request::post("/v1/employee/create")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name": "Pooja"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()["content-type"], "application/json");
        let body = json_body(response).await;
        assert_eq!(body["status"], "BAD_REQUEST");
        assert_eq!(body["message"], "BAD_REQUEST");
        assert!(body["timestamp"].is_string());
        let recommendation = body["recommendation"].as_str().unwrap();
        assert!(recommendation.starts_with("Invalid employee payload: "));
        assert!(recommendation.contains("salary"));
    }

    #[tokio::test]
    async fn test_create_without_json_content_type_gets_error_body() {
        let response = server()
            .router()
            .oneshot(
                Request::post("/v1/employee/create")
                    .body(Body::from("name=Pooja"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["status"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_timeout_response_gets_error_body() {
        let timed_out = Response::builder()
            .status(StatusCode::REQUEST_TIMEOUT)
            .body(Body::empty())
            .unwrap();

        let response = timeout_as_error_body(timed_out).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["status"], "BAD_REQUEST");
        assert_eq!(
            body["recommendation"],
            "Request did not complete within the inbound timeout."
        );
    }

    #[tokio::test]
    async fn test_other_responses_pass_through_unchanged() {
        let ok = Response::builder()
            .status(StatusCode::OK)
            .body(Body::from("Pooja"))
            .unwrap();

        let response = timeout_as_error_body(ok).await;

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"Pooja");
    }

    #[tokio::test]
    async fn test_wrong_method_on_create() {
        let response = server()
            .router()
            .oneshot(Request::get("/v1/employee/create").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
