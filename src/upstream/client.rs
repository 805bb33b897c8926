//! Upstream employee service client with retry and error classification.
//!
//! # Responsibilities
//! - Issue GET/POST/DELETE against one configured base URL
//! - Enforce connect and per-attempt timeouts
//! - Retry rate-limited calls according to the held [`RetryPolicy`]
//! - Classify non-success statuses into the operation's failure

use std::time::{Duration, Instant};

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::UpstreamConfig;
use crate::employee::types::{
    CreateEmployeeRequest, DeleteEmployeeRequest, Employee, EmployeeError, EmployeeResult,
    ItemEnvelope, ListEnvelope,
};
use crate::observability::metrics;
use crate::resilience::{retry_rate_limited, AttemptError, RetryPolicy};

/// Kind of upstream call, which decides how a rejection is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamOp {
    Fetch,
    Create,
    Delete,
}

impl UpstreamOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Create => "create",
            Self::Delete => "delete",
        }
    }

    /// Failure for a non-success, non-rate-limited upstream status.
    pub fn rejection(self, status: StatusCode) -> EmployeeError {
        match self {
            Self::Fetch => EmployeeError::InternalService(format!(
                "Failed to fetch employees data. (upstream status {status})"
            )),
            Self::Create => EmployeeError::CreateFailed(format!(
                "Failed to create employee (upstream status {status})"
            )),
            Self::Delete => EmployeeError::DeleteFailed(format!(
                "Failed to delete employee (upstream status {status})"
            )),
        }
    }
}

/// HTTP client for the upstream employee service.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: Url,
    policy: RetryPolicy,
}

impl UpstreamClient {
    /// Create a client for the configured upstream.
    pub fn new(config: &UpstreamConfig, policy: RetryPolicy) -> EmployeeResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            EmployeeError::InternalService(format!(
                "Invalid upstream URL '{}': {}",
                config.base_url, e
            ))
        })?;

        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        tracing::info!(
            base_url = %base_url,
            max_attempts = policy.max_attempts(),
            retry_delay = ?policy.delay(),
            "Upstream client initialized"
        );

        Ok(Self {
            http,
            base_url,
            policy,
        })
    }

    /// `GET {base}`: every employee, in upstream order.
    pub async fn fetch_all(&self) -> EmployeeResult<Vec<Employee>> {
        let url = self.base_url.clone();
        tracing::debug!(url = %url, "Fetching employees");
        let envelope: ListEnvelope = self
            .send_json(UpstreamOp::Fetch, || self.http.get(url.clone()))
            .await?;
        Ok(envelope.data)
    }

    /// `GET {base}/{id}`: one employee, `None` when the upstream has no data.
    pub async fn fetch_by_id(&self, id: &str) -> EmployeeResult<Option<Employee>> {
        let url = self.item_url(id)?;
        tracing::debug!(url = %url, "Fetching employee");
        let envelope: ItemEnvelope = self
            .send_json(UpstreamOp::Fetch, || self.http.get(url.clone()))
            .await?;
        Ok(envelope.data)
    }

    /// `POST {base}`: create an employee and return the upstream's copy.
    pub async fn create(&self, request: &CreateEmployeeRequest) -> EmployeeResult<Employee> {
        let url = self.base_url.clone();
        tracing::debug!(url = %url, name = %request.name, "Creating employee");
        let envelope: ItemEnvelope = self
            .send_json(UpstreamOp::Create, || self.http.post(url.clone()).json(request))
            .await?;
        envelope.data.ok_or_else(|| {
            EmployeeError::InternalService(
                "Upstream returned no employee after creation".to_string(),
            )
        })
    }

    /// `DELETE {base}` with `{ "name": ... }`.
    pub async fn delete_by_name(&self, name: &str) -> EmployeeResult<()> {
        let url = self.base_url.clone();
        tracing::debug!(url = %url, name, "Deleting employee");
        let body = DeleteEmployeeRequest { name };
        let start = Instant::now();
        let result = self
            .send(UpstreamOp::Delete, || self.http.delete(url.clone()).json(&body))
            .await;
        let outcome = result.as_ref().map_or_else(failure_label, |_| "success");
        record_outcome(UpstreamOp::Delete, outcome, start);
        result.map(drop)
    }

    /// The held retry policy.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    fn item_url(&self, id: &str) -> EmployeeResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                EmployeeError::InternalService(format!(
                    "Upstream URL '{}' cannot take a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    async fn send_json<T, F>(&self, op: UpstreamOp, build: F) -> EmployeeResult<T>
    where
        T: DeserializeOwned,
        F: Fn() -> RequestBuilder,
    {
        let start = Instant::now();
        let response = match self.send(op, build).await {
            Ok(response) => response,
            Err(e) => {
                record_outcome(op, failure_label(&e), start);
                return Err(e);
            }
        };
        match response.json::<T>().await {
            Ok(body) => {
                record_outcome(op, "success", start);
                Ok(body)
            }
            Err(e) => {
                record_outcome(op, "decode_error", start);
                Err(EmployeeError::Upstream(format!("Malformed upstream response: {e}")))
            }
        }
    }

    /// Send a request built by `build`, retrying while rate limited.
    async fn send<F>(&self, op: UpstreamOp, build: F) -> EmployeeResult<Response>
    where
        F: Fn() -> RequestBuilder,
    {
        let build = &build;
        retry_rate_limited(&self.policy, op.as_str(), move || async move {
            let response = build().send().await.map_err(|e| {
                tracing::warn!(operation = op.as_str(), error = %e, "Upstream unreachable");
                AttemptError::Failed(e.into())
            })?;
            classify(op, response)
        })
        .await
    }
}

/// Metric label for an upstream call that failed before its body was read.
fn failure_label(err: &EmployeeError) -> &'static str {
    match err {
        EmployeeError::Upstream(_) => "transport_error",
        _ => "rejected",
    }
}

/// Record one upstream call exactly once, after its body was consumed.
fn record_outcome(op: UpstreamOp, outcome: &'static str, start: Instant) {
    metrics::record_upstream_call(op.as_str(), outcome);
    tracing::debug!(
        operation = op.as_str(),
        outcome,
        elapsed = ?start.elapsed(),
        "Upstream call finished"
    );
}

impl std::fmt::Debug for UpstreamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamClient")
            .field("base_url", &self.base_url.as_str())
            .field("policy", &self.policy)
            .finish()
    }
}
