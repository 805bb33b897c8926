//! Employee records, upstream envelopes and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An employee as held by the upstream service.
///
/// Field names on the wire follow the upstream contract and are reused
/// unchanged in the facade's own responses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Employee {
    pub id: String,

    #[serde(rename = "employee_name")]
    pub name: String,

    #[serde(rename = "employee_salary")]
    pub salary: i32,

    #[serde(rename = "employee_age")]
    pub age: i32,

    #[serde(rename = "employee_title")]
    pub title: String,

    #[serde(rename = "employee_email")]
    pub email: String,
}

/// Payload accepted by `POST /v1/employee/create` and forwarded upstream.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CreateEmployeeRequest {
    pub name: String,
    pub salary: i32,
    pub age: i32,
    pub title: String,
}

/// Body of the upstream delete call; the upstream deletes by name.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteEmployeeRequest<'a> {
    pub name: &'a str,
}

/// Upstream `{ data, status }` envelope around a list of employees.
#[derive(Debug, Clone, Deserialize)]
pub struct ListEnvelope {
    #[serde(default)]
    pub data: Vec<Employee>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Upstream `{ data, status }` envelope around a single, possibly absent, employee.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemEnvelope {
    #[serde(default)]
    pub data: Option<Employee>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Failures surfaced by the facade.
///
/// Upstream conditions are classified into one of these once, at the HTTP
/// boundary, and carried unchanged up to the router.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmployeeError {
    /// The requested id or search matched nothing.
    #[error("{0}")]
    NotFound(String),

    /// Upstream rejected the creation.
    #[error("{0}")]
    CreateFailed(String),

    /// Upstream rejected the deletion.
    #[error("{0}")]
    DeleteFailed(String),

    /// Upstream failure, exhausted retries, or nothing to aggregate.
    #[error("{0}")]
    InternalService(String),

    /// Transport, timeout or decoding failure not yet tied to an operation.
    #[error("{0}")]
    Upstream(String),

    /// Inbound request the facade could not process: an undecodable body
    /// or a request that outlived the inbound timeout.
    #[error("{0}")]
    BadRequest(String),
}

impl EmployeeError {
    /// Attach the failing operation to an unclassified failure.
    ///
    /// Already classified failures pass through untouched.
    pub fn within(self, operation: &str) -> Self {
        match self {
            Self::Upstream(cause) => {
                tracing::error!(operation, error = %cause, "Upstream call failed");
                Self::InternalService(format!("{operation} : {cause}"))
            }
            other => other,
        }
    }
}

impl From<reqwest::Error> for EmployeeError {
    fn from(err: reqwest::Error) -> Self {
        Self::Upstream(err.to_string())
    }
}

/// Result type for employee operations.
pub type EmployeeResult<T> = Result<T, EmployeeError>;
