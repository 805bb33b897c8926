//! Error responses.
//!
//! Every failure becomes a JSON body with the status name, a timestamp and
//! the failure text as the recommendation. No internal detail beyond that
//! text is exposed.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::employee::EmployeeError;

/// JSON body returned for every failed request.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub recommendation: String,
}

impl ErrorBody {
    pub fn new(status: StatusCode, recommendation: impl Into<String>) -> Self {
        let name = status_name(status);
        Self {
            status: name.clone(),
            timestamp: Utc::now(),
            message: name,
            recommendation: recommendation.into(),
        }
    }
}

/// Upper snake case name of a status, e.g. `NOT_FOUND`.
pub fn status_name(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("UNKNOWN")
        .to_uppercase()
        .replace([' ', '-'], "_")
}

/// HTTP status for each failure kind.
pub fn status_for(err: &EmployeeError) -> StatusCode {
    match err {
        EmployeeError::NotFound(_) => StatusCode::NOT_FOUND,
        EmployeeError::CreateFailed(_) | EmployeeError::DeleteFailed(_) => StatusCode::BAD_REQUEST,
        EmployeeError::InternalService(_) => StatusCode::INTERNAL_SERVER_ERROR,
        // Unclassified failures stay in the client error band.
        EmployeeError::Upstream(_) | EmployeeError::BadRequest(_) => StatusCode::BAD_REQUEST,
    }
}

impl IntoResponse for EmployeeError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "Request failed");
        } else {
            tracing::warn!(status = %status, error = %self, "Request failed");
        }
        (status, Json(ErrorBody::new(status, self.to_string()))).into_response()
    }
}
