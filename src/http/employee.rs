//! Employee route handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;

use crate::employee::{CreateEmployeeRequest, Employee, EmployeeError};
use crate::http::server::AppState;

/// `GET /v1/employee/all`
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<Employee>>, EmployeeError> {
    state.service.list_all().await.map(Json)
}

/// `GET /v1/employee/{id}`
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Employee>, EmployeeError> {
    state.service.get_by_id(&id).await.map(Json)
}

/// `GET /v1/employee/name/{searchStr}`
pub async fn search_by_name(
    State(state): State<AppState>,
    Path(search): Path<String>,
) -> Result<Json<Vec<Employee>>, EmployeeError> {
    state.service.search_by_name(&search).await.map(Json)
}

/// `GET /v1/employee/highest/salary`
pub async fn highest_salary(State(state): State<AppState>) -> Result<Json<i32>, EmployeeError> {
    state.service.max_salary().await.map(Json)
}

/// `GET /v1/employee/highest/top10`
pub async fn top_earners(State(state): State<AppState>) -> Result<Json<Vec<Employee>>, EmployeeError> {
    state.service.top_earners().await.map(Json)
}

/// `POST /v1/employee/create`
///
/// A body that is not a valid creation request is answered with the same
/// JSON error body as every other failure.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateEmployeeRequest>, JsonRejection>,
) -> Result<Json<Employee>, EmployeeError> {
    let Json(request) = payload.map_err(|rejection| {
        EmployeeError::BadRequest(format!("Invalid employee payload: {}", rejection.body_text()))
    })?;
    state.service.create(&request).await.map(Json)
}

/// `DELETE /v1/employee/delete/{id}`, answers with the deleted name as plain text.
pub async fn delete_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<String, EmployeeError> {
    state.service.delete_by_id(&id).await
}
