//! Employee operations on top of the upstream client.
//!
//! # Responsibilities
//! - Fetch employees and compute derived views (search, top earners, max salary)
//! - Resolve delete-by-id to the name the upstream deletes by
//! - Attach the failing operation to unclassified upstream failures; failures
//!   already classified pass through the derived views unchanged
//!
//! # Design Decisions
//! - Stateless: every call fetches fresh data, nothing is cached
//! - Delete is read-then-delete and not atomic; a rename between the two
//!   calls is not detected

use crate::employee::aggregate::{filter_by_name, highest_salary, top_by_salary};
use crate::employee::types::{CreateEmployeeRequest, Employee, EmployeeError, EmployeeResult};
use crate::upstream::UpstreamClient;

/// Number of employees returned by the top earners route.
pub const TOP_EARNERS_LIMIT: usize = 10;

/// Employee service facade.
#[derive(Debug, Clone)]
pub struct EmployeeService {
    upstream: UpstreamClient,
}

impl EmployeeService {
    pub fn new(upstream: UpstreamClient) -> Self {
        Self { upstream }
    }

    /// Every employee, in upstream order.
    pub async fn list_all(&self) -> EmployeeResult<Vec<Employee>> {
        tracing::info!("Fetching all employees");
        let employees = self
            .upstream
            .fetch_all()
            .await
            .map_err(|e| e.within("Failed to retrieve all employees data."))?;
        tracing::info!(count = employees.len(), "Fetched employees");
        Ok(employees)
    }

    /// One employee by id.
    pub async fn get_by_id(&self, id: &str) -> EmployeeResult<Employee> {
        tracing::info!(id, "Fetching employee");
        let employee = self
            .upstream
            .fetch_by_id(id)
            .await
            .map_err(|e| e.within("Failed to retrieve employee by id."))?
            .ok_or_else(|| {
                tracing::warn!(id, "Employee not found");
                EmployeeError::NotFound(format!("Employee with given id:{id} not found."))
            })?;
        tracing::info!(id, "Fetched employee");
        Ok(employee)
    }

    /// Employees whose name contains `query`.
    pub async fn search_by_name(&self, query: &str) -> EmployeeResult<Vec<Employee>> {
        tracing::info!(query, "Searching employees by name");
        let employees = self.list_all().await?;

        let matching = filter_by_name(employees, query);
        if matching.is_empty() {
            tracing::warn!(query, "No employees matched name search");
            return Err(EmployeeError::NotFound(format!(
                "No employees found with '{query}' containing in the names."
            )));
        }
        tracing::info!(query, count = matching.len(), "Name search matched");
        Ok(matching)
    }

    /// The `n` highest paid employees, highest first.
    pub async fn top_by_salary(&self, n: usize) -> EmployeeResult<Vec<Employee>> {
        tracing::info!(n, "Fetching top earning employees");
        let employees = self.list_all().await?;
        Ok(top_by_salary(employees, n))
    }

    /// The top [`TOP_EARNERS_LIMIT`] earners.
    pub async fn top_earners(&self) -> EmployeeResult<Vec<Employee>> {
        self.top_by_salary(TOP_EARNERS_LIMIT).await
    }

    /// Highest salary among all employees.
    pub async fn max_salary(&self) -> EmployeeResult<i32> {
        tracing::info!("Finding highest salary");
        let employees = self.list_all().await?;
        highest_salary(&employees).ok_or_else(|| {
            tracing::warn!("No employees to compare salaries");
            EmployeeError::InternalService(
                "No employees found to determine the highest salary.".to_string(),
            )
        })
    }

    /// Create an employee; returns the upstream's record.
    pub async fn create(&self, request: &CreateEmployeeRequest) -> EmployeeResult<Employee> {
        tracing::info!(name = %request.name, "Creating employee");
        let employee = self
            .upstream
            .create(request)
            .await
            .map_err(|e| e.within("Failed to create a new employee."))?;
        tracing::info!(id = %employee.id, "Created employee");
        Ok(employee)
    }

    /// Delete an employee by id; returns the deleted employee's name.
    pub async fn delete_by_id(&self, id: &str) -> EmployeeResult<String> {
        tracing::info!(id, "Deleting employee");
        let employee = self.get_by_id(id).await?;
        self.upstream
            .delete_by_name(&employee.name)
            .await
            .map_err(|e| e.within("Failed to delete employee by id."))?;
        tracing::info!(id, name = %employee.name, "Deleted employee");
        Ok(employee.name)
    }
}
