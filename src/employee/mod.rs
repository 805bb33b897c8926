//! Employee domain.
//!
//! # Data Flow
//! ```text
//! HTTP handler
//!     → service.rs (operation, logging, error wrapping)
//!     → upstream client (fetch / create / delete)
//!     → aggregate.rs (search, top-N, max salary over the fetched list)
//! ```

pub mod aggregate;
pub mod service;
pub mod types;

pub use service::{EmployeeService, TOP_EARNERS_LIMIT};
pub use types::{CreateEmployeeRequest, Employee, EmployeeError, EmployeeResult};
