//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware: request ID, trace, timeout, metrics)
//!     → employee.rs (route handler → EmployeeService)
//!     → response.rs (EmployeeError → status code + JSON body)
//!     → Send to client
//! ```

pub mod employee;
pub mod request;
pub mod response;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use response::ErrorBody;
pub use server::{AppState, HttpServer};
