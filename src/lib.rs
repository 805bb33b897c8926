//! Employee facade library.
//!
//! A REST facade over an upstream employee service: list, lookup, search,
//! top earners, highest salary, create and delete, with retries on upstream
//! rate limiting.

pub mod config;
pub mod employee;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod upstream;

pub use config::FacadeConfig;
pub use employee::{EmployeeError, EmployeeService};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
