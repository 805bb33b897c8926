//! Upstream employee service integration.
//!
//! # Data Flow
//! ```text
//! EmployeeService
//!     → client.rs (build request, per-attempt timeout)
//!     → resilience::retries (retry while 429)
//!     → status classification → EmployeeError
//!     → envelope decoding ({ data, status })
//! ```
//!
//! # Upstream Contract
//! - `GET {base}` → `{ data: [Employee], status }`
//! - `GET {base}/{id}` → `{ data: Employee | null, status }`
//! - `POST {base}` with `{ name, salary, age, title }` → `{ data: Employee, status }`
//! - `DELETE {base}` with `{ name }` → status only

pub mod client;

pub use client::{UpstreamClient, UpstreamOp};
