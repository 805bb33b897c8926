//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Upstream call:
//!     → per-attempt connect/request timeout (reqwest client)
//!     → On 429: retries.rs (wait backoff.rs delay, try again)
//!     → On exhaustion: internal service error
//! ```
//!
//! # Design Decisions
//! - Every upstream call has a deadline
//! - Only rate limiting is retried; every other error is final
//! - The policy is a plain value owned by the upstream client

pub mod backoff;
pub mod retries;

pub use backoff::RetryPolicy;
pub use retries::{retry_rate_limited, AttemptError};
