//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML), optional
//!     → loader.rs (parse & deserialize, env override)
//!     → validation.rs (semantic checks)
//!     → FacadeConfig (validated, immutable)
//!     → split into per-subsystem settings at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, resolve_config, ConfigError};
pub use schema::{
    FacadeConfig, ListenerConfig, ObservabilityConfig, RetryConfig, TimeoutConfig,
    UpstreamConfig,
};
pub use validation::ValidationError;
