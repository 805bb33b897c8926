//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     trigger() latches the stopping state → every listener wakes,
//!     including ones subscribed after the trigger → server drains and exits
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT or a Shutdown trigger → graceful shutdown future resolves
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownListener};
pub use signals::shutdown_signal;
