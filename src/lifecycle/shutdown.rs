//! Shutdown coordination.
//!
//! The facade has one long-running task (the HTTP server), but tests start
//! several facades in one process and stop each by dropping its handle. A
//! `watch` channel keeps the latched state, so a listener created after
//! the trigger still sees it.

use tokio::sync::watch;

/// Owner side: flips the facade into the stopping state exactly once.
#[derive(Debug)]
pub struct Shutdown {
    stopping: watch::Sender<bool>,
}

/// Listener side, handed to [`HttpServer::run`](crate::http::HttpServer::run).
#[derive(Debug, Clone)]
pub struct ShutdownListener {
    stopping: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (stopping, _) = watch::channel(false);
        Self { stopping }
    }

    pub fn subscribe(&self) -> ShutdownListener {
        ShutdownListener {
            stopping: self.stopping.subscribe(),
        }
    }

    /// Latch the stopping state; later calls are no-ops.
    pub fn trigger(&self) {
        let first = !self.stopping.send_replace(true);
        if first {
            tracing::info!(listeners = self.stopping.receiver_count(), "Shutdown requested");
        }
    }

    pub fn is_triggered(&self) -> bool {
        *self.stopping.borrow()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownListener {
    /// Resolves once shutdown is triggered. Never resolves if the owning
    /// [`Shutdown`] is dropped without a trigger.
    pub async fn triggered(mut self) {
        let owner_gone = self.stopping.wait_for(|stopping| *stopping).await.is_err();
        if owner_gone {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_trigger_reaches_every_listener() {
        let shutdown = Shutdown::new();
        let first = shutdown.subscribe();
        let second = shutdown.subscribe();

        shutdown.trigger();
        first.triggered().await;
        second.triggered().await;
        assert!(shutdown.is_triggered());
    }

    #[tokio::test]
    async fn test_late_listener_sees_earlier_trigger() {
        let shutdown = Shutdown::new();
        shutdown.trigger();
        shutdown.trigger();

        let late = shutdown.subscribe();
        tokio::time::timeout(Duration::from_secs(1), late.triggered())
            .await
            .expect("latched shutdown should resolve immediately");
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_owner_does_not_stop_listeners() {
        let shutdown = Shutdown::new();
        let listener = shutdown.subscribe();
        drop(shutdown);

        let waited = tokio::time::timeout(Duration::from_secs(60), listener.triggered()).await;
        assert!(waited.is_err());
    }
}
