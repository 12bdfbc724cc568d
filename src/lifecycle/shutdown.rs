//! Shutdown coordination for the server and the issue watcher.

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::lifecycle::signals::wait_for_signal;

/// Exit status used when a second signal cuts the drain short.
pub const FORCED_EXIT_CODE: i32 = 130;

/// Coordinator for graceful shutdown.
///
/// Every long-running task subscribes and stops once the broadcast fires.
/// Clones share the same channel.
#[derive(Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Fire the shutdown signal. A no-op when nobody is subscribed.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Number of tasks still subscribed.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Fire the shutdown signal when the process receives SIGINT/SIGTERM.
    ///
    /// A second signal exits the process immediately.
    pub fn trigger_on_signal(&self) -> JoinHandle<()> {
        let shutdown = self.clone();
        tokio::spawn(async move {
            wait_for_signal().await;
            shutdown.trigger();

            wait_for_signal().await;
            tracing::warn!("Second signal received, forcing exit");
            std::process::exit(FORCED_EXIT_CODE);
        })
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
