//! Shutdown coordination.
//!
//! One coordinator, one interested party: the accept loop. A watch channel
//! carries the "shutdown requested" state rather than a one-shot event, so
//! a trigger that fires before the loop starts waiting is still observed.

use tokio::sync::watch;

/// Coordinator for the accepting → draining transition.
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// Create a signal the accept loop can wait on.
    pub fn subscribe(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Request shutdown. Idempotent; later calls are no-ops.
    pub fn trigger(&self) {
        let _ = self.tx.send(true);
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// The accept loop's view of the shutdown state.
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Resolve once shutdown has been requested.
    ///
    /// Also resolves if the coordinator was dropped: with nobody left able
    /// to request shutdown, the server stops instead of running unreachable.
    pub async fn triggered(&mut self) {
        let _ = self.rx.wait_for(|requested| *requested).await;
    }
}
