//! Server bootstrap: bind, accept, dispatch.
//!
//! # Responsibilities
//! - Bind the configured listener (fail fast on any startup error)
//! - Accept connections until shutdown, one spawned task per connection
//! - Drain active connections within the grace period at shutdown
//!
//! # Design Decisions
//! - Startup failures propagate as values; only the entry point exits
//! - Accept-time errors are logged and swallowed (not startup failures)
//! - No internal retry: a failed bind is returned once, immediately

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing::Instrument;

use crate::config::ServerConfig;
use crate::lifecycle::ShutdownSignal;
use crate::net::{ConnectionTracker, Listener};
use crate::server::handler::ConnectionHandler;

/// Error kind for any failure to bind or initialize the listener.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The configured address is not a valid host:port specifier.
    #[error("invalid listen address {0:?}")]
    InvalidAddress(String),

    /// The OS refused the bind (address in use, permission denied, ...).
    #[error("failed to bind listener: {0}")]
    Bind(#[source] std::io::Error),
}

impl StartupError {
    /// The log line the entry point writes before a fatal exit.
    pub fn fatal_message(&self) -> String {
        format!("failed to start gRPC server: {self}")
    }
}

/// Server bootstrap.
///
/// Owns the configuration and the connection handler; [`Server::start`]
/// binds the listener and hands back a [`RunningServer`].
pub struct Server {
    config: ServerConfig,
    handler: Arc<dyn ConnectionHandler>,
}

impl Server {
    /// Create a new server bootstrap with the given configuration and handler.
    pub fn new(config: ServerConfig, handler: Arc<dyn ConnectionHandler>) -> Self {
        Self { config, handler }
    }

    /// Bind the listener.
    ///
    /// Returns immediately with a [`StartupError`] on any failure; the
    /// caller decides whether that is fatal. On success the port is held
    /// for the life of the returned [`RunningServer`].
    pub async fn start(self) -> Result<RunningServer, StartupError> {
        let listener = Listener::bind(&self.config.listener).await?;

        Ok(RunningServer {
            listener,
            handler: self.handler,
            tracker: ConnectionTracker::new(),
            grace: Duration::from_secs(self.config.shutdown.grace_secs),
        })
    }
}

/// A server whose listener is bound and ready to accept.
pub struct RunningServer {
    listener: Listener,
    handler: Arc<dyn ConnectionHandler>,
    tracker: ConnectionTracker,
    grace: Duration,
}

impl std::fmt::Debug for RunningServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunningServer")
            .field("grace", &self.grace)
            .finish_non_exhaustive()
    }
}

impl RunningServer {
    /// The address the listener is bound to.
    ///
    /// Useful when binding port 0 in tests.
    pub fn local_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.listener.local_addr()
    }

    /// Handle for observing the connections currently being served.
    ///
    /// The handle stays valid after [`RunningServer::serve`] consumes the
    /// server, so callers can watch the count rise and fall.
    pub fn connections(&self) -> ConnectionTracker {
        self.tracker.clone()
    }

    /// Run the accept loop until the shutdown signal fires.
    ///
    /// Each accepted connection runs in its own task, holding its
    /// backpressure permit and tracker guard until the handler returns.
    /// After the signal: stop accepting, then drain up to the grace period.
    pub async fn serve(self, mut shutdown: ShutdownSignal) {
        if let Ok(addr) = self.listener.local_addr() {
            tracing::info!(address = %addr, "Accepting connections");
        }

        loop {
            tokio::select! {
                _ = shutdown.triggered() => {
                    tracing::info!("Shutdown requested; no longer accepting");
                    break;
                }
                accepted = self.listener.accept() => {
                    match accepted {
                        Ok((stream, peer, permit)) => {
                            let guard = self.tracker.track();
                            let handler = Arc::clone(&self.handler);
                            let span = tracing::debug_span!(
                                "connection",
                                connection_id = %guard.id(),
                                peer_addr = %peer,
                            );
                            tokio::spawn(
                                async move {
                                    let _permit = permit;
                                    let _guard = guard;
                                    if let Err(e) = handler.handle(stream, peer).await {
                                        tracing::warn!(error = %e, "Connection handler failed");
                                    }
                                }
                                .instrument(span),
                            );
                        }
                        Err(e) => {
                            // Transient accept failures must not kill the server.
                            tracing::warn!(error = %e, "Failed to accept connection");
                        }
                    }
                }
            }
        }

        if self.tracker.drain(self.grace).await {
            tracing::info!("All connections drained");
        } else {
            tracing::warn!(
                active = self.tracker.active_count(),
                grace_secs = self.grace.as_secs(),
                "Grace period elapsed with connections still active"
            );
        }
    }
}
