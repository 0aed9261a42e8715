//! TCP listener implementation with backpressure.
//!
//! # Responsibilities
//! - Bind to the configured address
//! - Accept incoming TCP connections
//! - Enforce max_connections limit via semaphore
//! - Graceful handling of accept errors

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Semaphore;

use crate::config::ListenerConfig;
use crate::server::StartupError;

/// TCP listener that caps concurrent connections.
///
/// Accepting takes a slot from a semaphore sized by `max_connections`;
/// when no slot is free, the accept call waits until a serving
/// connection finishes.
#[derive(Debug)]
pub struct Listener {
    /// The underlying TCP listener.
    inner: TcpListener,
    /// Semaphore holding the connection slots.
    connection_limit: Arc<Semaphore>,
}

impl Listener {
    /// Bind to the configured address with connection limits.
    ///
    /// Address syntax is checked here; everything else (port in use,
    /// permission denied) surfaces from the OS bind call. Startup
    /// failures are returned to the caller, never retried.
    pub async fn bind(config: &ListenerConfig) -> Result<Self, StartupError> {
        let addr: SocketAddr = config
            .bind_address
            .parse()
            .map_err(|_| StartupError::InvalidAddress(config.bind_address.clone()))?;

        let listener = TcpListener::bind(addr).await.map_err(StartupError::Bind)?;
        let local_addr = listener.local_addr().map_err(StartupError::Bind)?;

        tracing::info!(
            address = %local_addr,
            max_connections = config.max_connections,
            "Listener bound"
        );

        Ok(Self {
            inner: listener,
            connection_limit: Arc::new(Semaphore::new(config.max_connections)),
        })
    }

    /// Accept the next connection once a slot is free.
    ///
    /// The returned [`ConnectionPermit`] is the slot itself; the caller
    /// moves it into the connection's task and keeps it until the
    /// handler returns.
    pub async fn accept(
        &self,
    ) -> Result<(TcpStream, SocketAddr, ConnectionPermit), std::io::Error> {
        // Acquire permit first (backpressure)
        let permit = self
            .connection_limit
            .clone()
            .acquire_owned()
            .await
            .expect("Semaphore closed unexpectedly");

        let (stream, addr) = self.inner.accept().await?;

        tracing::debug!(
            peer_addr = %addr,
            available_permits = self.connection_limit.available_permits(),
            "Connection accepted"
        );

        Ok((stream, addr, ConnectionPermit { _permit: permit }))
    }

    /// Get the local address this listener is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.inner.local_addr()
    }

    /// Get current available connection slots.
    pub fn available_permits(&self) -> usize {
        self.connection_limit.available_permits()
    }
}

/// One connection slot, held while the connection is served.
///
/// The slot comes back on drop, whether the handler returned or its
/// task panicked.
#[derive(Debug)]
pub struct ConnectionPermit {
    _permit: tokio::sync::OwnedSemaphorePermit,
}
