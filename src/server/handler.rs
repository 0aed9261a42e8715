//! Connection handler seam.
//!
//! The wire protocol served on the listening port is not defined by this
//! crate. A real service plugs in here; the bootstrap only accepts
//! connections and hands each one to the configured handler.

use std::net::SocketAddr;

use async_trait::async_trait;
use tokio::net::TcpStream;

/// Capability invoked once per accepted connection.
///
/// Implementations own the stream for the connection's lifetime. Errors are
/// logged by the accept loop and never terminate the server.
#[async_trait]
pub trait ConnectionHandler: Send + Sync {
    async fn handle(&self, stream: TcpStream, peer: SocketAddr) -> std::io::Result<()>;
}

/// Stand-in handler used until a real service is wired in.
///
/// Logs the peer and closes the connection without reading or writing.
pub struct NoopHandler;

#[async_trait]
impl ConnectionHandler for NoopHandler {
    async fn handle(&self, _stream: TcpStream, peer: SocketAddr) -> std::io::Result<()> {
        tracing::debug!(peer_addr = %peer, "No service configured; closing connection");
        Ok(())
    }
}
