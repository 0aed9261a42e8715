//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio::task::JoinHandle;

use grpc_bootstrap::config::{ListenerConfig, ServerConfig, ShutdownConfig};
use grpc_bootstrap::lifecycle::Shutdown;
use grpc_bootstrap::net::ConnectionTracker;
use grpc_bootstrap::server::{ConnectionHandler, Server};

/// Config bound to an ephemeral loopback port with a short grace period.
pub fn loopback_config(grace_secs: u64) -> ServerConfig {
    ServerConfig {
        listener: ListenerConfig {
            bind_address: "127.0.0.1:0".to_string(),
            max_connections: 16,
        },
        shutdown: ShutdownConfig { grace_secs },
    }
}

/// Start a server with the given handler and run its accept loop.
///
/// Returns the bound address, the shutdown coordinator, a handle for
/// observing active connections, and the serve task.
pub async fn spawn_server(
    config: ServerConfig,
    handler: Arc<dyn ConnectionHandler>,
) -> (SocketAddr, Shutdown, ConnectionTracker, JoinHandle<()>) {
    let running = Server::new(config, handler)
        .start()
        .await
        .expect("bind ephemeral port");
    let addr = running.local_addr().unwrap();
    let connections = running.connections();

    let shutdown = Shutdown::new();
    let signal = shutdown.subscribe();
    let handle = tokio::spawn(async move {
        running.serve(signal).await;
    });

    (addr, shutdown, connections, handle)
}

/// Handler that echoes bytes back until the client closes its half.
///
/// Keeps the connection active for as long as the client holds it open,
/// which makes drain behavior observable.
pub struct EchoHandler;

#[async_trait]
impl ConnectionHandler for EchoHandler {
    async fn handle(&self, mut stream: TcpStream, _peer: SocketAddr) -> std::io::Result<()> {
        let (mut reader, mut writer) = stream.split();
        tokio::io::copy(&mut reader, &mut writer).await?;
        Ok(())
    }
}

/// Collects formatted log output so tests can assert on it.
#[derive(Clone, Default)]
pub struct CapturedOutput {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedOutput {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for CapturedOutput {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedOutput {
    type Writer = CapturedOutput;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
