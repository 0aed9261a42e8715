//! gRPC Server Bootstrap
//!
//! Process entry point. Binds the listener on the built-in default address
//! and serves until SIGTERM/SIGINT. Any startup failure is fatal: one
//! error log line with the cause, then a non-zero exit.
//!
//! No command-line arguments or environment variables are read for
//! addressing; the listen address is a fixed default.

use std::sync::Arc;

use grpc_bootstrap::config::ServerConfig;
use grpc_bootstrap::lifecycle::{self, Shutdown};
use grpc_bootstrap::observability::logging;
use grpc_bootstrap::server::{NoopHandler, Server};

/// Exit status for the fatal startup path. Never zero.
const STARTUP_FAILURE_EXIT: i32 = 1;

#[tokio::main]
async fn main() {
    logging::init();

    tracing::info!("grpc-bootstrap v0.1.0 starting");

    let config = ServerConfig::default();

    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_connections = config.listener.max_connections,
        shutdown_grace_secs = config.shutdown.grace_secs,
        "Configuration loaded"
    );

    let server = Server::new(config, Arc::new(NoopHandler));

    // The entry point alone decides to terminate on startup failure.
    let running = match server.start().await {
        Ok(running) => running,
        Err(e) => {
            tracing::error!("{}", e.fatal_message());
            std::process::exit(STARTUP_FAILURE_EXIT);
        }
    };

    let shutdown = Shutdown::new();
    let shutdown_signal = shutdown.subscribe();

    tokio::spawn(async move {
        lifecycle::wait_for_signal().await;
        shutdown.trigger();
    });

    running.serve(shutdown_signal).await;

    tracing::info!("Shutdown complete");
}
