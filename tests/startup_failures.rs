//! Startup failure behavior: bind errors are returned once, immediately,
//! and render the fatal log line the entry point writes.

use std::sync::Arc;
use std::time::Duration;

use grpc_bootstrap::config::{ListenerConfig, ServerConfig};
use grpc_bootstrap::server::{NoopHandler, Server, StartupError};

fn config_with_address(bind_address: &str) -> ServerConfig {
    ServerConfig {
        listener: ListenerConfig {
            bind_address: bind_address.to_string(),
            ..ListenerConfig::default()
        },
        ..ServerConfig::default()
    }
}

#[tokio::test]
async fn address_in_use_returns_bind_error() {
    let occupant = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let taken = occupant.local_addr().unwrap();

    let server = Server::new(config_with_address(&taken.to_string()), Arc::new(NoopHandler));
    let err = server.start().await.unwrap_err();

    assert!(matches!(err, StartupError::Bind(_)));
    assert!(err
        .fatal_message()
        .contains("failed to start gRPC server:"));
}

#[tokio::test]
async fn malformed_address_fails_without_hanging() {
    let server = Server::new(config_with_address("not-an-address"), Arc::new(NoopHandler));

    let result = tokio::time::timeout(Duration::from_secs(1), server.start())
        .await
        .expect("start must not hang on a malformed address");

    match result {
        Err(StartupError::InvalidAddress(addr)) => assert_eq!(addr, "not-an-address"),
        Err(other) => panic!("expected InvalidAddress, got {other:?}"),
        Ok(_) => panic!("expected InvalidAddress, got a bound listener"),
    }
}

#[tokio::test]
async fn bare_port_address_is_rejected() {
    // The Go-style ":50051" form is not a valid socket address here.
    let server = Server::new(config_with_address(":50051"), Arc::new(NoopHandler));
    let err = server.start().await.unwrap_err();
    assert!(matches!(err, StartupError::InvalidAddress(_)));
}
