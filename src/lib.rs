//! gRPC Server Bootstrap Library
//!
//! Binds a listening TCP socket, accepts connections, and dispatches each
//! to an abstract [`ConnectionHandler`](server::ConnectionHandler). The
//! service behavior behind the port is supplied by the embedder; this crate
//! covers only the listener lifecycle: bind, accept, drain, exit.

pub mod config;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod server;

pub use config::ServerConfig;
pub use lifecycle::{Shutdown, ShutdownSignal};
pub use server::{ConnectionHandler, RunningServer, Server, StartupError};
