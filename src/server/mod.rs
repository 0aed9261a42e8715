//! Server bootstrap subsystem.
//!
//! # Data Flow
//! ```text
//! ServerConfig + ConnectionHandler
//!     → bootstrap.rs (Server::start → bind)
//!     → RunningServer::serve (accept loop)
//!     → handler.rs (one handler call per connection)
//!
//! Startup failure:
//!     StartupError → entry point → fatal log + non-zero exit
//! ```
//!
//! # Design Decisions
//! - The handler is an abstract capability; no protocol is assumed here
//! - Binding and serving are separate steps so callers observe bind
//!   failures before anything blocks

pub mod bootstrap;
pub mod handler;

pub use bootstrap::{RunningServer, Server, StartupError};
pub use handler::{ConnectionHandler, NoopHandler};
