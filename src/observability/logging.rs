//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Configure log level via RUST_LOG with a crate-scoped default
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Log filtering is an ambient concern; it never changes server behavior

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// Honors `RUST_LOG` when set, otherwise defaults to debug output for this
/// crate only. Calling this twice panics (the global subscriber is
/// set-once), so the entry point calls it exactly once.
pub fn init() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "grpc_bootstrap=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
