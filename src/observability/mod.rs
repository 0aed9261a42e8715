//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via tracing
//! - Connection ID flows through per-connection spans
//! - No metrics endpoint: this layer only bootstraps a listener

pub mod logging;
