//! Observability for Causeway.
//! `tracing` crate with `EnvFilter`, per-module log levels.

pub mod setup;

pub use setup::{init_tracing, log_filter, LOG_ENV_VAR};
