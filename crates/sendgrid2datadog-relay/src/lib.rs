//! sendgrid2datadog relay library entry.
//!
//! Wires config, the metrics backend clients, and the HTTP handlers into an
//! axum router. Consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod error;
pub mod ops;
pub mod router;
pub mod sink;
pub mod webhook;
