//! sendgrid2datadog core: transport-agnostic event schema, metric model and errors.
//!
//! This crate defines the SendGrid Event Webhook payload, the metric point
//! derived from each event, and the error surface shared with the relay. It
//! carries no HTTP or runtime dependencies so it can be reused by other
//! frontends (a CLI replayer, a queue consumer).
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `RelayError`/`Result` so a malformed
//! webhook can never take the process down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod event;
pub mod metric;

/// Shared result type.
pub use error::{Result, RelayError};
pub use event::{decode_events, SendGridEvent};
pub use metric::{MetricKind, MetricPoint};
