//! Top-level facade crate for sendgrid2datadog.
//!
//! Re-exports core types and the relay library so users can depend on a single crate.

pub mod core {
    pub use sendgrid2datadog_core::*;
}

pub mod relay {
    pub use sendgrid2datadog_relay::*;
}
