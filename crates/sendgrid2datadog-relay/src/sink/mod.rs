//! Metrics backend clients.
//!
//! The relay only needs one capability from the monitoring side: submit a
//! single counter point and report whether it landed. Retry, batching and
//! auth live (or don't) inside each implementation.

pub mod datadog_api;
pub mod dogstatsd;

use std::sync::Arc;

use async_trait::async_trait;
use sendgrid2datadog_core::error::Result;
use sendgrid2datadog_core::MetricPoint;

use crate::config::{BackendKind, BackendSection};

pub use datadog_api::DatadogApiClient;
pub use dogstatsd::DogStatsdClient;

#[async_trait]
pub trait MetricsClient: Send + Sync {
    /// Short backend name for logs.
    fn backend(&self) -> &'static str;

    /// Submit one counter point. Errors are `MetricsBackendUnavailable`.
    async fn emit_counter(&self, point: &MetricPoint) -> Result<()>;
}

/// Construct the client selected by `backend.kind`.
pub async fn build_client(cfg: &BackendSection) -> Result<Arc<dyn MetricsClient>> {
    let client: Arc<dyn MetricsClient> = match cfg.kind {
        BackendKind::Api => Arc::new(DatadogApiClient::new(cfg)?),
        BackendKind::Dogstatsd => Arc::new(DogStatsdClient::connect(&cfg.statsd_addr).await?),
    };
    Ok(client)
}
