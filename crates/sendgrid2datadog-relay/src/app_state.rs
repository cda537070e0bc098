//! Shared application state for the relay.
//!
//! Built once at startup and cloned into every handler; nothing in here is
//! mutated after construction.

use std::sync::Arc;

use sendgrid2datadog_core::error::Result;

use crate::config::RelayConfig;
use crate::sink::{self, MetricsClient};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: RelayConfig,
    metrics: Arc<dyn MetricsClient>,
}

impl AppState {
    /// Build state with the backend selected in `cfg`.
    pub async fn new(cfg: RelayConfig) -> Result<Self> {
        let metrics = sink::build_client(&cfg.backend).await?;
        tracing::info!(backend = metrics.backend(), "metrics client ready");
        Ok(Self::with_client(cfg, metrics))
    }

    /// Build state around an existing client (tests, embedding).
    pub fn with_client(cfg: RelayConfig, metrics: Arc<dyn MetricsClient>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { cfg, metrics }),
        }
    }

    pub fn cfg(&self) -> &RelayConfig {
        &self.inner.cfg
    }

    pub fn metrics(&self) -> Arc<dyn MetricsClient> {
        Arc::clone(&self.inner.metrics)
    }
}
