//! Datadog HTTP series API client (`POST /api/v1/series`).

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use sendgrid2datadog_core::error::{RelayError, Result};
use sendgrid2datadog_core::MetricPoint;

use super::MetricsClient;
use crate::config::BackendSection;

const SERIES_PATH: &str = "/api/v1/series";

#[derive(Debug, Serialize)]
struct SeriesBody<'a> {
    series: [Series<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Series<'a> {
    metric: &'a str,
    points: [(u64, f64); 1],
    #[serde(rename = "type")]
    kind: &'static str,
    tags: &'a [String],
}

impl<'a> From<&'a MetricPoint> for SeriesBody<'a> {
    fn from(p: &'a MetricPoint) -> Self {
        Self {
            series: [Series {
                metric: &p.name,
                points: [(p.unix_secs(), p.value)],
                kind: p.kind.as_str(),
                tags: &p.tags,
            }],
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatadogApiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl DatadogApiClient {
    pub fn new(cfg: &BackendSection) -> Result<Self> {
        let api_key = cfg
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| RelayError::Config("DD_API_KEY is not set".into()))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .user_agent(concat!("sendgrid2datadog/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RelayError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: format!("{}{SERIES_PATH}", cfg.api_url.trim_end_matches('/')),
            api_key,
        })
    }
}

#[async_trait]
impl MetricsClient for DatadogApiClient {
    fn backend(&self) -> &'static str {
        "datadog-api"
    }

    async fn emit_counter(&self, point: &MetricPoint) -> Result<()> {
        let resp = self
            .http
            .post(&self.endpoint)
            .header("DD-API-KEY", &self.api_key)
            .json(&SeriesBody::from(point))
            .send()
            .await
            .map_err(|e| RelayError::MetricsBackendUnavailable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RelayError::MetricsBackendUnavailable(format!(
                "datadog responded {status}: {body}"
            )));
        }
        Ok(())
    }
}
