//! Shared helpers for relay integration tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{body::Body, http::Request, Router};
use sendgrid2datadog_core::error::{RelayError, Result};
use sendgrid2datadog_core::MetricPoint;
use sendgrid2datadog_relay::{
    app_state::AppState, config::RelayConfig, router::build_router, sink::MetricsClient,
};

/// Records every point; optionally fails on the n-th call (0-based).
#[derive(Default)]
pub struct RecordingClient {
    points: Mutex<Vec<MetricPoint>>,
    fail_at: Option<usize>,
    calls: Mutex<usize>,
}

impl RecordingClient {
    pub fn failing_at(n: usize) -> Self {
        Self {
            fail_at: Some(n),
            ..Self::default()
        }
    }

    pub fn points(&self) -> Vec<MetricPoint> {
        self.points.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl MetricsClient for RecordingClient {
    fn backend(&self) -> &'static str {
        "recording"
    }

    async fn emit_counter(&self, point: &MetricPoint) -> Result<()> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            let c = *calls;
            *calls += 1;
            c
        };
        if self.fail_at == Some(call) {
            return Err(RelayError::MetricsBackendUnavailable("rate limited".into()));
        }
        self.points.lock().unwrap().push(point.clone());
        Ok(())
    }
}

pub fn app_with(cfg: RelayConfig, client: Arc<RecordingClient>) -> Router {
    build_router(AppState::with_client(cfg, client))
}

pub fn app(client: Arc<RecordingClient>) -> Router {
    app_with(RelayConfig::default(), client)
}

pub fn post_webhook(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_string(resp: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    String::from_utf8(bytes.to_vec()).unwrap()
}
