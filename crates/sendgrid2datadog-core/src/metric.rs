//! Metric point derived from a webhook event.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::Result;
use crate::event::SendGridEvent;

/// Metric type as understood by the monitoring backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
}

impl MetricKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
        }
    }
}

/// A single timestamped datum. Built, emitted, dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricPoint {
    pub name: String,
    pub value: f64,
    pub timestamp: SystemTime,
    pub kind: MetricKind,
    pub tags: Vec<String>,
}

impl MetricPoint {
    /// `<prefix>.event.<event type>`, value 1, stamped with the event time.
    pub fn counter_for(prefix: &str, event: &SendGridEvent) -> Result<Self> {
        Ok(Self {
            name: metric_name(prefix, &event.event),
            value: 1.0,
            timestamp: event.occurred_at()?,
            kind: MetricKind::Counter,
            tags: Vec::new(),
        })
    }

    pub fn with_tags(mut self, tags: &[String]) -> Self {
        self.tags.extend_from_slice(tags);
        self
    }

    /// Seconds since the Unix epoch (0 for pre-epoch times, which the
    /// event decoder cannot produce).
    pub fn unix_secs(&self) -> u64 {
        self.timestamp
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
    }
}

pub fn metric_name(prefix: &str, event_type: &str) -> String {
    format!("{prefix}.event.{event_type}")
}
