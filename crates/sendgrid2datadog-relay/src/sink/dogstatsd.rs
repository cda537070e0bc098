//! DogStatsD client (UDP, fire-and-forget datagrams).
//!
//! Wire format: `<name>:<value>|c|#tag1,tag2|T<unix secs>`.

use async_trait::async_trait;
use tokio::net::UdpSocket;

use sendgrid2datadog_core::error::{RelayError, Result};
use sendgrid2datadog_core::MetricPoint;

use super::MetricsClient;

#[derive(Debug)]
pub struct DogStatsdClient {
    socket: UdpSocket,
}

impl DogStatsdClient {
    /// Resolve the agent, bind an ephemeral local port of the same family,
    /// and fix the agent as the peer.
    pub async fn connect(addr: &str) -> Result<Self> {
        let agent = tokio::net::lookup_host(addr)
            .await
            .map_err(|e| RelayError::Config(format!("dogstatsd address {addr}: {e}")))?
            .next()
            .ok_or_else(|| RelayError::Config(format!("dogstatsd address {addr} did not resolve")))?;

        let local = if agent.is_ipv6() { "[::]:0" } else { "0.0.0.0:0" };
        let socket = UdpSocket::bind(local)
            .await
            .map_err(|e| RelayError::Config(format!("udp bind failed: {e}")))?;
        socket
            .connect(agent)
            .await
            .map_err(|e| RelayError::Config(format!("dogstatsd address {addr}: {e}")))?;
        Ok(Self { socket })
    }
}

pub(crate) fn encode(point: &MetricPoint) -> String {
    let mut line = format!("{}:{}|c", point.name, point.value);
    if !point.tags.is_empty() {
        line.push_str("|#");
        line.push_str(&point.tags.join(","));
    }
    line.push_str(&format!("|T{}", point.unix_secs()));
    line
}

#[async_trait]
impl MetricsClient for DogStatsdClient {
    fn backend(&self) -> &'static str {
        "dogstatsd"
    }

    async fn emit_counter(&self, point: &MetricPoint) -> Result<()> {
        self.socket
            .send(encode(point).as_bytes())
            .await
            .map_err(|e| RelayError::MetricsBackendUnavailable(e.to_string()))?;
        Ok(())
    }
}
