use std::net::SocketAddr;

use serde::Deserialize;
use sendgrid2datadog_core::error::{RelayError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelayConfig {
    pub version: u32,

    #[serde(default)]
    pub relay: RelaySection,

    #[serde(default)]
    pub backend: BackendSection,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            version: 1,
            relay: RelaySection::default(),
            backend: BackendSection::default(),
        }
    }
}

impl RelayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(RelayError::Config(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.relay.validate()?;
        self.backend.validate()?;

        Ok(())
    }

    /// Overlay process environment variables.
    ///
    /// `lookup` is `std::env::var(..).ok()` in production; tests pass a map.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| lookup(k).filter(|v| !v.is_empty());

        if let Some(key) = get("DD_API_KEY") {
            self.backend.api_key = Some(key);
        }
        if let Some(prefix) = get("METRIC_PREFIX") {
            self.relay.metric_prefix = prefix;
        }
        if let Some(port) = get("PORT") {
            let port: u16 = port
                .parse()
                .map_err(|_| RelayError::Config(format!("PORT is not a valid port: {port}")))?;
            let mut addr = self.relay.listen_addr()?;
            addr.set_port(port);
            self.relay.listen = addr.to_string();
        }

        let host = get("DOGSTATSD_HOST");
        let port = get("DOGSTATSD_PORT");
        if host.is_some() || port.is_some() {
            let (cur_host, cur_port) = split_host_port(&self.backend.statsd_addr)
                .map(|(h, p)| (h.to_string(), p))
                .unwrap_or_else(|| ("127.0.0.1".to_string(), 8125));
            let port = match port {
                Some(p) => p.parse::<u16>().map_err(|_| {
                    RelayError::Config(format!("DOGSTATSD_PORT is not a valid port: {p}"))
                })?,
                None => cur_port,
            };
            self.backend.statsd_addr = join_host_port(host.as_deref().unwrap_or(&cur_host), port);
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Metric names are `<metric_prefix>.event.<event type>`.
    #[serde(default = "default_metric_prefix")]
    pub metric_prefix: String,

    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for RelaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            metric_prefix: default_metric_prefix(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl RelaySection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if self.metric_prefix.is_empty() {
            return Err(RelayError::Config("relay.metric_prefix must not be empty".into()));
        }
        if !self
            .metric_prefix
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.'))
        {
            return Err(RelayError::Config(
                "relay.metric_prefix may only contain [A-Za-z0-9_.-]".into(),
            ));
        }
        if self.metric_prefix.ends_with('.') {
            return Err(RelayError::Config(
                "relay.metric_prefix must not end with '.'".into(),
            ));
        }
        if !(1..=16 * 1024 * 1024).contains(&self.max_body_bytes) {
            return Err(RelayError::Config(
                "relay.max_body_bytes must be between 1 and 16777216".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            RelayError::Config(format!("relay.listen must be a valid SocketAddr: {}", self.listen))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_metric_prefix() -> String {
    "sendgrid".into()
}
fn default_max_body_bytes() -> usize {
    1024 * 1024
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Datadog HTTP series API, authenticated with `DD_API_KEY`.
    #[default]
    Api,
    /// Local DogStatsD agent over UDP.
    Dogstatsd,
}

#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendSection {
    #[serde(default)]
    pub kind: BackendKind,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Only ever set from the environment.
    #[serde(skip)]
    pub api_key: Option<String>,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_statsd_addr")]
    pub statsd_addr: String,

    /// Static tags attached to every point.
    #[serde(default)]
    pub tags: Vec<String>,
}

// api_key stays out of logs
impl std::fmt::Debug for BackendSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendSection")
            .field("kind", &self.kind)
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_ms", &self.timeout_ms)
            .field("statsd_addr", &self.statsd_addr)
            .field("tags", &self.tags)
            .finish()
    }
}

impl Default for BackendSection {
    fn default() -> Self {
        Self {
            kind: BackendKind::default(),
            api_url: default_api_url(),
            api_key: None,
            timeout_ms: default_timeout_ms(),
            statsd_addr: default_statsd_addr(),
            tags: Vec::new(),
        }
    }
}

impl BackendSection {
    pub fn validate(&self) -> Result<()> {
        if !(100..=60000).contains(&self.timeout_ms) {
            return Err(RelayError::Config(
                "backend.timeout_ms must be between 100 and 60000".into(),
            ));
        }
        match self.kind {
            BackendKind::Api => {
                if self.api_key.as_deref().unwrap_or_default().is_empty() {
                    return Err(RelayError::Config(
                        "DD_API_KEY must be set for the api backend".into(),
                    ));
                }
                if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
                    return Err(RelayError::Config(
                        "backend.api_url must be an http(s) URL".into(),
                    ));
                }
            }
            BackendKind::Dogstatsd => {
                if split_host_port(&self.statsd_addr).is_none() {
                    return Err(RelayError::Config(format!(
                        "backend.statsd_addr must be host:port or [ipv6]:port: {}",
                        self.statsd_addr
                    )));
                }
            }
        }
        Ok(())
    }
}

fn default_api_url() -> String {
    "https://api.datadoghq.com".into()
}
fn default_timeout_ms() -> u64 {
    10000
}
fn default_statsd_addr() -> String {
    "127.0.0.1:8125".into()
}

/// Split `host:port` or `[v6]:port`. Hostnames are allowed (resolved at
/// connect time); the port must be a `u16` and the host non-empty.
pub fn split_host_port(addr: &str) -> Option<(&str, u16)> {
    let (host, port) = if let Some(rest) = addr.strip_prefix('[') {
        let (host, tail) = rest.split_once(']')?;
        (host, tail.strip_prefix(':')?)
    } else {
        let (host, port) = addr.rsplit_once(':')?;
        // bare IPv6 needs brackets
        if host.contains(':') {
            return None;
        }
        (host, port)
    };

    if host.is_empty() || host.chars().any(char::is_whitespace) {
        return None;
    }
    let port = port.parse::<u16>().ok()?;
    Some((host, port))
}

fn join_host_port(host: &str, port: u16) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}
