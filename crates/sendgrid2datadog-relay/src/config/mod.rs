//! Relay config loader (strict YAML, then environment overrides).

pub mod schema;

use std::fs;

use sendgrid2datadog_core::error::{RelayError, Result};

pub use schema::{BackendKind, BackendSection, RelayConfig, RelaySection};

/// Env var naming an optional YAML config file.
pub const CONFIG_PATH_ENV: &str = "RELAY_CONFIG";

/// Build the startup config from the process environment.
pub fn load() -> Result<RelayConfig> {
    load_with(|k| std::env::var(k).ok())
}

pub fn load_with<F>(lookup: F) -> Result<RelayConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = match lookup(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
        Some(path) => parse_file(&path)?,
        None => RelayConfig::default(),
    };
    cfg.apply_env(lookup)?;
    cfg.validate()?;
    Ok(cfg)
}

fn parse_file(path: &str) -> Result<RelayConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| RelayError::Config(format!("read config {path} failed: {e}")))?;
    parse_str(&s)
}

/// Parse YAML without validating; secrets and overrides come later.
pub fn parse_str(s: &str) -> Result<RelayConfig> {
    serde_yaml::from_str(s).map_err(|e| RelayError::Config(format!("invalid yaml: {e}")))
}
