//! Bridge configuration: defaults, then environment, then command-line flags.

use anyhow::{bail, Context, Result};
use beyondsight_api::DEFAULT_BASE_URL;
use clap::Parser;

pub const ENV_BASE_URL: &str = "MCP_BRIDGE_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "MCP_BRIDGE_TIMEOUT_SECS";
pub const ENV_MAX_IN_FLIGHT: &str = "MCP_BRIDGE_MAX_IN_FLIGHT";
pub const ENV_LOG_LEVEL: &str = "MCP_BRIDGE_LOG_LEVEL";

/// Stdio MCP bridge for the BeyondSight tool backend.
#[derive(Debug, Default, Parser)]
#[command(name = "mcp-bridge", version, about, long_about = None)]
pub struct Cli {
    /// Tool listing URL of the backend; tools are invoked at <URL>/<tool>
    #[arg(long)]
    pub base_url: Option<String>,

    /// Abort backend requests after this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Stop reading stdin while this many requests are pending
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_in_flight: Option<u64>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BridgeConfig {
    pub api: beyondsight_api::Config,
    /// `None` leaves concurrency unbounded.
    pub max_in_flight: Option<usize>,
    pub log_level: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            api: beyondsight_api::Config::new(DEFAULT_BASE_URL),
            max_in_flight: None,
            log_level: default_log_level(),
        }
    }
}

impl BridgeConfig {
    /// Defaults, environment, then `cli` flags.
    pub fn load(cli: &Cli) -> Result<Self> {
        Ok(Self::from_env()?.with_overrides(cli))
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            config.api.base_url = url.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let seconds = raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds"))?;
            config.api.request_timeout = Some(seconds);
        }
        if let Some(raw) = lookup(ENV_MAX_IN_FLIGHT) {
            let limit = raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("{ENV_MAX_IN_FLIGHT} must be a positive integer"))?;
            if limit == 0 {
                bail!("{ENV_MAX_IN_FLIGHT} must be at least 1");
            }
            config.max_in_flight = Some(limit);
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            config.log_level = level;
        }

        Ok(config)
    }

    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(url) = &cli.base_url {
            self.api.base_url = url.clone();
        }
        if let Some(seconds) = cli.timeout_secs {
            self.api.request_timeout = Some(seconds);
        }
        if let Some(limit) = cli.max_in_flight {
            self.max_in_flight = usize::try_from(limit).ok();
        }
        if let Some(level) = &cli.log_level {
            self.log_level = level.clone();
        }
        self
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_match_local_backend() {
        let config = BridgeConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080/api/v1/mcp/tools");
        assert_eq!(config.api.request_timeout, None);
        assert_eq!(config.max_in_flight, None);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn environment_values_apply() {
        let config = BridgeConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, " http://backend:9000/tools "),
            (ENV_TIMEOUT_SECS, "15"),
            (ENV_MAX_IN_FLIGHT, "4"),
            (ENV_LOG_LEVEL, "debug"),
        ]))
        .unwrap();
        assert_eq!(config.api.base_url, "http://backend:9000/tools");
        assert_eq!(config.api.request_timeout, Some(15));
        assert_eq!(config.max_in_flight, Some(4));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        assert!(BridgeConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "soon")])).is_err());
        assert!(BridgeConfig::from_lookup(lookup(&[(ENV_MAX_IN_FLIGHT, "-1")])).is_err());
        assert!(BridgeConfig::from_lookup(lookup(&[(ENV_MAX_IN_FLIGHT, "0")])).is_err());
    }

    #[test]
    fn flags_override_environment() {
        let cli = Cli::parse_from([
            "mcp-bridge",
            "--base-url",
            "http://other:1/tools",
            "--max-in-flight",
            "2",
        ]);
        let config = BridgeConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, "http://backend:9000/tools"),
            (ENV_TIMEOUT_SECS, "15"),
        ]))
        .unwrap()
        .with_overrides(&cli);

        assert_eq!(config.api.base_url, "http://other:1/tools");
        assert_eq!(config.api.request_timeout, Some(15));
        assert_eq!(config.max_in_flight, Some(2));
    }

    #[test]
    fn zero_in_flight_flag_is_rejected() {
        assert!(Cli::try_parse_from(["mcp-bridge", "--max-in-flight", "0"]).is_err());
    }
}
