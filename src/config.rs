use std::env;

use anyhow::{anyhow, Context, Result};
use chrono::Duration;
use validator::Validate;

use crate::domain::reference::reference_type::ReferenceType;

const PREFIX: &str = "CONSOLE_REF_";

/// Upper bound for `ttl_secs` (one year)
const MAX_TTL_SECS: i64 = 365 * 24 * 60 * 60;

/// Runtime configuration, read from `CONSOLE_REF_*` environment variables.
#[derive(Debug, Clone, Validate)]
pub struct AppConfig {
    pub bind_addr: String,

    #[validate(url)]
    pub api_base_url: String,

    #[validate(length(min = 1))]
    pub api_token: Option<String>,

    #[validate(range(min = 1))]
    pub request_timeout_ms: u64,

    /// How long loaded references count as fresh
    #[validate(range(min = 0, max = MAX_TTL_SECS))]
    pub ttl_secs: i64,

    /// Background refresh period; 0 disables the task
    pub refresh_interval_secs: u64,

    pub log_dir: String,

    /// Types loaded eagerly at startup
    pub preload: Vec<ReferenceType>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".into(),
            api_base_url: "http://localhost:8000".into(),
            api_token: None,
            request_timeout_ms: 30_000,
            ttl_secs: 3 * 60 * 60,
            refresh_interval_secs: 300,
            log_dir: "logs".into(),
            preload: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Read from the process environment (after `.env` is applied).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read through `lookup`, which receives full variable names.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(&format!("{PREFIX}{name}"))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let config = Self {
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            api_base_url: get("API_BASE_URL").unwrap_or(defaults.api_base_url),
            api_token: get("API_TOKEN"),
            request_timeout_ms: parse_or(get("REQUEST_TIMEOUT_MS"), "REQUEST_TIMEOUT_MS", defaults.request_timeout_ms)?,
            ttl_secs: parse_or(get("TTL_SECS"), "TTL_SECS", defaults.ttl_secs)?,
            refresh_interval_secs: parse_or(get("REFRESH_INTERVAL_SECS"), "REFRESH_INTERVAL_SECS", defaults.refresh_interval_secs)?,
            log_dir: get("LOG_DIR").unwrap_or(defaults.log_dir),
            preload: match get("PRELOAD") {
                Some(raw) => parse_preload(&raw)?,
                None => defaults.preload,
            },
        };

        config
            .validate()
            .map_err(|e| anyhow!("invalid configuration: {e}"))?;

        Ok(config)
    }

    pub fn ttl(&self) -> Duration {
        // Range is validated on load; the clamp covers hand-built configs.
        Duration::seconds(self.ttl_secs.clamp(0, MAX_TTL_SECS))
    }
}

fn parse_or<T>(raw: Option<String>, name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(v) => v
            .parse()
            .with_context(|| format!("{PREFIX}{name} is not a valid number: {v}")),
        None => Ok(default),
    }
}

fn parse_preload(raw: &str) -> Result<Vec<ReferenceType>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<ReferenceType>().map_err(|e| anyhow!("{PREFIX}PRELOAD: {e}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080");
        assert_eq!(cfg.request_timeout_ms, 30_000);
        assert_eq!(cfg.ttl(), Duration::hours(3));
        assert!(cfg.api_token.is_none());
        assert!(cfg.preload.is_empty());
    }

    #[test]
    fn overrides_are_read() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("CONSOLE_REF_API_BASE_URL", "https://console-api.example.com"),
            ("CONSOLE_REF_API_TOKEN", "tok-123"),
            ("CONSOLE_REF_TTL_SECS", "60"),
            ("CONSOLE_REF_PRELOAD", "project, provider,region"),
            ("CONSOLE_REF_LOG_DIR", "  "),
        ]))
        .unwrap();

        assert_eq!(cfg.api_base_url, "https://console-api.example.com");
        assert_eq!(cfg.api_token.as_deref(), Some("tok-123"));
        assert_eq!(cfg.ttl_secs, 60);
        assert_eq!(cfg.log_dir, "logs");
        assert_eq!(
            cfg.preload,
            vec![ReferenceType::Project, ReferenceType::Provider, ReferenceType::Region]
        );
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(AppConfig::from_lookup(lookup(&[("CONSOLE_REF_API_BASE_URL", "not a url")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("CONSOLE_REF_REQUEST_TIMEOUT_MS", "0")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("CONSOLE_REF_TTL_SECS", "soon")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("CONSOLE_REF_PRELOAD", "project,galaxy")])).is_err());
    }

    #[test]
    fn ttl_outside_range_is_rejected() {
        assert!(AppConfig::from_lookup(lookup(&[("CONSOLE_REF_TTL_SECS", "-1")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("CONSOLE_REF_TTL_SECS", "10000000000000000")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("CONSOLE_REF_TTL_SECS", "0")])).is_ok());
    }

    #[test]
    fn ttl_never_panics_on_hand_built_config() {
        let cfg = AppConfig {
            ttl_secs: i64::MAX,
            ..AppConfig::default()
        };
        assert_eq!(cfg.ttl(), Duration::seconds(MAX_TTL_SECS));

        let cfg = AppConfig {
            ttl_secs: -5,
            ..AppConfig::default()
        };
        assert_eq!(cfg.ttl(), Duration::zero());
    }
}
