//! Configuration loading and representation.
//!
//! Everything comes from environment variables:
//!
//! | variable | required | default |
//! |----------|----------|---------|
//! | `FIELDSALES_BACKEND_URL` | yes | |
//! | `FIELDSALES_BACKEND_ANON_KEY` | no | empty (dev only) |
//! | `FIELDSALES_LOW_STOCK_THRESHOLD` | no | 10 |
//! | `FIELDSALES_LOG_FORMAT` | no | `json` |

use thiserror::Error;

use fieldsales_observability::tracing::LogFormat;
use fieldsales_products::DEFAULT_LOW_STOCK_THRESHOLD;

pub const BACKEND_URL: &str = "FIELDSALES_BACKEND_URL";
pub const BACKEND_ANON_KEY: &str = "FIELDSALES_BACKEND_ANON_KEY";
pub const LOW_STOCK_THRESHOLD: &str = "FIELDSALES_LOW_STOCK_THRESHOLD";
pub const LOG_FORMAT: &str = "FIELDSALES_LOG_FORMAT";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the hosted database/auth service.
    pub backend_url: String,
    /// Public (anonymous) API key of the hosted service.
    pub backend_anon_key: String,
    pub low_stock_threshold: u32,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load through an arbitrary variable lookup (tests inject a map here).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_url = lookup(BACKEND_URL)
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing(BACKEND_URL))?;

        if !(backend_url.starts_with("https://") || backend_url.starts_with("http://")) {
            return Err(ConfigError::Invalid {
                name: BACKEND_URL,
                reason: format!("expected an http(s) URL, got {backend_url}"),
            });
        }

        let backend_anon_key = lookup(BACKEND_ANON_KEY).unwrap_or_else(|| {
            tracing::warn!("{BACKEND_ANON_KEY} not set; requests will be anonymous");
            String::new()
        });

        let low_stock_threshold = match lookup(LOW_STOCK_THRESHOLD) {
            None => DEFAULT_LOW_STOCK_THRESHOLD,
            Some(raw) => raw.trim().parse().map_err(|e| ConfigError::Invalid {
                name: LOW_STOCK_THRESHOLD,
                reason: format!("{e}"),
            })?,
        };

        let log_format = lookup(LOG_FORMAT)
            .map(|v| LogFormat::parse(&v))
            .unwrap_or(LogFormat::Json);

        Ok(Self {
            backend_url,
            backend_anon_key,
            low_stock_threshold,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg =
            AppConfig::from_lookup(lookup(&[(BACKEND_URL, "https://acme.example.co/")])).unwrap();
        assert_eq!(cfg.backend_url, "https://acme.example.co");
        assert_eq!(cfg.backend_anon_key, "");
        assert_eq!(cfg.low_stock_threshold, DEFAULT_LOW_STOCK_THRESHOLD);
        assert_eq!(cfg.log_format, LogFormat::Json);
    }

    #[test]
    fn all_variables_are_read() {
        let cfg = AppConfig::from_lookup(lookup(&[
            (BACKEND_URL, "http://localhost:54321"),
            (BACKEND_ANON_KEY, "anon"),
            (LOW_STOCK_THRESHOLD, "3"),
            (LOG_FORMAT, "pretty"),
        ]))
        .unwrap();
        assert_eq!(cfg.backend_anon_key, "anon");
        assert_eq!(cfg.low_stock_threshold, 3);
        assert_eq!(cfg.log_format, LogFormat::Pretty);
    }

    #[test]
    fn backend_url_is_required() {
        assert_eq!(
            AppConfig::from_lookup(lookup(&[])),
            Err(ConfigError::Missing(BACKEND_URL))
        );
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[(BACKEND_URL, "ftp://nope")])),
            Err(ConfigError::Invalid { name: BACKEND_URL, .. })
        ));
    }

    #[test]
    fn bad_threshold_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[
            (BACKEND_URL, "https://acme.example.co"),
            (LOW_STOCK_THRESHOLD, "lots"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: LOW_STOCK_THRESHOLD, .. }));
    }
}
