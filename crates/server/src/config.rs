use std::{env, net::SocketAddr, str::FromStr};

use tracing::{info, warn};
use url::Url;

/// Configuration for the relay.
/// bind: Address the HTTP listener binds to. (default: 127.0.0.1:3000)
/// upstream: Origin of the blog backend that `/api/v1/**` forwards to. (default: http://127.0.0.1:9000)
/// silent_failures: Answer handler failures with an empty 200 instead of an error status. (default: false)
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub bind: Option<SocketAddr>,
    pub upstream: Option<Url>,
    pub silent_failures: Option<bool>,
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid {key} value {value:?}: {reason}")]
pub struct ConfigError {
    key: &'static str,
    value: String,
    reason: String,
}

impl Config {
    pub const DEFAULT_BIND: &'static str = "127.0.0.1:3000";
    pub const DEFAULT_UPSTREAM: &'static str = rblog_api::client::Config::DEFAULT_BASE_URL;
    pub const DEFAULT_SILENT_FAILURES: bool = false;

    pub const BIND_VAR: &'static str = "RBLOG_BIND";
    pub const UPSTREAM_VAR: &'static str = "RBLOG_UPSTREAM";
    pub const SILENT_FAILURES_VAR: &'static str = "RBLOG_SILENT_FAILURES";

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Unset variables
    /// keep their default; set but unparsable ones are an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Config {
            bind: try_load(&lookup, Self::BIND_VAR)?,
            upstream: try_load(&lookup, Self::UPSTREAM_VAR)?,
            silent_failures: try_load(&lookup, Self::SILENT_FAILURES_VAR)?,
        })
    }

    pub fn bind(&self) -> SocketAddr {
        self.bind.unwrap_or_else(|| {
            Self::DEFAULT_BIND
                .parse()
                .expect("default bind address is valid")
        })
    }

    pub fn upstream(&self) -> Url {
        self.upstream.clone().unwrap_or_else(|| {
            Self::DEFAULT_UPSTREAM
                .parse()
                .expect("default upstream is valid")
        })
    }

    pub fn silent_failures(&self) -> bool {
        self.silent_failures
            .unwrap_or(Self::DEFAULT_SILENT_FAILURES)
    }

    pub fn client_config(&self) -> rblog_api::client::Config {
        rblog_api::client::Config::new(Some(self.upstream()))
    }
}

fn try_load<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => {
            info!("{key} not set, using default");
            Ok(None)
        }
        Some(value) => match value.trim().parse() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(e) => {
                warn!("Invalid {key} value: {e}");
                Err(ConfigError {
                    key,
                    reason: e.to_string(),
                    value,
                })
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.bind().to_string(), "127.0.0.1:3000");
        assert_eq!(cfg.upstream().as_str(), "http://127.0.0.1:9000/");
        assert!(!cfg.silent_failures());
    }

    #[test]
    fn test_overrides() {
        let cfg = Config::from_lookup(lookup(&[
            ("RBLOG_BIND", "0.0.0.0:8080"),
            ("RBLOG_UPSTREAM", "http://backend:9000"),
            ("RBLOG_SILENT_FAILURES", "true"),
        ]))
        .unwrap();
        assert_eq!(cfg.bind().port(), 8080);
        assert_eq!(cfg.upstream().host_str(), Some("backend"));
        assert!(cfg.silent_failures());
        assert_eq!(cfg.client_config().base_url().host_str(), Some("backend"));
    }

    #[test]
    fn test_invalid_value() {
        let err = Config::from_lookup(lookup(&[("RBLOG_SILENT_FAILURES", "sometimes")]))
            .unwrap_err();
        assert!(err.to_string().contains("RBLOG_SILENT_FAILURES"));

        assert!(Config::from_lookup(lookup(&[("RBLOG_BIND", "nowhere")])).is_err());
    }
}
