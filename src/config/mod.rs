//! Configuration module for the Ireizo API.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Credentials for the DDR API. Only used when both parts are configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DdrCredentials {
    pub username: String,
    pub password: String,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Plain text or JSON log lines
    pub log_format: LogFormat,
    /// Base URL of the Elasticsearch docstore
    pub docstore_host: String,
    /// Upper bound on a single docstore read
    pub docstore_timeout: Duration,
    /// Base URL of the public DDR site, used for person page links
    pub ddr_ui_url: String,
    /// Base URL of the DDR REST API
    pub ddr_api_url: String,
    /// Optional basic-auth credentials for the DDR API
    pub ddr_credentials: Option<DdrCredentials>,
    /// Upper bound on a single DDR API call
    pub ddr_api_timeout: Duration,
}

/// A configuration value that could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub variable: &'static str,
    pub value: String,
    pub reason: &'static str,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}={:?}: {}", self.variable, self.value, self.reason)
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let bind_addr_raw =
            env::var("IREIZO_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let bind_addr = bind_addr_raw.parse().map_err(|_| ConfigError {
            variable: "IREIZO_BIND_ADDR",
            value: bind_addr_raw.clone(),
            reason: "expected host:port",
        })?;

        let log_level = env::var("IREIZO_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_format = match env::var("IREIZO_LOG_FORMAT").ok().as_deref() {
            None | Some("") | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError {
                    variable: "IREIZO_LOG_FORMAT",
                    value: other.to_string(),
                    reason: "expected text or json",
                })
            }
        };

        let docstore_host = base_url("IREIZO_DOCSTORE_HOST", "http://127.0.0.1:9200");
        let docstore_timeout = timeout("IREIZO_DOCSTORE_TIMEOUT")?;

        let ddr_ui_url = base_url("IREIZO_DDR_UI_URL", "https://ddr.densho.org");
        let ddr_api_url = base_url("IREIZO_DDR_API_URL", "https://ddr.densho.org");
        let ddr_api_timeout = timeout("IREIZO_DDR_API_TIMEOUT")?;

        let username = env::var("IREIZO_DDR_API_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("IREIZO_DDR_API_PASSWORD").ok().filter(|s| !s.is_empty());
        let ddr_credentials = match (username, password) {
            (Some(username), Some(password)) => Some(DdrCredentials { username, password }),
            _ => None,
        };

        Ok(Self {
            bind_addr,
            log_level,
            log_format,
            docstore_host,
            docstore_timeout,
            ddr_ui_url,
            ddr_api_url,
            ddr_credentials,
            ddr_api_timeout,
        })
    }
}

const DEFAULT_TIMEOUT_SECS: f64 = 5.0;

fn base_url(variable: &str, default: &str) -> String {
    env::var(variable)
        .unwrap_or_else(|_| default.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Timeouts are given in (possibly fractional) seconds and must be positive.
fn timeout(variable: &'static str) -> Result<Duration, ConfigError> {
    let Ok(raw) = env::var(variable) else {
        return Ok(Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS));
    };
    let secs = raw.trim().parse::<f64>().ok().filter(|secs| *secs > 0.0);
    match secs.map(Duration::try_from_secs_f64) {
        Some(Ok(duration)) => Ok(duration),
        _ => Err(ConfigError {
            variable,
            value: raw,
            reason: "expected a positive number of seconds",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // The process environment is shared between test threads.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "IREIZO_BIND_ADDR",
        "IREIZO_LOG_LEVEL",
        "IREIZO_LOG_FORMAT",
        "IREIZO_DOCSTORE_HOST",
        "IREIZO_DOCSTORE_TIMEOUT",
        "IREIZO_DDR_UI_URL",
        "IREIZO_DDR_API_URL",
        "IREIZO_DDR_API_USERNAME",
        "IREIZO_DDR_API_PASSWORD",
        "IREIZO_DDR_API_TIMEOUT",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_default_config() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let config = Config::from_env().unwrap();

        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.docstore_host, "http://127.0.0.1:9200");
        assert_eq!(config.docstore_timeout, Duration::from_secs(5));
        assert_eq!(config.ddr_ui_url, "https://ddr.densho.org");
        assert_eq!(config.ddr_api_url, "https://ddr.densho.org");
        assert!(config.ddr_credentials.is_none());
        assert_eq!(config.ddr_api_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_overrides() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("IREIZO_DDR_API_URL", "http://ddr.local:8000/");
        env::set_var("IREIZO_DDR_API_TIMEOUT", "2.5");
        env::set_var("IREIZO_DDR_API_USERNAME", "densho");
        env::set_var("IREIZO_DDR_API_PASSWORD", "hunter2");
        env::set_var("IREIZO_LOG_FORMAT", "json");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.ddr_api_url, "http://ddr.local:8000");
        assert_eq!(config.ddr_api_timeout, Duration::from_millis(2500));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(
            config.ddr_credentials,
            Some(DdrCredentials {
                username: "densho".to_string(),
                password: "hunter2".to_string(),
            })
        );
    }

    #[test]
    fn test_credentials_need_both_parts() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("IREIZO_DDR_API_USERNAME", "densho");

        let config = Config::from_env().unwrap();
        clear_env();

        assert!(config.ddr_credentials.is_none());
    }

    #[test]
    fn test_invalid_timeout() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("IREIZO_DOCSTORE_TIMEOUT", "0");

        let err = Config::from_env().unwrap_err();
        clear_env();

        assert_eq!(err.variable, "IREIZO_DOCSTORE_TIMEOUT");
    }

    #[test]
    fn test_timeout_too_large() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("IREIZO_DDR_API_TIMEOUT", "1e30");

        let err = Config::from_env().unwrap_err();
        clear_env();

        assert_eq!(err.variable, "IREIZO_DDR_API_TIMEOUT");
        assert_eq!(err.reason, "expected a positive number of seconds");
    }

    #[test]
    fn test_invalid_bind_addr() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("IREIZO_BIND_ADDR", "not-an-address");

        let err = Config::from_env().unwrap_err();
        clear_env();

        assert_eq!(err.variable, "IREIZO_BIND_ADDR");
        assert!(err.to_string().contains("not-an-address"));
    }
}
