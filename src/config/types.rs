use crate::{Error, Result, session::SessionLimits};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub sessions: SessionConfig,
}

impl Config {
    /// Rejects values the server cannot start with.
    pub fn validate(&self) -> Result<()> {
        let url = self.api.url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::config(format!(
                "api.url must be an http(s) URL, got '{}'",
                self.api.url
            )));
        }

        if self.api.timeout_secs == Some(0) {
            return Err(Error::config("api.timeout_secs must be greater than 0"));
        }

        if self.sessions.idle_timeout_secs == 0 {
            return Err(Error::config(
                "sessions.idle_timeout_secs must be greater than 0",
            ));
        }

        if self.sessions.max_sessions == 0 {
            return Err(Error::config("sessions.max_sessions must be greater than 0"));
        }

        if self.sessions.sweep_interval_secs == 0 {
            return Err(Error::config(
                "sessions.sweep_interval_secs must be greater than 0",
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Where the prediction backend lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_url")]
    pub url: String,
    /// Request timeout for the outbound call. `None` leaves the transport default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ApiConfig {
    /// Full URL of the predict endpoint, with trailing slashes on the base stripped.
    pub fn predict_url(&self) -> String {
        format!("{}/predict", self.url.trim_end_matches('/'))
    }
}

/// How long idle sessions live and how many are kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl SessionConfig {
    pub fn limits(&self) -> SessionLimits {
        let secs = i64::try_from(self.idle_timeout_secs).unwrap_or(i64::MAX);
        SessionLimits {
            idle_timeout: chrono::Duration::try_seconds(secs).unwrap_or(chrono::Duration::MAX),
            max_sessions: self.max_sessions,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: default_idle_timeout_secs(),
            max_sessions: default_max_sessions(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            logs: LogsConfig::default(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            timeout_secs: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_idle_timeout_secs() -> u64 {
    3600
}

fn default_max_sessions() -> usize {
    10_000
}

fn default_sweep_interval_secs() -> u64 {
    60
}
