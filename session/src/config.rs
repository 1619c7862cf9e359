//! Client configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use veriflow_types::KycError;

use crate::logging::LogFormat;

/// Configuration for the Veriflow KYC client core.
///
/// Can be loaded from a TOML file via [`ClientConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the verification backend.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Per-request timeout in seconds. Every network call fails with a
    /// timeout error after this long rather than hanging.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Connection establishment timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Path of the durable session file.
    #[serde(default = "default_session_file")]
    pub session_file: PathBuf,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_backend_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_session_file() -> PathBuf {
    PathBuf::from("./veriflow_sessions.json")
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, KycError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| KycError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, KycError> {
        let config: Self = toml::from_str(s).map_err(|e| KycError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("ClientConfig is always serializable to TOML")
    }

    /// Check the constraints the rest of the core relies on.
    ///
    /// Request timeouts must land in the 10-30s band: shorter and slow
    /// document uploads fail spuriously, longer and the UI hangs past any
    /// acceptable wait.
    pub fn validate(&self) -> Result<(), KycError> {
        if self.backend_url.is_empty() {
            return Err(KycError::Config("backend_url must not be empty".into()));
        }
        if !(10..=30).contains(&self.request_timeout_secs) {
            return Err(KycError::Config(format!(
                "request_timeout_secs must be between 10 and 30, got {}",
                self.request_timeout_secs
            )));
        }
        if self.connect_timeout_secs == 0 || self.connect_timeout_secs > self.request_timeout_secs
        {
            return Err(KycError::Config(format!(
                "connect_timeout_secs must be between 1 and request_timeout_secs, got {}",
                self.connect_timeout_secs
            )));
        }
        Ok(())
    }

    /// The parsed log format.
    pub fn log_format(&self) -> LogFormat {
        match self.log_format.as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Human,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            session_file: default_session_file(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}
