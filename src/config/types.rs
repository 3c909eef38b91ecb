// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub response: ResponseConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

/// Demo server configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
    /// Per-connection timeout in seconds
    pub read_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: None,
            read_timeout: 30,
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            access_log: true,
            access_log_format: default_access_log_format(),
            access_log_file: None,
            error_log_file: None,
        }
    }
}

/// Status used by `bad_request` when the client wants JSON
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum JsonErrorStatus {
    /// Always answer 200, the error lives in the body
    #[default]
    Ok,
    /// Answer with the caller's status code
    Code,
}

/// Response helper configuration
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ResponseConfig {
    #[serde(default)]
    pub json_error_status: JsonErrorStatus,
}

/// Template rendering configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RenderConfig {
    pub template_dir: String,
    pub autoescape: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            template_dir: "templates".to_string(),
            autoescape: true,
        }
    }
}
