// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

use crate::http::EchoFormat;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    pub routes: RoutesConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common or json)
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    /// Seconds an idle connection waits for its next request; 0 disables keep-alive
    pub keep_alive_timeout: u64,
    /// Seconds allowed for reading a request body or the index file
    pub read_timeout: u64,
    /// Seconds in-flight connections get to finish on shutdown
    pub shutdown_timeout: u64,
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub max_body_size: u64,
}

/// The two fixed routes
#[derive(Debug, Deserialize, Clone)]
pub struct RoutesConfig {
    /// Path answered with the index file
    pub index_path: String,
    /// Index file, relative to the working directory
    pub index_file: String,
    /// Path answered with the form echo
    pub form_path: String,
    pub echo_format: EchoFormat,
}
