// Configuration module entry point
// Loads the startup configuration and holds shared runtime state

mod state;
mod types;

use std::net::SocketAddr;
use std::time::Duration;

// Re-export public types
pub use state::AppState;
pub use types::{Config, RoutesConfig};

/// Default config file name (without extension)
pub const DEFAULT_CONFIG_PATH: &str = "config";

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// The file is optional. Environment variables prefixed with `SERVER`
    /// override it, e.g. `SERVER_ROUTES__INDEX_FILE=home.html`.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("SERVER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.shutdown_timeout", 30)?
            .set_default("http.max_body_size", 10_485_760)? // 10MB
            .set_default("routes.index_path", "/")?
            .set_default("routes.index_file", "index.html")?
            .set_default("routes.form_path", "/post")?
            .set_default("routes.echo_format", "braces")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Deadline for receiving a request head.
    ///
    /// hyper starts this timer whenever a connection waits for its next
    /// request, so with keep-alive on it is the idle timeout.
    pub const fn header_read_timeout(&self) -> Duration {
        if self.performance.keep_alive_timeout > 0 {
            Duration::from_secs(self.performance.keep_alive_timeout)
        } else {
            Duration::from_secs(self.performance.read_timeout)
        }
    }

    pub const fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.performance.read_timeout)
    }

    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.performance.shutdown_timeout)
    }
}

#[cfg(test)]
pub(crate) fn test_config(index_file: &str) -> Config {
    use crate::http::EchoFormat;
    use types::{HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig};

    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            workers: None,
        },
        logging: LoggingConfig {
            level: "error".to_string(),
            access_log: false,
            access_log_format: "combined".to_string(),
            access_log_file: None,
            error_log_file: None,
        },
        performance: PerformanceConfig {
            keep_alive_timeout: 0,
            read_timeout: 5,
            shutdown_timeout: 5,
            max_connections: None,
        },
        http: HttpConfig { max_body_size: 64 },
        routes: RoutesConfig {
            index_path: "/".to_string(),
            index_file: index_file.to_string(),
            form_path: "/post".to_string(),
            echo_format: EchoFormat::Braces,
        },
    }
}
