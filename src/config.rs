// Configuration loading
// Layered: built-in defaults -> optional config.toml -> environment

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub keep_alive: bool,
    /// Per-connection timeout in seconds (covers keep-alive idle time)
    pub request_timeout: u64,
}

/// CORS configuration
///
/// The original deployment hardcoded the frontend origin in one entry point
/// and `*` in another; here it is a single explicit setting.
#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allowed_origin: String,
}

/// Font store locations, both read-only at runtime
#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// JSON catalog served verbatim on the catalog route
    pub catalog_file: PathBuf,
    /// Directory holding the font binaries
    pub font_dir: PathBuf,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log format (combined, common, or json)
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

impl Config {
    /// Load configuration from the default `config.toml` location
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.keep_alive", true)?
            .set_default("server.request_timeout", 30)?
            .set_default("cors.allowed_origin", "*")?
            .set_default("store.catalog_file", "fonts.json")?
            .set_default("store.font_dir", "fontStore")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?;

        // Hosting platforms hand the listen port over as a bare PORT variable.
        if let Ok(port) = std::env::var("PORT") {
            builder = builder.set_override("server.port", port)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid listen address: {e}"))
    }
}
