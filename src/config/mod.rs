// Configuration module entry point
// Layered sources: optional config.toml, environment variables, defaults

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, HttpConfig, LoggingConfig, PerformanceConfig, ResourcesConfig, ServerConfig,
};

impl Config {
    /// Load the default configuration file ("config.toml" if present)
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension),
    /// merged with `COUNTRIES__`-prefixed environment variables
    /// (e.g. `COUNTRIES__SERVER__PORT=8080`) over the defaults.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("COUNTRIES").separator("__"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .set_default("resources.dataset", "data/countries.json")?
            .set_default("resources.assets_dir", "client")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_config_file() {
        let cfg = Config::load_from("nonexistent_config_for_tests").unwrap();
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert_eq!(cfg.resources.dataset, "data/countries.json");
        assert!(cfg.server.workers.is_none());
        assert!(cfg.performance.max_connections.is_none());
    }

    #[test]
    fn test_socket_addr_from_defaults() {
        let cfg = Config::load_from("nonexistent_config_for_tests").unwrap();
        let addr = cfg.get_socket_addr().unwrap();
        assert_eq!(addr.port(), 3000);
    }
}
