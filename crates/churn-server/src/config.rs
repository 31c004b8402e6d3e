//! Server configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host
    pub host: String,

    /// Server port (HTTP)
    pub port: u16,

    /// Directory holding the trained model artifacts
    pub artifact_dir: PathBuf,

    /// Log level
    pub log_level: String,

    /// Allow cross-origin requests from any origin
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            artifact_dir: PathBuf::from("models"),
            log_level: "info".to_string(),
            enable_cors: true,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and config file
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        let config_result = config::Config::builder()
            .add_source(config::File::with_name("config/server").required(false))
            .add_source(config::Environment::with_prefix("CHURN"))
            .build();

        let mut server_config: Self = match config_result {
            Ok(cfg) => cfg
                .try_deserialize()
                .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e))?,
            Err(_) => {
                tracing::info!("No config file found, using default configuration");
                Self::default()
            }
        };

        if let Some(port) = port_override(std::env::var("PORT").ok().as_deref())? {
            server_config.port = port;
        }

        Ok(server_config)
    }

    /// Socket address string the listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse the plain `PORT` variable used by container platforms
fn port_override(value: Option<&str>) -> anyhow::Result<Option<u16>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<u16>()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("Invalid PORT '{}': {}", raw, e)),
    }
}
