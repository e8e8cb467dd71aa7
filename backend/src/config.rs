use discoteca_config::{CONFIG_BACKEND, ConfigBackend, ConfigError};
use serde::{Deserialize, Serialize};

/// `[server]` section of `discoteca.toml`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
  pub host: String,
  pub port: u16,
  /// Used when `RUST_LOG` is not set.
  pub log_filter: String,
}

impl Default for ServerConfig {
  fn default() -> Self {
    ServerConfig { host: "0.0.0.0".to_string(), port: 8787, log_filter: "info".to_string() }
  }
}

impl ServerConfig {
  pub fn load() -> Result<Self, ConfigError> {
    let cfg: ServerConfig = CONFIG_BACKEND.load_section_with_default("server")?;
    CONFIG_BACKEND.save_section("server", &cfg)?;
    Ok(cfg)
  }

  pub fn save(&self) -> Result<(), ConfigError> {
    CONFIG_BACKEND.save_section("server", self)
  }

  pub fn socket_addr(&self) -> String {
    format!("{}:{}", self.host, self.port)
  }
}
