use discoteca_config::{CONFIG_BACKEND, ConfigBackend, ConfigError, PATHS};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Overrides `storage.db_path` when set (a file path or `:memory:`).
pub const DATABASE_URL_ENV: &str = "DISCOTECA_DATABASE_URL";

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
  pub db_path: PathBuf,
  pub journal_mode: Option<String>,
  pub pool_size: u32,
}

impl Default for StorageConfig {
  fn default() -> Self {
    let db_path = PATHS.database_file();
    StorageConfig { db_path, journal_mode: Some("WAL".to_string()), pool_size: 8 }
  }
}

impl StorageConfig {
  pub fn load() -> Result<Self, ConfigError> {
    let cfg: StorageConfig = CONFIG_BACKEND.load_section_with_default("storage")?;
    CONFIG_BACKEND.save_section("storage", &cfg)?;
    Ok(cfg.with_env_override())
  }

  pub fn save(&self) -> Result<(), ConfigError> {
    CONFIG_BACKEND.save_section("storage", self)
  }

  /// Config for a database file at `path`, independent of the user's config file.
  pub fn at(path: impl Into<PathBuf>) -> Self {
    StorageConfig { db_path: path.into(), journal_mode: Some("WAL".to_string()), pool_size: 4 }
  }

  /// Applies [`DATABASE_URL_ENV`] on top of the file configuration. The
  /// override is not written back to the config file.
  pub fn with_env_override(mut self) -> Self {
    if let Ok(url) = std::env::var(DATABASE_URL_ENV) {
      if !url.is_empty() {
        self.db_path = PathBuf::from(url);
      }
    }
    self
  }

  pub fn database_url(&self) -> String {
    self.db_path.to_string_lossy().into_owned()
  }
}
