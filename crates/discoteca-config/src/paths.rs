use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::ConfigError;

/// Relocates the config and data directories under one root, e.g. for a
/// portable install or a throwaway test run.
pub const BASE_DIR_ENV: &str = "DISCOTECA_BASE_DIR";

const CONFIG_FILE: &str = "discoteca.toml";
const DATABASE_FILE: &str = "discoteca.db";

/// Where Discoteca keeps its config file and its catalog database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscotecaPaths {
  pub config_dir: PathBuf,
  pub data_dir: PathBuf,
}

impl DiscotecaPaths {
  /// `$DISCOTECA_BASE_DIR/{config,data}` when the variable is set, the
  /// platform's per-user directories otherwise.
  pub fn detect() -> Result<Self, ConfigError> {
    match std::env::var_os(BASE_DIR_ENV) {
      Some(base) if !base.is_empty() => Self::rooted(base),
      _ => {
        let dirs =
          ProjectDirs::from("com", "discoteca", "discoteca").ok_or(ConfigError::NoHomeDir)?;
        Self { config_dir: dirs.config_dir().to_path_buf(), data_dir: dirs.data_dir().to_path_buf() }
          .created()
      }
    }
  }

  /// Both directories under `base`, ignoring the environment.
  pub fn rooted(base: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let base = base.as_ref();
    Self { config_dir: base.join("config"), data_dir: base.join("data") }.created()
  }

  fn created(self) -> Result<Self, ConfigError> {
    std::fs::create_dir_all(&self.config_dir)?;
    std::fs::create_dir_all(&self.data_dir)?;
    Ok(self)
  }

  pub fn config_file(&self) -> PathBuf {
    self.config_dir.join(CONFIG_FILE)
  }

  /// Default location of the SQLite catalog.
  pub fn database_file(&self) -> PathBuf {
    self.data_dir.join(DATABASE_FILE)
  }
}
