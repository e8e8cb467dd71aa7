use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
  #[error("could not determine a home directory for the platform config paths")]
  NoHomeDir,
  #[error("config file {0:?} does not exist")]
  MissingFile(PathBuf),
  #[error("section [{section}] is missing from {path:?}")]
  MissingSection { section: String, path: PathBuf },
  #[error("malformed config file: {0}")]
  Parse(#[from] toml::de::Error),
  #[error("section [{section}] does not match its expected shape: {source}")]
  Decode { section: String, source: toml::de::Error },
  #[error("section [{section}] could not be encoded: {source}")]
  Encode { section: String, source: toml::ser::Error },
  #[error("config file could not be edited: {0}")]
  Edit(#[from] toml_edit::TomlError),
}
