use std::io::ErrorKind;

use serde::Serialize;
use serde::de::DeserializeOwned;
use toml_edit::DocumentMut;

use crate::error::ConfigError;
use crate::io::atomic_write_str;
use crate::paths::DiscotecaPaths;

/// Named sections of a single config store.
pub trait ConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError>;
  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError>;
}

/// `discoteca.toml` in the config directory, one `[section]` per component.
pub struct TomlConfigBackend {
  paths: DiscotecaPaths,
}

impl TomlConfigBackend {
  pub fn new(paths: DiscotecaPaths) -> Self {
    Self { paths }
  }

  pub fn paths(&self) -> &DiscotecaPaths {
    &self.paths
  }

  /// Like [`ConfigBackend::load_section`], but a missing file or section
  /// yields `T::default()`. Keys absent from a present section are left to
  /// the type's own `#[serde(default)]`.
  pub fn load_section_with_default<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Default,
  {
    match self.read_table()?.and_then(|mut table| table.remove(section)) {
      Some(value) => decode(section, value),
      None => Ok(T::default()),
    }
  }

  /// File contents, or `None` when the file does not exist yet.
  fn read_text(&self) -> Result<Option<String>, ConfigError> {
    match std::fs::read_to_string(self.paths.config_file()) {
      Ok(text) => Ok(Some(text)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e.into()),
    }
  }

  fn read_table(&self) -> Result<Option<toml::Table>, ConfigError> {
    self.read_text()?.map(|text| toml::from_str(&text)).transpose().map_err(ConfigError::from)
  }
}

fn decode<T: DeserializeOwned>(section: &str, value: toml::Value) -> Result<T, ConfigError> {
  value.try_into().map_err(|source| ConfigError::Decode { section: section.to_string(), source })
}

impl ConfigBackend for TomlConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError> {
    let path = self.paths.config_file();
    let mut table = self.read_table()?.ok_or_else(|| ConfigError::MissingFile(path.clone()))?;

    let value = table
      .remove(section)
      .ok_or_else(|| ConfigError::MissingSection { section: section.to_string(), path })?;

    decode(section, value)
  }

  /// Replaces one section in place; comments and every other section survive.
  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError> {
    let mut doc = match self.read_text()? {
      Some(text) => text.parse::<DocumentMut>()?,
      None => DocumentMut::new(),
    };

    // serializes as a headerless "key = value" body
    let body = toml::to_string(value)
      .map_err(|source| ConfigError::Encode { section: section.to_string(), source })?;
    doc[section] = body.parse::<DocumentMut>()?.into_item();

    atomic_write_str(&self.paths.config_file(), &doc.to_string())?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde::Deserialize;
  use std::fs;
  use tempfile::tempdir;

  #[derive(Debug, PartialEq, Serialize, Deserialize)]
  #[serde(default)]
  struct Listener {
    host: String,
    port: u16,
  }

  impl Default for Listener {
    fn default() -> Self {
      Listener { host: "0.0.0.0".to_string(), port: 8787 }
    }
  }

  fn backend_in(dir: &std::path::Path) -> TomlConfigBackend {
    TomlConfigBackend::new(DiscotecaPaths::rooted(dir).unwrap())
  }

  #[test]
  fn test_missing_file() {
    let tmp = tempdir().unwrap();
    let backend = backend_in(tmp.path());

    let listener: Listener = backend.load_section_with_default("server").unwrap();
    assert_eq!(listener, Listener::default());

    let strict: Result<Listener, _> = backend.load_section("server");
    assert!(matches!(strict, Err(ConfigError::MissingFile(_))));
  }

  #[test]
  fn test_save_then_load_section() {
    let tmp = tempdir().unwrap();
    let backend = backend_in(tmp.path());
    let listener = Listener { host: "127.0.0.1".to_string(), port: 9000 };

    backend.save_section("server", &listener).unwrap();

    let loaded: Listener = backend.load_section("server").unwrap();
    assert_eq!(loaded, listener);

    let other: Result<Listener, _> = backend.load_section("storage");
    assert!(matches!(other, Err(ConfigError::MissingSection { ref section, .. }) if section == "storage"));
  }

  #[test]
  fn test_save_keeps_comments_and_other_sections() {
    let tmp = tempdir().unwrap();
    let backend = backend_in(tmp.path());
    fs::write(
      backend.paths().config_file(),
      "# managed by hand\n[storage]\njournal_mode = \"WAL\"\n",
    )
    .unwrap();

    backend.save_section("server", &Listener::default()).unwrap();

    let content = fs::read_to_string(backend.paths().config_file()).unwrap();
    assert!(content.contains("# managed by hand"));
    assert!(content.contains("journal_mode = \"WAL\""));
    assert!(content.contains("port = 8787"));
  }

  #[test]
  fn test_partial_section_and_bad_types() {
    let tmp = tempdir().unwrap();
    let backend = backend_in(tmp.path());

    fs::write(backend.paths().config_file(), "[server]\nport = 1\n").unwrap();
    let listener: Listener = backend.load_section_with_default("server").unwrap();
    assert_eq!(listener, Listener { host: "0.0.0.0".to_string(), port: 1 });

    fs::write(backend.paths().config_file(), "[server]\nport = \"high\"\n").unwrap();
    let bad: Result<Listener, _> = backend.load_section_with_default("server");
    assert!(matches!(bad, Err(ConfigError::Decode { ref section, .. }) if section == "server"));
  }
}
