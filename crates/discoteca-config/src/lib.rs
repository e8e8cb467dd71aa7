mod backend;
mod error;
mod io;
mod paths;

pub use backend::{ConfigBackend, TomlConfigBackend};
pub use error::ConfigError;
pub use io::atomic_write_str;
pub use paths::{BASE_DIR_ENV, DiscotecaPaths};

use once_cell::sync::Lazy;

// Process-wide paths (env root or platform dirs)
pub static PATHS: Lazy<DiscotecaPaths> =
  Lazy::new(|| DiscotecaPaths::detect().expect("failed to resolve Discoteca directories"));

// Process-wide config backend
pub static CONFIG_BACKEND: Lazy<TomlConfigBackend> =
  Lazy::new(|| TomlConfigBackend::new(PATHS.clone()));
