// crates/discoteca-core/src/errors.rs
use thiserror::Error;

use crate::ports::RepoError;
use crate::validation::ValidationError;

/// Error genérico del núcleo de Discoteca.
///
/// La capa HTTP traduce cada variante a un código de estado en un único punto.
#[derive(Debug, Error)]
pub enum CoreError {
  /// The payload did not pass validation. Raised before any store access.
  #[error(transparent)]
  Validation(#[from] ValidationError),

  /// A looked-up or referenced entity does not exist.
  #[error("{0}")]
  NotFound(String),

  /// The underlying store failed (connectivity, constraint, decoding).
  #[error("repository error: {0}")]
  Repository(String),
}

impl From<RepoError> for CoreError {
  fn from(err: RepoError) -> Self {
    match err {
      RepoError::NotFound => CoreError::NotFound("entity not found".to_string()),
      RepoError::Storage(msg) => CoreError::Repository(msg),
    }
  }
}
