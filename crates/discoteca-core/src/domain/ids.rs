use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identificador único de un artista.
///
/// Lo asigna la aplicación (UUID v4), nunca la base de datos, para que siga
/// siendo válido aunque el almacenamiento esté particionado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtistId(Uuid);

impl ArtistId {
  /// Genera un nuevo identificador único.
  pub fn new() -> Self {
    ArtistId(Uuid::new_v4())
  }

  /// Construye un `ArtistId` a partir de un `Uuid` existente.
  pub fn from_uuid(u: Uuid) -> Self {
    ArtistId(u)
  }

  /// Devuelve el `Uuid` interno.
  pub fn as_uuid(&self) -> Uuid {
    self.0
  }
}

impl From<Uuid> for ArtistId {
  fn from(u: Uuid) -> Self {
    ArtistId(u)
  }
}

impl From<ArtistId> for Uuid {
  fn from(id: ArtistId) -> Self {
    id.0
  }
}

impl FromStr for ArtistId {
  type Err = uuid::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Uuid::parse_str(s).map(ArtistId)
  }
}

impl fmt::Display for ArtistId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

/// Identificador único para un lanzamiento (`Release`).
///
/// Se genera con UUID v4 para garantizar unicidad global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReleaseId(Uuid);

impl ReleaseId {
  /// Crea un nuevo `ReleaseId` único.
  pub fn new() -> Self {
    ReleaseId(Uuid::new_v4())
  }

  /// Construye un `ReleaseId` desde un UUID ya existente.
  pub fn from_uuid(u: Uuid) -> Self {
    ReleaseId(u)
  }

  /// Devuelve el valor UUID interno.
  pub fn as_uuid(&self) -> Uuid {
    self.0
  }
}

impl From<Uuid> for ReleaseId {
  fn from(u: Uuid) -> Self {
    ReleaseId(u)
  }
}

impl From<ReleaseId> for Uuid {
  fn from(id: ReleaseId) -> Self {
    id.0
  }
}

impl FromStr for ReleaseId {
  type Err = uuid::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Uuid::parse_str(s).map(ReleaseId)
  }
}

impl fmt::Display for ReleaseId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_ids_are_fresh_and_hyphenated() {
    let a = ArtistId::new();
    let b = ArtistId::new();
    assert_ne!(a, b);
    assert_eq!(a.to_string().len(), 36);
  }

  #[test]
  fn test_id_serializes_as_plain_string() {
    let id: ReleaseId = "6f1c1d2e-8f4b-4a52-9a4c-0d3e2f1a7b90".parse().unwrap();
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"6f1c1d2e-8f4b-4a52-9a4c-0d3e2f1a7b90\"");
  }
}
