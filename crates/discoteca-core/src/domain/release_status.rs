use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Estado editorial de un lanzamiento.
///
/// A diferencia de otros enums de texto libre, aquí el conjunto es cerrado:
/// cualquier otro valor es un error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseStatus {
  /// Anunciado pero todavía no publicado.
  Unreleased,
  /// Publicado.
  Released,
  /// Publicado y en tendencia.
  Trending,
}

impl ReleaseStatus {
  pub const ALL: [ReleaseStatus; 3] =
    [ReleaseStatus::Unreleased, ReleaseStatus::Released, ReleaseStatus::Trending];

  pub fn as_str(&self) -> &'static str {
    match self {
      ReleaseStatus::Unreleased => "unreleased",
      ReleaseStatus::Released => "released",
      ReleaseStatus::Trending => "trending",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown release status: {0:?}")]
pub struct UnknownReleaseStatus(pub String);

impl FromStr for ReleaseStatus {
  type Err = UnknownReleaseStatus;

  /// Exact, case-sensitive match against the three stored spellings.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    ReleaseStatus::ALL
      .into_iter()
      .find(|status| status.as_str() == s)
      .ok_or_else(|| UnknownReleaseStatus(s.to_string()))
  }
}

impl fmt::Display for ReleaseStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_is_exact() {
    assert_eq!("trending".parse::<ReleaseStatus>(), Ok(ReleaseStatus::Trending));
    assert!("Trending".parse::<ReleaseStatus>().is_err());
    assert!("archived".parse::<ReleaseStatus>().is_err());
  }

  #[test]
  fn test_serde_uses_lowercase() {
    assert_eq!(serde_json::to_string(&ReleaseStatus::Unreleased).unwrap(), "\"unreleased\"");
  }
}
