use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::{ArtistId, ReleaseId};
use crate::domain::release_status::ReleaseStatus;

/// Representa un lanzamiento musical publicado por un artista.
///
/// `artist_id` siempre apunta a un artista que existía en el momento de
/// la inserción.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
  /// Identificador único del lanzamiento.
  pub id: ReleaseId,

  /// Título tal como aparece oficialmente.
  pub title: String,

  /// Fecha oficial de publicación (precisión de segundos).
  pub release_date: DateTime<Utc>,

  pub status: ReleaseStatus,

  pub genre: String,

  /// Artista al que pertenece.
  pub artist_id: ArtistId,

  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Proyección usada por el listado de lanzamientos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseSummary {
  pub id: ReleaseId,
  pub title: String,
  pub status: ReleaseStatus,
  pub artist_id: ArtistId,
}

impl From<&Release> for ReleaseSummary {
  fn from(release: &Release) -> Self {
    ReleaseSummary {
      id: release.id,
      title: release.title.clone(),
      status: release.status,
      artist_id: release.artist_id,
    }
  }
}

/// A validated creation payload. `artist_id` is well formed but not yet known to exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRelease {
  pub title: String,
  pub release_date: DateTime<Utc>,
  pub status: ReleaseStatus,
  pub genre: String,
  pub artist_id: ArtistId,
}

impl NewRelease {
  pub fn into_release(self, now: DateTime<Utc>) -> Release {
    Release {
      id: ReleaseId::new(),
      title: self.title,
      release_date: self.release_date,
      status: self.status,
      genre: self.genre,
      artist_id: self.artist_id,
      created_at: now,
      updated_at: now,
    }
  }
}
