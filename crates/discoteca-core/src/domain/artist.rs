use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::ArtistId;

/// Representa a un artista dentro del catálogo.
///
/// Se crea una vez y no se modifica: `updated_at` sólo cambiaría si
/// existiera una operación de actualización.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
  /// Identificador único del artista.
  pub id: ArtistId,

  /// Nombre principal del artista.
  pub name: String,

  /// Biografía corta.
  pub bio: String,

  /// Género principal.
  pub genre: String,

  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Proyección usada por el listado de artistas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistSummary {
  pub id: ArtistId,
  pub name: String,
  pub genre: String,
}

impl From<&Artist> for ArtistSummary {
  fn from(artist: &Artist) -> Self {
    ArtistSummary { id: artist.id, name: artist.name.clone(), genre: artist.genre.clone() }
  }
}

/// A validated creation payload. Every field is already trimmed and within bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArtist {
  pub name: String,
  pub bio: String,
  pub genre: String,
}

impl NewArtist {
  /// Turns the payload into a full row with a fresh id and `created_at == updated_at == now`.
  pub fn into_artist(self, now: DateTime<Utc>) -> Artist {
    Artist {
      id: ArtistId::new(),
      name: self.name,
      bio: self.bio,
      genre: self.genre,
      created_at: now,
      updated_at: now,
    }
  }
}
