use crate::domain::{Artist, ArtistFilter, ArtistId, ArtistSummary};
use crate::domain::{Release, ReleaseFilter, ReleaseSummary};

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
  #[error("entity not found")]
  NotFound,
  #[error("storage error: {0}")]
  Storage(String),
}

/// Port over the relational store.
///
/// An implementation is a request-scoped session: the HTTP layer opens one per
/// request and drops it when the request's operation completes. Inserts
/// return the rows as the store wrote them (`RETURNING`).
pub trait CatalogRepository {
  fn insert_artist(&self, artist: &Artist) -> Result<Vec<Artist>, RepoError>;
  fn find_artist(&self, id: ArtistId) -> Result<Option<Artist>, RepoError>;
  fn artist_exists(&self, id: ArtistId) -> Result<bool, RepoError>;
  fn list_artists(&self, filter: &ArtistFilter) -> Result<Vec<ArtistSummary>, RepoError>;

  fn insert_release(&self, release: &Release) -> Result<Vec<Release>, RepoError>;
  fn list_releases(&self, filter: &ReleaseFilter) -> Result<Vec<ReleaseSummary>, RepoError>;
}
