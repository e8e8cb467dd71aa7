use chrono::{DateTime, SubsecRound, Utc};
use tracing::debug;

use crate::domain::{Artist, ArtistFilter, ArtistId, ArtistSummary, NewArtist};
use crate::domain::{NewRelease, Release, ReleaseFilter, ReleaseSummary};
use crate::errors::CoreError;
use crate::ports::CatalogRepository;

/// Data-access operations for artists and releases.
///
/// Built per request over a request-scoped repository session. Every method is
/// a single attempt: nothing here retries, and nothing is cached between calls.
pub struct CatalogService<R>
where
  R: CatalogRepository,
{
  repo: R,
}

impl<R> CatalogService<R>
where
  R: CatalogRepository,
{
  pub fn new(repo: R) -> Self {
    Self { repo }
  }

  pub fn repository(&self) -> &R {
    &self.repo
  }

  // -------- QUERY (read) --------

  pub fn list_artists(&self, filter: &ArtistFilter) -> Result<Vec<ArtistSummary>, CoreError> {
    debug!(?filter, "listing artists");
    Ok(self.repo.list_artists(filter)?)
  }

  /// Fetches one artist. An id that is not a UUID cannot match any row and is
  /// reported as not found, like any other unknown id.
  pub fn get_artist(&self, id: &str) -> Result<Artist, CoreError> {
    let not_found = || CoreError::NotFound(format!("Artist with ID '{id}' not found"));

    let artist_id: ArtistId = id.parse().map_err(|_| not_found())?;

    self.repo.find_artist(artist_id)?.ok_or_else(not_found)
  }

  pub fn list_releases(&self, filter: &ReleaseFilter) -> Result<Vec<ReleaseSummary>, CoreError> {
    debug!(?filter, "listing releases");
    Ok(self.repo.list_releases(filter)?)
  }

  // -------- COMMAND (write) --------

  /// Inserts a new artist and returns the inserted row(s).
  pub fn create_artist(&self, payload: NewArtist) -> Result<Vec<Artist>, CoreError> {
    let artist = payload.into_artist(now());
    debug!(id = %artist.id, "creating artist");

    Ok(self.repo.insert_artist(&artist)?)
  }

  /// Inserts a new release after checking that its artist exists.
  ///
  /// The check and the insert are two separate statements. Nothing deletes
  /// artists today, so the gap between them cannot be observed; a delete
  /// operation would have to run both inside one transaction.
  pub fn create_release(&self, payload: NewRelease) -> Result<Vec<Release>, CoreError> {
    if !self.repo.artist_exists(payload.artist_id)? {
      debug!(artist_id = %payload.artist_id, "release references unknown artist");
      return Err(CoreError::NotFound("Artist not found".to_string()));
    }

    let release = payload.into_release(now());
    debug!(id = %release.id, artist_id = %release.artist_id, "creating release");

    Ok(self.repo.insert_release(&release)?)
  }
}

/// Current instant at the store's millisecond precision.
fn now() -> DateTime<Utc> {
  Utc::now().trunc_subsecs(3)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::ReleaseStatus;
  use crate::ports::RepoError;
  use chrono::TimeZone;
  use std::cell::{Cell, RefCell};

  /// In-memory stand-in for the SQLite adapter.
  #[derive(Default)]
  struct MemoryRepository {
    artists: RefCell<Vec<Artist>>,
    releases: RefCell<Vec<Release>>,
    calls: Cell<usize>,
    broken: bool,
  }

  impl MemoryRepository {
    fn touch(&self) -> Result<(), RepoError> {
      self.calls.set(self.calls.get() + 1);
      if self.broken { Err(RepoError::Storage("disk I/O error".to_string())) } else { Ok(()) }
    }
  }

  impl CatalogRepository for MemoryRepository {
    fn insert_artist(&self, artist: &Artist) -> Result<Vec<Artist>, RepoError> {
      self.touch()?;
      self.artists.borrow_mut().push(artist.clone());
      Ok(vec![artist.clone()])
    }

    fn find_artist(&self, id: ArtistId) -> Result<Option<Artist>, RepoError> {
      self.touch()?;
      Ok(self.artists.borrow().iter().find(|a| a.id == id).cloned())
    }

    fn artist_exists(&self, id: ArtistId) -> Result<bool, RepoError> {
      self.touch()?;
      Ok(self.artists.borrow().iter().any(|a| a.id == id))
    }

    fn list_artists(&self, filter: &ArtistFilter) -> Result<Vec<ArtistSummary>, RepoError> {
      self.touch()?;
      Ok(
        self
          .artists
          .borrow()
          .iter()
          .map(ArtistSummary::from)
          .filter(|summary| filter.matches(summary))
          .collect(),
      )
    }

    fn insert_release(&self, release: &Release) -> Result<Vec<Release>, RepoError> {
      self.touch()?;
      self.releases.borrow_mut().push(release.clone());
      Ok(vec![release.clone()])
    }

    fn list_releases(&self, filter: &ReleaseFilter) -> Result<Vec<ReleaseSummary>, RepoError> {
      self.touch()?;
      Ok(
        self
          .releases
          .borrow()
          .iter()
          .filter(|r| filter.matches(&ReleaseSummary::from(*r), &r.genre))
          .map(ReleaseSummary::from)
          .collect(),
      )
    }
  }

  fn service() -> CatalogService<MemoryRepository> {
    CatalogService::new(MemoryRepository::default())
  }

  fn new_artist(name: &str, genre: &str) -> NewArtist {
    NewArtist { name: name.to_string(), bio: "Bio".to_string(), genre: genre.to_string() }
  }

  fn new_release(artist_id: ArtistId) -> NewRelease {
    NewRelease {
      title: "Blue Train".to_string(),
      release_date: Utc.with_ymd_and_hms(1958, 1, 1, 0, 0, 0).unwrap(),
      status: ReleaseStatus::Released,
      genre: "Jazz".to_string(),
      artist_id,
    }
  }

  #[test]
  fn test_create_artist_generates_id_and_equal_timestamps() {
    let catalog = service();

    let first = catalog.create_artist(new_artist("Test", "Jazz")).unwrap();
    let second = catalog.create_artist(new_artist("Test", "Jazz")).unwrap();

    assert_eq!(first.len(), 1);
    assert_ne!(first[0].id, second[0].id);
    assert_eq!(first[0].created_at, first[0].updated_at);
    assert_eq!(first[0].name, "Test");
  }

  #[test]
  fn test_get_artist_not_found_is_an_error() {
    let catalog = service();

    let err = catalog.get_artist("00000000-0000-0000-0000-000000000000").unwrap_err();
    assert!(matches!(
      err,
      CoreError::NotFound(ref msg) if msg == "Artist with ID '00000000-0000-0000-0000-000000000000' not found"
    ));

    let calls_before = catalog.repository().calls.get();
    assert!(matches!(catalog.get_artist("nope"), Err(CoreError::NotFound(_))));
    assert_eq!(catalog.repository().calls.get(), calls_before);
  }

  #[test]
  fn test_get_artist_returns_full_row() {
    let catalog = service();
    let created = catalog.create_artist(new_artist("Alice Coltrane", "Jazz")).unwrap();

    let fetched = catalog.get_artist(&created[0].id.to_string()).unwrap();
    assert_eq!(fetched, created[0]);
  }

  #[test]
  fn test_list_artists_filters() {
    let catalog = service();
    catalog.create_artist(new_artist("A", "Rock")).unwrap();
    catalog.create_artist(new_artist("B", "rock")).unwrap();
    catalog.create_artist(new_artist("C", "Jazz")).unwrap();

    assert_eq!(catalog.list_artists(&ArtistFilter::default()).unwrap().len(), 3);

    let upper = catalog.list_artists(&ArtistFilter::default().with_genre("Rock")).unwrap();
    let lower = catalog.list_artists(&ArtistFilter::default().with_genre("rock")).unwrap();
    assert_eq!(upper, lower);
    assert_eq!(upper.len(), 2);

    let both =
      catalog.list_artists(&ArtistFilter::default().with_genre("ROCK").with_name("b")).unwrap();
    assert_eq!(both.len(), 1);
    assert_eq!(both[0].name, "B");
  }

  #[test]
  fn test_create_release_requires_existing_artist() {
    let catalog = service();

    let err = catalog.create_release(new_release(ArtistId::new())).unwrap_err();

    assert!(matches!(err, CoreError::NotFound(ref msg) if msg == "Artist not found"));
    assert!(catalog.repository().releases.borrow().is_empty());
  }

  #[test]
  fn test_create_and_list_releases() {
    let catalog = service();
    let artist = catalog.create_artist(new_artist("John Coltrane", "Jazz")).unwrap().remove(0);

    let created = catalog.create_release(new_release(artist.id)).unwrap();
    assert_eq!(created[0].artist_id, artist.id);
    assert_eq!(created[0].created_at, created[0].updated_at);

    let listed = catalog
      .list_releases(&ReleaseFilter::default().with_artist_id(artist.id.to_string()).with_status("Released"))
      .unwrap();
    assert_eq!(listed, vec![ReleaseSummary::from(&created[0])]);

    let other = catalog.list_releases(&ReleaseFilter::default().with_genre("rock")).unwrap();
    assert!(other.is_empty());
  }

  #[test]
  fn test_storage_failures_surface_as_repository_errors() {
    let catalog = CatalogService::new(MemoryRepository { broken: true, ..Default::default() });

    let err = catalog.list_artists(&ArtistFilter::default()).unwrap_err();
    assert!(matches!(err, CoreError::Repository(ref msg) if msg == "disk I/O error"));
  }
}
