use std::cell::RefCell;
use std::ops::DerefMut;

use diesel::prelude::*;
use diesel::sql_types::Bool;
use diesel::sqlite::{Sqlite, SqliteConnection};

use discoteca_core::domain::{Artist, ArtistFilter, ArtistId, ArtistSummary};
use discoteca_core::domain::{Release, ReleaseFilter, ReleaseSummary};
use discoteca_core::ports::{CatalogRepository, RepoError};

use crate::functions::lower;
use crate::models::{ArtistRow, ArtistSummaryRow, ReleaseRow, ReleaseSummaryRow};
use crate::schema::{artists, releases};

type ArtistPredicate = Box<dyn BoxableExpression<artists::table, Sqlite, SqlType = Bool>>;
type ReleasePredicate = Box<dyn BoxableExpression<releases::table, Sqlite, SqlType = Bool>>;

fn storage_err(e: diesel::result::Error) -> RepoError {
  RepoError::Storage(e.to_string())
}

/// One predicate per present filter field, in field order. Absent fields add nothing.
fn artist_predicates(filter: &ArtistFilter) -> Vec<ArtistPredicate> {
  let mut predicates: Vec<ArtistPredicate> = Vec::new();

  if let Some(genre) = &filter.genre {
    predicates.push(Box::new(lower(artists::genre).eq(genre.to_lowercase())));
  }
  if let Some(name) = &filter.name {
    predicates.push(Box::new(lower(artists::name).eq(name.to_lowercase())));
  }

  predicates
}

fn release_predicates(filter: &ReleaseFilter) -> Vec<ReleasePredicate> {
  let mut predicates: Vec<ReleasePredicate> = Vec::new();

  if let Some(artist_id) = &filter.artist_id {
    predicates.push(Box::new(releases::artist_id.eq(artist_id.clone())));
  }
  if let Some(genre) = &filter.genre {
    predicates.push(Box::new(lower(releases::genre).eq(genre.to_lowercase())));
  }
  if let Some(status) = &filter.status {
    predicates.push(Box::new(lower(releases::status).eq(status.to_lowercase())));
  }

  predicates
}

/// SQLite adapter for [`CatalogRepository`].
///
/// Wraps a single connection for the lifetime of one request; `C` is either a
/// pooled connection or, in tests and tools, a boxed standalone one.
pub struct SqliteCatalogRepository<C>
where
  C: DerefMut<Target = SqliteConnection>,
{
  conn: RefCell<C>,
}

impl<C> SqliteCatalogRepository<C>
where
  C: DerefMut<Target = SqliteConnection>,
{
  pub fn new(conn: C) -> Self {
    Self { conn: RefCell::new(conn) }
  }

  pub fn into_inner(self) -> C {
    self.conn.into_inner()
  }

  pub fn count_releases(&self) -> Result<i64, RepoError> {
    let mut conn = self.conn.borrow_mut();
    releases::table.count().get_result(&mut **conn).map_err(storage_err)
  }
}

impl<C> CatalogRepository for SqliteCatalogRepository<C>
where
  C: DerefMut<Target = SqliteConnection>,
{
  fn insert_artist(&self, artist: &Artist) -> Result<Vec<Artist>, RepoError> {
    let row = ArtistRow::from(artist);
    let mut conn = self.conn.borrow_mut();

    let inserted = diesel::insert_into(artists::table)
      .values(&row)
      .returning(ArtistRow::as_returning())
      .get_results(&mut **conn)
      .map_err(storage_err)?;

    inserted.into_iter().map(Artist::try_from).collect()
  }

  fn find_artist(&self, artist_id: ArtistId) -> Result<Option<Artist>, RepoError> {
    let mut conn = self.conn.borrow_mut();

    let row_opt = artists::table
      .filter(artists::id.eq(artist_id.to_string()))
      .select(ArtistRow::as_select())
      .first(&mut **conn)
      .optional()
      .map_err(storage_err)?;

    row_opt.map(Artist::try_from).transpose()
  }

  fn artist_exists(&self, artist_id: ArtistId) -> Result<bool, RepoError> {
    let mut conn = self.conn.borrow_mut();

    diesel::select(diesel::dsl::exists(
      artists::table.filter(artists::id.eq(artist_id.to_string())),
    ))
    .get_result(&mut **conn)
    .map_err(storage_err)
  }

  fn list_artists(&self, filter: &ArtistFilter) -> Result<Vec<ArtistSummary>, RepoError> {
    let mut query = artists::table.select(ArtistSummaryRow::as_select()).into_boxed();
    for predicate in artist_predicates(filter) {
      query = query.filter(predicate);
    }

    let mut conn = self.conn.borrow_mut();
    let rows = query.load(&mut **conn).map_err(storage_err)?;

    rows.into_iter().map(ArtistSummary::try_from).collect()
  }

  fn insert_release(&self, release: &Release) -> Result<Vec<Release>, RepoError> {
    let row = ReleaseRow::from(release);
    let mut conn = self.conn.borrow_mut();

    let inserted = diesel::insert_into(releases::table)
      .values(&row)
      .returning(ReleaseRow::as_returning())
      .get_results(&mut **conn)
      .map_err(storage_err)?;

    inserted.into_iter().map(Release::try_from).collect()
  }

  fn list_releases(&self, filter: &ReleaseFilter) -> Result<Vec<ReleaseSummary>, RepoError> {
    let mut query = releases::table.select(ReleaseSummaryRow::as_select()).into_boxed();
    for predicate in release_predicates(filter) {
      query = query.filter(predicate);
    }

    let mut conn = self.conn.borrow_mut();
    let rows = query.load(&mut **conn).map_err(storage_err)?;

    rows.into_iter().map(ReleaseSummary::try_from).collect()
  }
}
