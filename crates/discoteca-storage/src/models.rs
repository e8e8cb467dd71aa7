use crate::schema::{artists, releases};

use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

use discoteca_core::domain::{Artist, ArtistId, ArtistSummary};
use discoteca_core::domain::{Release, ReleaseId, ReleaseStatus, ReleaseSummary};
use discoteca_core::ports::RepoError;

#[derive(Debug, Queryable, Selectable, Insertable)]
#[diesel(table_name = artists)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ArtistRow {
  pub id: String,
  pub name: String,
  pub bio: String,
  pub genre: String,
  pub created_at: NaiveDateTime,
  pub updated_at: NaiveDateTime,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = artists)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ArtistSummaryRow {
  pub id: String,
  pub name: String,
  pub genre: String,
}

#[derive(Debug, Queryable, Selectable, Insertable)]
#[diesel(table_name = releases)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ReleaseRow {
  pub id: String,
  pub title: String,
  pub release_date: NaiveDateTime,
  pub status: String,
  pub genre: String,
  pub artist_id: String,
  pub created_at: NaiveDateTime,
  pub updated_at: NaiveDateTime,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = releases)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ReleaseSummaryRow {
  pub id: String,
  pub title: String,
  pub status: String,
  pub artist_id: String,
}

fn parse_uuid(column: &str, raw: &str) -> Result<Uuid, RepoError> {
  Uuid::parse_str(raw).map_err(|e| RepoError::Storage(format!("invalid uuid in {column}: {e}")))
}

fn parse_status(raw: &str) -> Result<ReleaseStatus, RepoError> {
  raw.parse().map_err(|e| RepoError::Storage(format!("releases.status: {e}")))
}

impl From<&Artist> for ArtistRow {
  fn from(artist: &Artist) -> Self {
    ArtistRow {
      id: artist.id.to_string(),
      name: artist.name.clone(),
      bio: artist.bio.clone(),
      genre: artist.genre.clone(),
      created_at: artist.created_at.naive_utc(),
      updated_at: artist.updated_at.naive_utc(),
    }
  }
}

impl TryFrom<ArtistRow> for Artist {
  type Error = RepoError;

  fn try_from(row: ArtistRow) -> Result<Self, Self::Error> {
    Ok(Artist {
      id: ArtistId::from_uuid(parse_uuid("artists.id", &row.id)?),
      name: row.name,
      bio: row.bio,
      genre: row.genre,
      created_at: row.created_at.and_utc(),
      updated_at: row.updated_at.and_utc(),
    })
  }
}

impl TryFrom<ArtistSummaryRow> for ArtistSummary {
  type Error = RepoError;

  fn try_from(row: ArtistSummaryRow) -> Result<Self, Self::Error> {
    Ok(ArtistSummary {
      id: ArtistId::from_uuid(parse_uuid("artists.id", &row.id)?),
      name: row.name,
      genre: row.genre,
    })
  }
}

impl From<&Release> for ReleaseRow {
  fn from(release: &Release) -> Self {
    ReleaseRow {
      id: release.id.to_string(),
      title: release.title.clone(),
      release_date: release.release_date.naive_utc(),
      status: release.status.as_str().to_string(),
      genre: release.genre.clone(),
      artist_id: release.artist_id.to_string(),
      created_at: release.created_at.naive_utc(),
      updated_at: release.updated_at.naive_utc(),
    }
  }
}

impl TryFrom<ReleaseRow> for Release {
  type Error = RepoError;

  fn try_from(row: ReleaseRow) -> Result<Self, Self::Error> {
    Ok(Release {
      id: ReleaseId::from_uuid(parse_uuid("releases.id", &row.id)?),
      title: row.title,
      release_date: row.release_date.and_utc(),
      status: parse_status(&row.status)?,
      genre: row.genre,
      artist_id: ArtistId::from_uuid(parse_uuid("releases.artist_id", &row.artist_id)?),
      created_at: row.created_at.and_utc(),
      updated_at: row.updated_at.and_utc(),
    })
  }
}

impl TryFrom<ReleaseSummaryRow> for ReleaseSummary {
  type Error = RepoError;

  fn try_from(row: ReleaseSummaryRow) -> Result<Self, Self::Error> {
    Ok(ReleaseSummary {
      id: ReleaseId::from_uuid(parse_uuid("releases.id", &row.id)?),
      title: row.title,
      status: parse_status(&row.status)?,
      artist_id: ArtistId::from_uuid(parse_uuid("releases.artist_id", &row.artist_id)?),
    })
  }
}
