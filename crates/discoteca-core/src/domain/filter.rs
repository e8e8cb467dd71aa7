//! Optional list filters.
//!
//! A filter that is absent (or given as an empty string) places no restriction
//! on its field. Adapters must omit the predicate entirely in that case rather
//! than compare against an empty value.

use serde::{Deserialize, Deserializer};

use crate::domain::artist::ArtistSummary;
use crate::domain::release::ReleaseSummary;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ArtistFilter {
  /// Case-insensitive equality on `genre`.
  #[serde(default, deserialize_with = "non_empty")]
  pub genre: Option<String>,
  /// Case-insensitive equality on `name`.
  #[serde(default, deserialize_with = "non_empty")]
  pub name: Option<String>,
}

impl ArtistFilter {
  pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
    self.genre = Some(genre.into()).filter(|g| !g.is_empty());
    self
  }

  pub fn with_name(mut self, name: impl Into<String>) -> Self {
    self.name = Some(name.into()).filter(|n| !n.is_empty());
    self
  }

  pub fn is_empty(&self) -> bool {
    self.genre.is_none() && self.name.is_none()
  }

  /// In-memory reference semantics for the filter.
  pub fn matches(&self, artist: &ArtistSummary) -> bool {
    eq_ignore_case(self.genre.as_deref(), &artist.genre)
      && eq_ignore_case(self.name.as_deref(), &artist.name)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReleaseFilter {
  /// Exact match on the owning artist id, compared as text.
  #[serde(default, deserialize_with = "non_empty")]
  pub artist_id: Option<String>,
  /// Case-insensitive equality on `genre`.
  #[serde(default, deserialize_with = "non_empty")]
  pub genre: Option<String>,
  /// Case-insensitive equality on `status`.
  #[serde(default, deserialize_with = "non_empty")]
  pub status: Option<String>,
}

impl ReleaseFilter {
  pub fn with_artist_id(mut self, artist_id: impl Into<String>) -> Self {
    self.artist_id = Some(artist_id.into()).filter(|a| !a.is_empty());
    self
  }

  pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
    self.genre = Some(genre.into()).filter(|g| !g.is_empty());
    self
  }

  pub fn with_status(mut self, status: impl Into<String>) -> Self {
    self.status = Some(status.into()).filter(|s| !s.is_empty());
    self
  }

  pub fn is_empty(&self) -> bool {
    self.artist_id.is_none() && self.genre.is_none() && self.status.is_none()
  }

  /// In-memory reference semantics for the filter. `genre` lives on the full
  /// row, so it is passed separately from the summary.
  pub fn matches(&self, release: &ReleaseSummary, genre: &str) -> bool {
    self.artist_id.as_deref().is_none_or(|id| release.artist_id.to_string() == id)
      && eq_ignore_case(self.genre.as_deref(), genre)
      && eq_ignore_case(self.status.as_deref(), release.status.as_str())
  }
}

fn eq_ignore_case(wanted: Option<&str>, actual: &str) -> bool {
  wanted.is_none_or(|w| w.to_lowercase() == actual.to_lowercase())
}

fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Option::<String>::deserialize(deserializer)?;
  Ok(value.filter(|v| !v.is_empty()))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{ArtistId, ReleaseId, ReleaseStatus};

  #[test]
  fn test_empty_query_values_are_absent() {
    let filter: ArtistFilter = serde_json::from_value(serde_json::json!({
      "genre": "",
      "name": "Miles"
    }))
    .unwrap();

    assert_eq!(filter.genre, None);
    assert_eq!(filter.name.as_deref(), Some("Miles"));

    let none: ReleaseFilter = serde_json::from_value(serde_json::json!({})).unwrap();
    assert!(none.is_empty());
  }

  #[test]
  fn test_artist_filter_is_case_insensitive_and_conjunctive() {
    let artist =
      ArtistSummary { id: ArtistId::new(), name: "Nina Simone".to_string(), genre: "Jazz".to_string() };

    assert!(ArtistFilter::default().matches(&artist));
    assert!(ArtistFilter::default().with_genre("jazz").matches(&artist));
    assert!(ArtistFilter::default().with_genre("JAZZ").with_name("nina simone").matches(&artist));
    assert!(!ArtistFilter::default().with_genre("jazz").with_name("Miles").matches(&artist));
  }

  #[test]
  fn test_release_filter_artist_id_is_exact() {
    let release = ReleaseSummary {
      id: ReleaseId::new(),
      title: "Pastel Blues".to_string(),
      status: ReleaseStatus::Released,
      artist_id: ArtistId::new(),
    };

    let by_artist = ReleaseFilter::default().with_artist_id(release.artist_id.to_string());
    assert!(by_artist.matches(&release, "Jazz"));
    assert!(ReleaseFilter::default().with_status("RELEASED").matches(&release, "Jazz"));
    assert!(
      !ReleaseFilter::default()
        .with_artist_id(release.artist_id.to_string().to_uppercase())
        .matches(&release, "Jazz")
    );
  }
}
