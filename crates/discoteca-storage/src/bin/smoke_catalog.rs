use chrono::{TimeZone, Utc};
use discoteca_core::domain::{ArtistFilter, NewArtist, NewRelease, ReleaseFilter, ReleaseStatus};
use discoteca_storage::{CatalogStore, StorageConfig};

fn main() {
  // usa DISCOTECA_DATABASE_URL si existe, si no un archivo local
  let cfg = StorageConfig::at("discoteca-smoke.db").with_env_override();
  let store = CatalogStore::open(&cfg).expect("failed to open store");
  let catalog = store.catalog().expect("failed to check out a connection");

  let artist = catalog
    .create_artist(NewArtist {
      name: "Test Artist".to_string(),
      bio: "Artista de prueba".to_string(),
      genre: "Rock".to_string(),
    })
    .expect("failed to save artist")
    .remove(0);

  println!("Saved artist with id = {}", artist.id);

  let release = catalog
    .create_release(NewRelease {
      title: "Test Release".to_string(),
      release_date: Utc.with_ymd_and_hms(2025, 12, 7, 0, 0, 0).unwrap(),
      status: ReleaseStatus::Unreleased,
      genre: "Rock".to_string(),
      artist_id: artist.id,
    })
    .expect("failed to save release")
    .remove(0);

  println!("Saved release with id = {}", release.id);

  let loaded = catalog.get_artist(&artist.id.to_string()).expect("failed to load artist");
  println!("Loaded from DB: {loaded:?}");

  let rock = catalog.list_artists(&ArtistFilter::default().with_genre("rock")).expect("list artists");
  println!("Rock artists: {}", rock.len());

  let releases = catalog
    .list_releases(&ReleaseFilter::default().with_artist_id(artist.id.to_string()))
    .expect("list releases");
  println!("Releases for artist: {releases:?}");
}
