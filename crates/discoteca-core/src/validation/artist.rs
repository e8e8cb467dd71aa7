use serde_json::Value;

use super::{Fields, TextRule, ValidationError};
use crate::domain::NewArtist;

const NAME: TextRule = TextRule::new("Name is required", 100).too_long("Name is too long");
const BIO: TextRule = TextRule::new("Bio is required", 500).too_long("Bio is too long");
const GENRE: TextRule = TextRule::new("Genre is required", 50);

/// Validates an artist creation body: `name` (1..=100), `bio` (1..=500), `genre` (1..=50).
pub fn validate_artist(body: &Value) -> Result<NewArtist, ValidationError> {
  let mut fields = Fields::of(body)?;

  let name = fields.text("name", NAME);
  let bio = fields.text("bio", BIO);
  let genre = fields.text("genre", GENRE);

  let artist = match (name, bio, genre) {
    (Some(name), Some(bio), Some(genre)) => Some(NewArtist { name, bio, genre }),
    _ => None,
  };

  fields.finish(artist)
}
