use chrono::{DateTime, NaiveDate, NaiveDateTime, SubsecRound, Utc};
use serde_json::Value;
use uuid::Uuid;

use super::{Fields, TextRule, ValidationError, type_name};
use crate::domain::{ArtistId, NewRelease, ReleaseStatus};

const TITLE: TextRule = TextRule::new("Title is required", 100).too_long("Title is too long");
const GENRE: TextRule = TextRule::new("Genre is required", 100).too_long("Genre is too long");

const STATUS_MESSAGE: &str = "Status must be one of: unreleased, released, trending";

/// Validates a release creation body.
///
/// `release_date` accepts an ISO 8601 date-time with or without an offset (read
/// as UTC when absent, `T` or a space between date and time), or a calendar
/// date down to year precision (midnight UTC on the first day). The result is
/// truncated to whole seconds.
/// `artist_id` must be a hyphenated UUID; whether the artist exists is checked
/// later, by the catalog service.
pub fn validate_release(body: &Value) -> Result<NewRelease, ValidationError> {
  let mut fields = Fields::of(body)?;

  let title = fields.text("title", TITLE);
  let release_date = release_date(&mut fields);
  let status = status(&mut fields);
  let genre = fields.text("genre", GENRE);
  let artist_id = artist_id(&mut fields);

  let release = match (title, release_date, status, genre, artist_id) {
    (Some(title), Some(release_date), Some(status), Some(genre), Some(artist_id)) => {
      Some(NewRelease { title, release_date, status, genre, artist_id })
    }
    _ => None,
  };

  fields.finish(release)
}

fn release_date(fields: &mut Fields<'_>) -> Option<DateTime<Utc>> {
  match fields.get("release_date") {
    None => {
      fields.reject("release_date", "Date is required");
      None
    }
    Some(Value::String(raw)) => match parse_date(raw) {
      Some(date) => Some(date.trunc_subsecs(0)),
      None => {
        fields.reject("release_date", "Invalid date");
        None
      }
    },
    Some(_) => {
      fields.reject("release_date", "Invalid date format");
      None
    }
  }
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
  let raw = raw.trim();

  // "2024-03-01 12:30" reads like "2024-03-01T12:30"
  let raw = match raw.as_bytes().get(10) {
    Some(b' ') => format!("{}T{}", &raw[..10], &raw[11..]),
    _ => raw.to_string(),
  };

  if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
    return Some(dt.with_timezone(&Utc));
  }

  if let Ok(dt) = DateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M%#z") {
    return Some(dt.with_timezone(&Utc));
  }

  for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
    if let Ok(naive) = NaiveDateTime::parse_from_str(&raw, format) {
      return Some(naive.and_utc());
    }
  }

  parse_calendar_date(&raw).and_then(|date| date.and_hms_opt(0, 0, 0)).map(|naive| naive.and_utc())
}

/// `YYYY-MM-DD`, `YYYY-MM` or `YYYY`; missing parts default to the first.
fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
  let full = match raw.len() {
    4 => format!("{raw}-01-01"),
    7 => format!("{raw}-01"),
    _ => raw.to_string(),
  };

  NaiveDate::parse_from_str(&full, "%Y-%m-%d").ok()
}

fn status(fields: &mut Fields<'_>) -> Option<ReleaseStatus> {
  let parsed = match fields.get("status") {
    Some(Value::String(raw)) => raw.parse::<ReleaseStatus>().ok(),
    _ => None,
  };

  if parsed.is_none() {
    fields.reject("status", STATUS_MESSAGE);
  }

  parsed
}

fn artist_id(fields: &mut Fields<'_>) -> Option<ArtistId> {
  match fields.get("artist_id") {
    None => {
      fields.reject("artist_id", "Required");
      None
    }
    Some(Value::String(raw)) => match Uuid::parse_str(raw) {
      // Only the canonical 8-4-4-4-12 spelling is accepted.
      Ok(uuid) if raw.len() == 36 => Some(ArtistId::from_uuid(uuid)),
      _ => {
        fields.reject("artist_id", "Invalid Artist ID format");
        None
      }
    },
    Some(other) => {
      fields.reject("artist_id", format!("Expected string, received {}", type_name(other)));
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::validation::FieldError;
  use chrono::TimeZone;
  use serde_json::json;

  const ARTIST: &str = "0b5c6f2e-3a6d-4f4e-9a39-1f0d9f3c2b11";

  fn payload() -> Value {
    json!({
      "title": "Kind of Blue",
      "release_date": "1959-08-17",
      "status": "released",
      "genre": "Jazz",
      "artist_id": ARTIST,
    })
  }

  #[test]
  fn test_valid_payload() {
    let release = validate_release(&payload()).unwrap();

    assert_eq!(release.title, "Kind of Blue");
    assert_eq!(release.release_date, Utc.with_ymd_and_hms(1959, 8, 17, 0, 0, 0).unwrap());
    assert_eq!(release.status, ReleaseStatus::Released);
    assert_eq!(release.artist_id.to_string(), ARTIST);
  }

  #[test]
  fn test_date_formats() {
    let expected = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 15).unwrap();

    for raw in [
      "2024-03-01T12:30:15Z",
      "2024-03-01T14:30:15+02:00",
      "2024-03-01T12:30:15.750",
      "2024-03-01 12:30:15",
      "2024-03-01 12:30:15Z",
    ] {
      assert_eq!(parse_date(raw).map(|d| d.trunc_subsecs(0)), Some(expected), "{raw}");
    }

    let minutes = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
    for raw in ["2024-03-01T12:30Z", "2024-03-01T14:30+02:00", "2024-03-01T12:30", "2024-03-01 12:30"] {
      assert_eq!(parse_date(raw), Some(minutes), "{raw}");
    }

    let first_of_march = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    assert_eq!(parse_date("2024-03-01"), Some(first_of_march));
    assert_eq!(parse_date("2024-03"), Some(first_of_march));
    assert_eq!(parse_date("2024"), Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));

    assert_eq!(parse_date("not a date"), None);
    assert_eq!(parse_date("2024-13-01"), None);
    assert_eq!(parse_date("2024-13"), None);
    assert_eq!(parse_date("20x4"), None);
  }

  #[test]
  fn test_date_errors() {
    let mut body = payload();

    body.as_object_mut().unwrap().remove("release_date");
    assert_eq!(
      validate_release(&body).unwrap_err().errors,
      vec![FieldError::new("release_date", "Date is required")]
    );

    body["release_date"] = Value::Null;
    assert_eq!(
      validate_release(&body).unwrap_err().errors,
      vec![FieldError::new("release_date", "Invalid date format")]
    );

    body["release_date"] = json!(1_700_000_000);
    assert_eq!(
      validate_release(&body).unwrap_err().errors,
      vec![FieldError::new("release_date", "Invalid date format")]
    );

    body["release_date"] = json!("yesterday");
    assert_eq!(
      validate_release(&body).unwrap_err().errors,
      vec![FieldError::new("release_date", "Invalid date")]
    );
  }

  #[test]
  fn test_status_outside_set() {
    for status in [json!("archived"), json!("Released"), json!(1)] {
      let mut body = payload();
      body["status"] = status;

      assert_eq!(
        validate_release(&body).unwrap_err().errors,
        vec![FieldError::new("status", STATUS_MESSAGE)]
      );
    }
  }

  #[test]
  fn test_artist_id_format() {
    let mut body = payload();
    body["artist_id"] = json!("0b5c6f2e3a6d4f4e9a391f0d9f3c2b11");
    assert!(validate_release(&body).unwrap_err().has_path("artist_id"));

    body["artist_id"] = json!("artist-1");
    assert_eq!(
      validate_release(&body).unwrap_err().errors,
      vec![FieldError::new("artist_id", "Invalid Artist ID format")]
    );

    body["artist_id"] = json!(42);
    assert_eq!(
      validate_release(&body).unwrap_err().errors,
      vec![FieldError::new("artist_id", "Expected string, received number")]
    );
  }

  #[test]
  fn test_empty_body_lists_all_fields() {
    let err = validate_release(&json!({})).unwrap_err();
    let paths: Vec<_> = err.errors.iter().map(|e| e.path.as_str()).collect();

    assert_eq!(paths, vec!["title", "release_date", "status", "genre", "artist_id"]);
  }
}
