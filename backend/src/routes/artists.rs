use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use serde_json::Value;
use tracing::debug;

use discoteca_core::domain::ArtistFilter;
use discoteca_core::validation::validate_artist;

use crate::error::ApiError;
use crate::response::Envelope;
use crate::state::AppState;

/// GET /artists?genre=&name=
pub async fn list(
  State(state): State<AppState>,
  query: Result<Query<ArtistFilter>, QueryRejection>,
) -> Result<Envelope, ApiError> {
  let Query(filter) = query?;
  let artists = state.with_catalog(move |catalog| catalog.list_artists(&filter)).await?;

  Ok(Envelope::success().field("results", &artists)?)
}

/// GET /artists/:id
///
/// A segment that does not percent-decode to UTF-8 is looked up as written,
/// which can only end in "not found".
pub async fn show(
  State(state): State<AppState>,
  OriginalUri(uri): OriginalUri,
  path: Result<Path<String>, PathRejection>,
) -> Result<Envelope, ApiError> {
  let id = match path {
    Ok(Path(id)) => id,
    Err(rejection) => {
      debug!(%rejection, "undecodable artist id");
      uri.path().rsplit('/').next().unwrap_or_default().to_string()
    }
  };

  let artist = state.with_catalog(move |catalog| catalog.get_artist(&id)).await?;

  Ok(Envelope::success().field("result", &artist)?)
}

/// POST /artists
pub async fn create(
  State(state): State<AppState>,
  body: Result<Json<Value>, JsonRejection>,
) -> Result<Envelope, ApiError> {
  let Json(body) = body?;
  let payload = validate_artist(&body)?;

  let inserted = state.with_catalog(move |catalog| catalog.create_artist(payload)).await?;

  Ok(
    Envelope::success()
      .with_message("Artist created")
      .with_status(StatusCode::CREATED)
      .field("result", &inserted)?,
  )
}
