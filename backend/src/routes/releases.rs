use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde_json::Value;

use discoteca_core::domain::ReleaseFilter;
use discoteca_core::validation::validate_release;

use crate::error::ApiError;
use crate::response::Envelope;
use crate::state::AppState;

/// GET /releases?artist_id=&genre=&status=
pub async fn list(
  State(state): State<AppState>,
  query: Result<Query<ReleaseFilter>, QueryRejection>,
) -> Result<Envelope, ApiError> {
  let Query(filter) = query?;
  let releases = state.with_catalog(move |catalog| catalog.list_releases(&filter)).await?;

  Ok(Envelope::success().field("results", &releases)?)
}

/// POST /releases
///
/// Validation runs before any connection is checked out.
pub async fn create(
  State(state): State<AppState>,
  body: Result<Json<Value>, JsonRejection>,
) -> Result<Envelope, ApiError> {
  let Json(body) = body?;
  let payload = validate_release(&body)?;

  let inserted = state.with_catalog(move |catalog| catalog.create_release(payload)).await?;

  Ok(
    Envelope::success()
      .with_message("Release created")
      .with_status(StatusCode::CREATED)
      .field("result", &inserted)?,
  )
}
