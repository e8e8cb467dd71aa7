pub mod artists;
pub mod releases;

use axum::Router;
use axum::extract::OriginalUri;
use axum::routing::get;

use crate::error::ApiError;
use crate::response::Envelope;
use crate::state::AppState;

/// Every route of the API. Unknown paths and unsupported methods on known
/// paths both fall through to [`unmatched`].
pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/", get(root).fallback(unmatched))
    .route("/artists", get(artists::list).post(artists::create).fallback(unmatched))
    .route("/artists/:id", get(artists::show).fallback(unmatched))
    .route("/releases", get(releases::list).post(releases::create).fallback(unmatched))
    .fallback(unmatched)
    .with_state(state)
}

async fn root() -> Envelope {
  Envelope::ok()
}

async fn unmatched(OriginalUri(uri): OriginalUri) -> ApiError {
  ApiError::UnmatchedRoute(uri.path().to_string())
}
