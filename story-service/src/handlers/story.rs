use axum::{body::Bytes, extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::models::ResponseEnvelope;
use crate::startup::AppState;

/// `POST /ask`: generate a story from the five request fields.
///
/// The body is read as raw bytes so that a missing or non-JSON body gets the
/// same error envelope as any other invalid request.
pub async fn ask(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    match state.story_handler.handle(&body).await {
        Ok(story) => (StatusCode::OK, Json(ResponseEnvelope::success(story))).into_response(),
        Err(e) => e.into_response(),
    }
}
