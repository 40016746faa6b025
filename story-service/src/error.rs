use crate::models::ResponseEnvelope;
use crate::services::ProviderError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::time::Duration;
use thiserror::Error;

/// Everything that can stop a story request from producing a story.
#[derive(Debug, Error)]
pub enum StoryError {
    #[error("No JSON data provided")]
    NoJsonData,

    #[error("Missing fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Failed to generate story")]
    EmptyStory,

    #[error("{0}")]
    Provider(#[from] ProviderError),

    #[error("Story generation timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

impl StoryError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            StoryError::NoJsonData | StoryError::MissingFields(_) => StatusCode::BAD_REQUEST,
            StoryError::EmptyStory | StoryError::Provider(_) | StoryError::Timeout(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Metric label for the outcome this error represents.
    pub fn outcome(&self) -> &'static str {
        match self {
            StoryError::NoJsonData => "invalid_body",
            StoryError::MissingFields(_) => "missing_fields",
            StoryError::EmptyStory => "empty_story",
            StoryError::Provider(_) => "provider_error",
            StoryError::Timeout(_) => "timeout",
        }
    }
}

impl IntoResponse for StoryError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ResponseEnvelope::error(self.to_string()))).into_response()
    }
}
