use serde::Serialize;

pub const SUCCESS_MESSAGE: &str = "Story generated successfully";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    Error,
}

/// Uniform JSON body returned by `/ask`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseEnvelope {
    pub status: EnvelopeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResponseEnvelope {
    pub fn success(story: impl Into<String>) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            message: Some(SUCCESS_MESSAGE.to_string()),
            story: Some(story.into()),
            error: None,
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            status: EnvelopeStatus::Error,
            message: None,
            story: None,
            error: Some(error.into()),
        }
    }
}
