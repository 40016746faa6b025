//! Story generation provider abstractions and implementations.
//!
//! Handlers only see [`StoryProvider`], so the templated stub can be swapped
//! for a model-backed provider or a test double without touching request
//! handling.

pub mod mock;
pub mod template;

use async_trait::async_trait;
use thiserror::Error;

pub use mock::{MockBehavior, MockStoryProvider};
pub use template::TemplateStoryProvider;

/// Error type for provider operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Turns a composed instruction into story text.
#[async_trait]
pub trait StoryProvider: Send + Sync {
    /// Generate a story for the instruction. An empty string means the
    /// provider produced nothing usable.
    async fn generate(&self, instruction: &str) -> Result<String, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
