//! Request handling for story generation.

use crate::error::StoryError;
use crate::models::StoryRequest;
use crate::services::providers::StoryProvider;
use metrics::{counter, histogram};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Validates story requests and delegates generation to the injected provider.
///
/// Holds no per-request state; one instance is shared by every request.
#[derive(Clone)]
pub struct StoryHandler {
    provider: Arc<dyn StoryProvider>,
    timeout: Duration,
}

impl StoryHandler {
    pub fn new(provider: Arc<dyn StoryProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub fn provider(&self) -> &Arc<dyn StoryProvider> {
        &self.provider
    }

    /// Handle one raw `/ask` body, returning the generated story.
    #[tracing::instrument(skip(self, body), fields(body_len = body.len()))]
    pub async fn handle(&self, body: &[u8]) -> Result<String, StoryError> {
        let result = self.generate(body).await;

        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.outcome(),
        };
        counter!("story_requests_total", "outcome" => outcome).increment(1);

        if let Err(e) = &result {
            if e.status_code().is_server_error() {
                tracing::error!(error = %e, outcome, "Story generation failed");
            } else {
                tracing::warn!(error = %e, outcome, "Rejected story request");
            }
        }

        result
    }

    async fn generate(&self, body: &[u8]) -> Result<String, StoryError> {
        let request = StoryRequest::from_json(body)?;
        let instruction = request.compose_instruction();

        tracing::info!(
            genre = %request.genre,
            length = %request.length,
            age_group = %request.age_group,
            emotion = %request.emotion,
            "Generating story"
        );

        let start = Instant::now();
        let generated =
            tokio::time::timeout(self.timeout, self.provider.generate(&instruction)).await;
        let provider_outcome = match &generated {
            Ok(Ok(_)) => "ok",
            Ok(Err(_)) => "error",
            Err(_) => "timeout",
        };
        histogram!("story_generation_duration_seconds", "outcome" => provider_outcome)
            .record(start.elapsed().as_secs_f64());

        let story = generated.map_err(|_| StoryError::Timeout(self.timeout))??;

        if story.is_empty() {
            return Err(StoryError::EmptyStory);
        }

        tracing::info!(story_len = story.len(), "Story generated");
        Ok(story)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::{MockBehavior, MockStoryProvider, ProviderError};
    use serde_json::json;

    fn handler_with(behavior: MockBehavior) -> (StoryHandler, Arc<MockStoryProvider>) {
        let provider = Arc::new(MockStoryProvider::new(behavior));
        let handler = StoryHandler::new(provider.clone(), Duration::from_secs(5));
        (handler, provider)
    }

    fn dragon_body() -> Vec<u8> {
        serde_json::to_vec(&json!({
            "prompt": "a dragon",
            "genre": "fantasy",
            "length": "short",
            "ageGroup": "children",
            "emotion": "wonder"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn passes_composed_instruction_to_provider() {
        let (handler, provider) = handler_with(MockBehavior::Echo);

        let story = handler.handle(&dragon_body()).await.unwrap();

        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].starts_with("Generate a fantasy story that is short long"));
        assert!(calls[0].ends_with("Prompt: \"a dragon\""));
        assert_eq!(story, format!("Mock story for: {}", calls[0]));
    }

    #[tokio::test]
    async fn invalid_request_never_reaches_provider() {
        let (handler, provider) = handler_with(MockBehavior::Echo);

        let err = handler.handle(br#"{"prompt":"a dragon"}"#).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Missing fields: genre, length, ageGroup, emotion"
        );
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn empty_story_is_a_failure() {
        let (handler, _) = handler_with(MockBehavior::Empty);

        let err = handler.handle(&dragon_body()).await.unwrap_err();

        assert!(matches!(err, StoryError::EmptyStory));
        assert_eq!(err.to_string(), "Failed to generate story");
    }

    #[tokio::test]
    async fn provider_failure_is_propagated() {
        let (handler, _) = handler_with(MockBehavior::Fail(ProviderError::RateLimited));

        let err = handler.handle(&dragon_body()).await.unwrap_err();

        assert!(matches!(err, StoryError::Provider(ProviderError::RateLimited)));
        assert_eq!(err.to_string(), "Rate limited");
    }

    #[tokio::test]
    async fn failed_generation_is_timed() {
        let metrics = service_core::observability::init_metrics();
        let (handler, _) = handler_with(MockBehavior::Fail(ProviderError::RateLimited));

        handler.handle(&dragon_body()).await.unwrap_err();

        let rendered = metrics.render();
        assert!(
            rendered.contains("story_generation_duration_seconds"),
            "missing histogram in:\n{rendered}"
        );
        assert!(rendered.contains(r#"outcome="error""#));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_provider_times_out() {
        let provider = Arc::new(MockStoryProvider::new(MockBehavior::Delay(
            Duration::from_secs(60),
        )));
        let handler = StoryHandler::new(provider, Duration::from_secs(2));

        let err = handler.handle(&dragon_body()).await.unwrap_err();

        assert!(matches!(err, StoryError::Timeout(d) if d == Duration::from_secs(2)));
    }
}
