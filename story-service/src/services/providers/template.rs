use super::{ProviderError, StoryProvider};
use async_trait::async_trait;

/// Stand-in provider that echoes the instruction into a fixed sentence.
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateStoryProvider;

impl TemplateStoryProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StoryProvider for TemplateStoryProvider {
    async fn generate(&self, instruction: &str) -> Result<String, ProviderError> {
        Ok(format!("Generated story based on prompt: {}", instruction))
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn embeds_instruction() {
        let story = TemplateStoryProvider::new()
            .generate("Generate a fantasy story")
            .await
            .unwrap();

        assert_eq!(
            story,
            "Generated story based on prompt: Generate a fantasy story"
        );
    }
}
