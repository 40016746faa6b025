//! Mock provider implementation for testing.

use super::{ProviderError, StoryProvider};
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// What a [`MockStoryProvider`] does on every call.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Reply with `Mock story for: {instruction}`.
    Echo,
    /// Reply with an empty story.
    Empty,
    /// Fail with the given error.
    Fail(ProviderError),
    /// Sleep, then echo.
    Delay(Duration),
}

/// Scriptable provider that records every instruction it receives.
pub struct MockStoryProvider {
    behavior: MockBehavior,
    calls: Mutex<Vec<String>>,
}

impl MockStoryProvider {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Instructions received so far, oldest first.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn echo(instruction: &str) -> String {
        format!("Mock story for: {}", instruction)
    }
}

#[async_trait]
impl StoryProvider for MockStoryProvider {
    async fn generate(&self, instruction: &str) -> Result<String, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(instruction.to_string());
        }

        match &self.behavior {
            MockBehavior::Echo => Ok(Self::echo(instruction)),
            MockBehavior::Empty => Ok(String::new()),
            MockBehavior::Fail(err) => Err(err.clone()),
            MockBehavior::Delay(delay) => {
                tokio::time::sleep(*delay).await;
                Ok(Self::echo(instruction))
            }
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        match &self.behavior {
            MockBehavior::Fail(err) => Err(err.clone()),
            _ => Ok(()),
        }
    }
}
