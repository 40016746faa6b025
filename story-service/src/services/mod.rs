pub mod providers;
pub mod story;

pub use providers::{ProviderError, StoryProvider};
pub use story::StoryHandler;
