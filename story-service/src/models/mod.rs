//! Domain models for the story service.

pub mod envelope;
pub mod story;

pub use envelope::{EnvelopeStatus, ResponseEnvelope};
pub use story::{StoryRequest, REQUIRED_FIELDS};
