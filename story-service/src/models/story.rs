//! Story requests and the instruction composed from them.

use crate::error::StoryError;
use serde_json::{Map, Value};

/// Keys every story request must carry, in the order they are reported.
pub const REQUIRED_FIELDS: [&str; 5] = ["prompt", "genre", "length", "ageGroup", "emotion"];

/// A validated story request. Every field holds the text that gets
/// interpolated into the instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryRequest {
    pub prompt: String,
    pub genre: String,
    pub length: String,
    pub age_group: String,
    pub emotion: String,
}

impl StoryRequest {
    /// Parse and validate a raw request body.
    ///
    /// An absent, unparseable, non-object or empty-object body is
    /// [`StoryError::NoJsonData`]. Required keys that are absent or hold a
    /// falsy value are reported together as [`StoryError::MissingFields`].
    pub fn from_json(body: &[u8]) -> Result<Self, StoryError> {
        let object = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) if !map.is_empty() => map,
            _ => return Err(StoryError::NoJsonData),
        };

        Self::from_object(&object)
    }

    pub fn from_object(object: &Map<String, Value>) -> Result<Self, StoryError> {
        let missing: Vec<&'static str> = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|key| object.get(*key).map_or(true, is_falsy))
            .collect();

        if !missing.is_empty() {
            return Err(StoryError::MissingFields(missing));
        }

        let text = |key: &str| object.get(key).map(field_text).unwrap_or_default();

        Ok(StoryRequest {
            prompt: text("prompt"),
            genre: text("genre"),
            length: text("length"),
            age_group: text("ageGroup"),
            emotion: text("emotion"),
        })
    }

    /// The instruction handed to the generation provider.
    pub fn compose_instruction(&self) -> String {
        format!(
            "Generate a {} story that is {} long, suitable for a {} audience, and evokes a sense of {}. \
             The story should be engaging and memorable. Prompt: \"{}\"",
            self.genre, self.length, self.age_group, self.emotion, self.prompt
        )
    }
}

/// `null`, `false`, zero, `""`, `[]` and `{}` count as not provided.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Non-string values render as compact JSON (`true`, `["a"]`).
fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
