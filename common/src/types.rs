use serde::{Deserialize, Deserializer, Serialize};

/// One slide record as it appears in the content document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub bullets: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Speaker notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
}

impl Slide {
    pub fn title(&self) -> Option<&str> {
        non_empty(&self.title)
    }

    pub fn subtitle(&self) -> Option<&str> {
        non_empty(&self.subtitle)
    }

    pub fn example(&self) -> Option<&str> {
        non_empty(&self.example)
    }

    pub fn speaker(&self) -> Option<&str> {
        non_empty(&self.speaker)
    }
}

/// Top-level shape returned by a content source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDocument {
    #[serde(default)]
    pub slides: Option<Vec<Slide>>,
}

impl ContentDocument {
    pub fn new(slides: Vec<Slide>) -> Self {
        Self {
            slides: Some(slides),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
