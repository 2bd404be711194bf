use crate::view::ViewNode;

/// Output side of the viewer: a content area the controller fully owns, a
/// progress line, a speaker-notes area and the location fragment.
pub trait ViewSurface {
    fn replace_content(&mut self, node: ViewNode);

    fn show_message(&mut self, text: &str) {
        self.replace_content(ViewNode::message(text));
    }

    fn set_progress(&mut self, text: &str);

    fn set_speaker_notes(&mut self, notes: &str);

    /// Current fragment, without the leading `#`.
    fn fragment(&self) -> Option<String>;

    fn set_fragment(&mut self, fragment: &str);
}

/// Surface that only records what it was given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySurface {
    pub content: Option<ViewNode>,
    pub progress: String,
    pub speaker_notes: String,
    pub fragment: Option<String>,
    /// Number of `replace_content` calls.
    pub renders: usize,
}

impl MemorySurface {
    pub fn with_fragment(fragment: impl Into<String>) -> Self {
        Self {
            fragment: Some(fragment.into()),
            ..Self::default()
        }
    }

    pub fn content_text(&self) -> String {
        self.content
            .as_ref()
            .map(ViewNode::text_content)
            .unwrap_or_default()
    }
}

impl ViewSurface for MemorySurface {
    fn replace_content(&mut self, node: ViewNode) {
        self.content = Some(node);
        self.renders += 1;
    }

    fn set_progress(&mut self, text: &str) {
        self.progress = text.to_string();
    }

    fn set_speaker_notes(&mut self, notes: &str) {
        self.speaker_notes = notes.to_string();
    }

    fn fragment(&self) -> Option<String> {
        self.fragment.clone()
    }

    fn set_fragment(&mut self, fragment: &str) {
        self.fragment = Some(fragment.trim_start_matches('#').to_string());
    }
}
