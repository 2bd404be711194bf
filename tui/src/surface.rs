use deckview_core::{ViewNode, ViewSurface};
use std::path::PathBuf;

/// Surface state drawn by the terminal app. The fragment optionally
/// persists to a location file so a later run resumes on the same slide.
#[derive(Debug, Clone)]
pub struct TerminalSurface {
    content: ViewNode,
    progress: String,
    speaker_notes: String,
    fragment: Option<String>,
    location_file: Option<PathBuf>,
}

impl TerminalSurface {
    /// An explicit `fragment` wins over whatever the location file holds.
    pub fn new(fragment: Option<String>, location_file: Option<PathBuf>) -> Self {
        let fragment = fragment.or_else(|| {
            let path = location_file.as_ref()?;
            match std::fs::read_to_string(path) {
                Ok(saved) => Some(saved.trim().to_string()).filter(|s| !s.is_empty()),
                Err(e) => {
                    tracing::debug!("no saved location at {}: {}", path.display(), e);
                    None
                }
            }
        });

        Self {
            content: ViewNode::message(""),
            progress: String::new(),
            speaker_notes: String::new(),
            fragment: fragment.map(|f| f.trim_start_matches('#').to_string()),
            location_file,
        }
    }

    pub fn content(&self) -> &ViewNode {
        &self.content
    }

    pub fn progress(&self) -> &str {
        &self.progress
    }

    pub fn speaker_notes(&self) -> &str {
        &self.speaker_notes
    }

    /// The fragment as displayed, with its leading `#`.
    pub fn location(&self) -> Option<String> {
        self.fragment.as_ref().map(|f| format!("#{f}"))
    }
}

impl ViewSurface for TerminalSurface {
    fn replace_content(&mut self, node: ViewNode) {
        self.content = node;
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
        let fragment = fragment.trim_start_matches('#').to_string();
        if let Some(path) = &self.location_file {
            if let Err(e) = std::fs::write(path, format!("#{fragment}\n")) {
                tracing::warn!("failed to save location to {}: {}", path.display(), e);
            }
        }
        self.fragment = Some(fragment);
    }
}
