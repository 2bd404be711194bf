//! Building the visible deck from a content document.

use deckview_common::{ContentDocument, Slide};
use serde::Serialize;

/// Hard cap on visible slides.
pub const MAX_SLIDES: usize = 15;

/// Marker bullet that precedes the summaries of condensed slides.
pub const CONDENSED_MARKER: &str = "(CONDENSED)";

const SUMMARY_BULLETS: usize = 3;

/// The capped, possibly condensed sequence of slides shown to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Deck {
    slides: Vec<Slide>,
}

impl Deck {
    /// Build from a source response. An absent response or missing `slides`
    /// yields an empty deck.
    pub fn from_document(document: Option<ContentDocument>) -> Self {
        match document.and_then(|doc| doc.slides) {
            Some(slides) => Self::from_slides(slides),
            None => Self::default(),
        }
    }

    /// Keep the first [`MAX_SLIDES`] slides. When there are more, the last kept
    /// slide gets the marker plus one summary per slide from index
    /// `MAX_SLIDES - 1` onward.
    pub fn from_slides(mut slides: Vec<Slide>) -> Self {
        if slides.len() <= MAX_SLIDES {
            return Self { slides };
        }

        let extras: Vec<String> = slides[MAX_SLIDES - 1..].iter().map(summarize).collect();
        tracing::debug!(
            total = slides.len(),
            condensed = extras.len(),
            "condensing overflow slides"
        );

        slides.truncate(MAX_SLIDES);
        if let Some(last) = slides.last_mut() {
            last.bullets.push(CONDENSED_MARKER.to_string());
            last.bullets.extend(extras);
        }
        Self { slides }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn last_index(&self) -> Option<usize> {
        self.slides.len().checked_sub(1)
    }

    /// Clamp any signed index into `[0, len - 1]`; `None` on an empty deck.
    pub fn clamp(&self, index: isize) -> Option<usize> {
        let last = self.last_index()?;
        Some(usize::try_from(index).map_or(0, |i| i.min(last)))
    }
}

/// `"<title> — <b1 / b2 / b3>"`, or just the joined bullets when untitled.
pub fn summarize(slide: &Slide) -> String {
    let joined = slide
        .bullets
        .iter()
        .take(SUMMARY_BULLETS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" / ");

    match slide.title() {
        Some(title) => format!("{title} — {joined}"),
        None => joined,
    }
}
