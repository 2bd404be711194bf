//! Deck controller: owns the deck and navigation state and applies events.

use crate::deck::Deck;
use crate::fragment::{format_fragment, initial_index};
use crate::input::{key_event, tap_event, TouchTracker};
use crate::protocol::{DeckEvent, Input};
use crate::surface::ViewSurface;
use crate::view::render_slide;
use deckview_common::DEFAULT_SWIPE_THRESHOLD;

pub fn loading_message(label: &str) -> String {
    format!("Loading {label}…")
}

pub fn no_slides_message(label: &str) -> String {
    format!("No slides found in {label}")
}

pub fn load_failed_message(label: &str) -> String {
    format!("Failed to load {label}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckStatus {
    Loading,
    /// Well-formed content without slides.
    Empty,
    Failed(String),
    Ready,
}

/// Position within the deck. Only meaningful while the deck is non-empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationState {
    pub index: usize,
}

pub struct DeckController {
    label: String,
    deck: Deck,
    nav: NavigationState,
    status: DeckStatus,
    touch: TouchTracker,
}

impl DeckController {
    /// `label` names the content source in user-visible messages.
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_swipe_threshold(label, DEFAULT_SWIPE_THRESHOLD)
    }

    pub fn with_swipe_threshold(label: impl Into<String>, threshold: f64) -> Self {
        Self {
            label: label.into(),
            deck: Deck::default(),
            nav: NavigationState::default(),
            status: DeckStatus::Loading,
            touch: TouchTracker::new(threshold),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn status(&self) -> &DeckStatus {
        &self.status
    }

    /// Current index, or `None` until a non-empty deck is loaded.
    pub fn index(&self) -> Option<usize> {
        (self.status == DeckStatus::Ready).then_some(self.nav.index)
    }

    /// Put the loading placeholder on the surface.
    pub fn begin<S: ViewSurface + ?Sized>(&self, surface: &mut S) {
        surface.show_message(&loading_message(&self.label));
    }

    /// Map raw input to an event and apply it. Returns whether anything changed.
    pub fn dispatch<S: ViewSurface + ?Sized>(&mut self, input: Input, surface: &mut S) -> bool {
        let event = match input {
            Input::Key(key) => Some(key_event(key)),
            Input::Tap(target) => tap_event(&target),
            Input::Touch(touch) => self.touch.update(touch),
            Input::PreviousButton => Some(DeckEvent::Previous),
            Input::NextButton => Some(DeckEvent::Next),
        };
        match event {
            Some(event) => self.handle(event, surface),
            None => false,
        }
    }

    /// Apply one event. Returns whether the surface was updated.
    pub fn handle<S: ViewSurface + ?Sized>(&mut self, event: DeckEvent, surface: &mut S) -> bool {
        match event {
            DeckEvent::LoadSucceeded(deck) => self.on_loaded(deck, surface),
            DeckEvent::LoadFailed(reason) => self.on_failed(reason, surface),
            _ if self.status != DeckStatus::Ready => false,
            DeckEvent::Next => self.next(surface),
            DeckEvent::Previous => self.previous(surface),
            DeckEvent::JumpTo(index) => self.render(index, surface),
        }
    }

    pub fn next<S: ViewSurface + ?Sized>(&mut self, surface: &mut S) -> bool {
        match self.deck.last_index() {
            Some(last) if self.nav.index < last => self.show(self.nav.index + 1, surface),
            _ => false,
        }
    }

    pub fn previous<S: ViewSurface + ?Sized>(&mut self, surface: &mut S) -> bool {
        if self.nav.index == 0 || self.deck.is_empty() {
            return false;
        }
        self.show(self.nav.index - 1, surface)
    }

    /// Render the slide at `index`, clamped into the deck.
    pub fn render<S: ViewSurface + ?Sized>(&mut self, index: isize, surface: &mut S) -> bool {
        match self.deck.clamp(index) {
            Some(index) => self.show(index, surface),
            None => false,
        }
    }

    fn show<S: ViewSurface + ?Sized>(&mut self, index: usize, surface: &mut S) -> bool {
        let Some(slide) = self.deck.get(index) else {
            return false;
        };
        self.nav.index = index;
        surface.replace_content(render_slide(slide));
        surface.set_progress(&format!("{} / {}", index + 1, self.deck.len()));
        surface.set_speaker_notes(slide.speaker().unwrap_or_default());
        surface.set_fragment(&format_fragment(index));
        tracing::debug!(index, total = self.deck.len(), "rendered slide");
        true
    }

    fn on_loaded<S: ViewSurface + ?Sized>(&mut self, deck: Deck, surface: &mut S) -> bool {
        if self.status != DeckStatus::Loading {
            tracing::warn!("ignoring repeated load completion for {}", self.label);
            return false;
        }

        if deck.is_empty() {
            tracing::info!("{} contains no slides", self.label);
            self.status = DeckStatus::Empty;
            surface.show_message(&no_slides_message(&self.label));
            return true;
        }

        tracing::info!("loaded {} slides from {}", deck.len(), self.label);
        let start = initial_index(surface.fragment().as_deref(), deck.len());
        self.deck = deck;
        self.status = DeckStatus::Ready;
        self.show(start, surface)
    }

    fn on_failed<S: ViewSurface + ?Sized>(&mut self, reason: String, surface: &mut S) -> bool {
        if self.status != DeckStatus::Loading {
            tracing::warn!("ignoring repeated load completion for {}", self.label);
            return false;
        }

        tracing::error!("failed to load {}: {}", self.label, reason);
        self.status = DeckStatus::Failed(reason);
        surface.show_message(&load_failed_message(&self.label));
        true
    }
}
