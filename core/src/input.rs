//! Mapping of keyboard, tap and touch input onto deck events.

use crate::protocol::DeckEvent;
use deckview_common::DEFAULT_SWIPE_THRESHOLD;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Right,
    Left,
    PageDown,
    PageUp,
    Home,
    End,
}

pub fn key_event(key: Key) -> DeckEvent {
    match key {
        Key::Right | Key::PageDown => DeckEvent::Next,
        Key::Left | Key::PageUp => DeckEvent::Previous,
        Key::Home => DeckEvent::JumpTo(0),
        // clamped to the last slide
        Key::End => DeckEvent::JumpTo(isize::MAX),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Content,
    Link,
    Button,
}

/// What a tap landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapTarget {
    pub element: ElementKind,
    /// Whether some ancestor of the element is a button.
    pub within_button: bool,
}

impl TapTarget {
    pub fn content() -> Self {
        Self {
            element: ElementKind::Content,
            within_button: false,
        }
    }

    pub fn link() -> Self {
        Self {
            element: ElementKind::Link,
            within_button: false,
        }
    }

    pub fn button() -> Self {
        Self {
            element: ElementKind::Button,
            within_button: false,
        }
    }

    /// Links and anything inside a button keep their own behaviour.
    pub fn passes_through(&self) -> bool {
        self.within_button || matches!(self.element, ElementKind::Link | ElementKind::Button)
    }
}

pub fn tap_event(target: &TapTarget) -> Option<DeckEvent> {
    (!target.passes_through()).then_some(DeckEvent::Next)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchInput {
    Start { x: f64, fingers: usize },
    Move { x: f64 },
    End,
}

/// Single-finger horizontal swipe detection.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchTracker {
    threshold: f64,
    start_x: f64,
    touching: bool,
}

impl Default for TouchTracker {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_THRESHOLD)
    }
}

impl TouchTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            start_x: 0.0,
            touching: false,
        }
    }

    pub fn is_touching(&self) -> bool {
        self.touching
    }

    /// Feed one touch input. A swipe fires at most once per gesture.
    pub fn update(&mut self, input: TouchInput) -> Option<DeckEvent> {
        match input {
            TouchInput::Start { x, fingers } => {
                if fingers == 1 {
                    self.touching = true;
                    self.start_x = x;
                }
                None
            }
            TouchInput::Move { x } => {
                if !self.touching {
                    return None;
                }
                let dx = x - self.start_x;
                if dx.abs() <= self.threshold {
                    return None;
                }
                self.touching = false;
                Some(if dx < 0.0 {
                    DeckEvent::Next
                } else {
                    DeckEvent::Previous
                })
            }
            TouchInput::End => {
                self.touching = false;
                None
            }
        }
    }
}
