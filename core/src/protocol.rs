use crate::deck::Deck;
use crate::input::{Key, TapTarget, TouchInput};

/// State transitions of the deck controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckEvent {
    Next,
    Previous,
    /// Render the given index after clamping it into the deck.
    JumpTo(isize),
    LoadSucceeded(Deck),
    LoadFailed(String),
}

/// Raw user input before it is mapped to a [`DeckEvent`].
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Key(Key),
    Tap(TapTarget),
    Touch(TouchInput),
    PreviousButton,
    NextButton,
}
