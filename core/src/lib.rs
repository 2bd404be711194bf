//! Deck viewer core: deck building, navigation and rendering, with no
//! dependency on a terminal or any other live surface.

pub mod controller;
pub mod deck;
pub mod error;
pub mod fragment;
pub mod input;
pub mod protocol;
pub mod source;
pub mod surface;
pub mod view;

pub use controller::{DeckController, DeckStatus, NavigationState};
pub use deck::{Deck, CONDENSED_MARKER, MAX_SLIDES};
pub use error::LoadError;
pub use protocol::{DeckEvent, Input};
pub use surface::{MemorySurface, ViewSurface};
pub use view::{render_slide, NodeKind, ViewNode};
