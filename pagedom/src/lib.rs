pub mod document;
pub mod element;
pub mod event;
pub mod focus;
pub mod timer;
pub mod types;

pub use document::{Document, Listener};
pub use element::Element;
pub use event::{Event, EventKind};
pub use focus::FocusState;
pub use timer::{TimerCallback, TimerId, TimerQueue};
pub use types::*;
