//! Platform layer
//!
//! Everything that touches the real terminal lives here:
//! - `input`: crossterm events mapped to game intents
//! - `terminal`: raw mode / alternate screen setup and teardown

pub mod input;
pub mod terminal;

pub use input::{InputEvent, map_event};
pub use terminal::TerminalGuard;
