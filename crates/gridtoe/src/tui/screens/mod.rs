//! Concrete screens for the TUI state machine.

mod game;
mod size_select;

pub use game::GameScreen;
pub use size_select::{MenuOption, SizeSelectScreen};
