//! Screen trait and transition type for the TUI state machine.

use crossterm::event::KeyEvent;
use gridtoe_engine::Command;
use ratatui::Frame;

use super::Theme;

/// The result of handling an input event on a screen.
///
/// Screens return this from [`Screen::handle_key`] to drive the
/// [`ScreenController`](super::ScreenController) state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenTransition {
    /// Stay on the current screen with no state change.
    Stay,
    /// Start (or restart) a match on a `size`×`size` board.
    Play {
        /// Chosen side length.
        size: usize,
    },
    /// Forward a command to the running match.
    Send(Command),
    /// Navigate back to the size picker.
    GoToSizeSelect,
    /// Switch between light and dark palettes.
    ToggleTheme,
    /// Exit the application cleanly.
    Quit,
}

/// Trait implemented by each screen in the state machine.
///
/// Each screen owns its own state, renders its UI, and handles key events.
/// The controller calls these methods in the event loop.
pub trait Screen {
    /// Renders the screen into the provided [`Frame`].
    fn render(&self, frame: &mut Frame, theme: Theme);

    /// Handles a key event and returns the resulting [`ScreenTransition`].
    fn handle_key(&mut self, key: KeyEvent) -> ScreenTransition;
}
