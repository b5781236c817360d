//! In-game screen: board, scoreboard, countdown, and move input.

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use gridtoe_engine::{BoardError, CellState, Command, GameState, SessionEvent, SessionSnapshot};
use ratatui::Frame;
use tracing::{debug, info, instrument};

use crate::tui::Theme;
use crate::tui::input::{digit_cell, move_cursor};
use crate::tui::screen::{Screen, ScreenTransition};
use crate::tui::ui;

/// State for the game screen.
///
/// The screen only renders what the runner last published; it never
/// mutates the board itself.
#[derive(Debug, Getters)]
pub struct GameScreen {
    /// Board size this screen is waiting for or showing.
    size: usize,
    /// Latest snapshot of the requested size.
    snapshot: Option<SessionSnapshot>,
    /// Highlighted cell.
    cursor: usize,
    /// Result announced by the last `RoundEnded` event; drives the banner.
    last_result: Option<GameState>,
    /// Transient message, e.g. a rejected command.
    notice: Option<String>,
}

impl GameScreen {
    /// Creates a screen for a `size`×`size` match.
    #[instrument]
    pub fn new(size: usize) -> Self {
        debug!(size, "Initializing GameScreen");
        Self {
            size,
            snapshot: None,
            cursor: 0,
            last_result: None,
            notice: None,
        }
    }

    /// Folds a runner event into the screen state.
    #[instrument(skip(self, event))]
    pub fn apply_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::StateChanged(snapshot) => {
                // Snapshots from before a size change are stale.
                if *snapshot.size() != self.size {
                    debug!(got = snapshot.size(), want = self.size, "Skipping stale snapshot");
                    return;
                }
                if !snapshot.state().is_terminal() {
                    self.last_result = None;
                }
                self.snapshot = Some(snapshot);
            }
            SessionEvent::RoundEnded(state) => {
                info!(state = ?state, "Round ended");
                self.last_result = Some(state);
            }
            SessionEvent::CommandRejected(error) => {
                self.notice = Some(rejection_notice(error));
            }
        }
    }

    fn is_playable(&self, index: usize) -> bool {
        self.snapshot.as_ref().is_some_and(|snapshot| {
            !snapshot.state().is_terminal()
                && snapshot.cells().get(index).copied() == Some(CellState::Empty)
        })
    }

    fn place(&mut self, index: usize) -> ScreenTransition {
        if self.is_playable(index) {
            self.notice = None;
            ScreenTransition::Send(Command::Move(index))
        } else {
            debug!(index, "Ignoring move on occupied cell or finished round");
            ScreenTransition::Stay
        }
    }
}

fn rejection_notice(error: BoardError) -> String {
    format!("rejected: {error}")
}

impl Screen for GameScreen {
    #[instrument(skip(self, frame))]
    fn render(&self, frame: &mut Frame, theme: Theme) {
        let palette = theme.palette();
        ui::draw_game(
            frame,
            self.snapshot.as_ref(),
            self.last_result,
            self.cursor,
            self.notice.as_deref(),
            &palette,
        );
    }

    #[instrument(skip(self, key))]
    fn handle_key(&mut self, key: KeyEvent) -> ScreenTransition {
        match key.code {
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, self.size, key.code);
                ScreenTransition::Stay
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.place(self.cursor),
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.notice = None;
                ScreenTransition::Send(Command::NewRound)
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.notice = None;
                ScreenTransition::Send(Command::NewMatch)
            }
            KeyCode::Char('t') | KeyCode::Char('T') => ScreenTransition::ToggleTheme,
            KeyCode::Char('b') | KeyCode::Char('B') | KeyCode::Esc => {
                ScreenTransition::GoToSizeSelect
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            code => match digit_cell(code, self.size) {
                Some(index) => {
                    self.cursor = index;
                    self.place(index)
                }
                None => ScreenTransition::Stay,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use gridtoe_engine::MatchSession;

    fn press(screen: &mut GameScreen, code: KeyCode) -> ScreenTransition {
        screen.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn screen_with(session: &MatchSession) -> GameScreen {
        let mut screen = GameScreen::new(session.size());
        screen.apply_event(SessionEvent::StateChanged(session.snapshot()));
        screen
    }

    #[test]
    fn test_enter_sends_move_at_cursor() {
        let session = MatchSession::new(3).unwrap();
        let mut screen = screen_with(&session);
        press(&mut screen, KeyCode::Right);
        press(&mut screen, KeyCode::Down);
        assert_eq!(*screen.cursor(), 4);
        assert_eq!(
            press(&mut screen, KeyCode::Enter),
            ScreenTransition::Send(Command::Move(4))
        );
    }

    #[test]
    fn test_occupied_cell_not_sent() {
        let mut session = MatchSession::new(3).unwrap();
        session.apply_move(0).unwrap();
        let mut screen = screen_with(&session);
        assert_eq!(press(&mut screen, KeyCode::Enter), ScreenTransition::Stay);
        assert_eq!(
            press(&mut screen, KeyCode::Char('2')),
            ScreenTransition::Send(Command::Move(1))
        );
    }

    #[test]
    fn test_no_moves_after_round_ends() {
        let mut session = MatchSession::new(3).unwrap();
        session.apply_timeout();
        let mut screen = screen_with(&session);
        assert_eq!(press(&mut screen, KeyCode::Char('5')), ScreenTransition::Stay);
        assert_eq!(
            press(&mut screen, KeyCode::Char('r')),
            ScreenTransition::Send(Command::NewRound)
        );
    }

    #[test]
    fn test_digits_ignored_on_large_boards() {
        let session = MatchSession::new(4).unwrap();
        let mut screen = screen_with(&session);
        assert_eq!(press(&mut screen, KeyCode::Char('1')), ScreenTransition::Stay);
    }

    #[test]
    fn test_navigation_keys() {
        let mut screen = GameScreen::new(3);
        let back = press(&mut screen, KeyCode::Char('b'));
        assert_eq!(back, ScreenTransition::GoToSizeSelect);
        let theme = press(&mut screen, KeyCode::Char('t'));
        assert_eq!(theme, ScreenTransition::ToggleTheme);
        let new_match = press(&mut screen, KeyCode::Char('n'));
        assert_eq!(new_match, ScreenTransition::Send(Command::NewMatch));
        assert_eq!(press(&mut screen, KeyCode::Char('q')), ScreenTransition::Quit);
    }

    #[test]
    fn test_stale_size_snapshot_skipped() {
        let old = MatchSession::new(3).unwrap();
        let mut screen = GameScreen::new(4);
        screen.apply_event(SessionEvent::StateChanged(old.snapshot()));
        assert!(screen.snapshot().is_none());
    }

    #[test]
    fn test_round_end_and_rejection_recorded() {
        let session = MatchSession::new(3).unwrap();
        let mut screen = screen_with(&session);
        screen.apply_event(SessionEvent::RoundEnded(GameState::Draw));
        assert_eq!(*screen.last_result(), Some(GameState::Draw));
        let error = BoardError::InvalidSize { size: 0 };
        screen.apply_event(SessionEvent::CommandRejected(error));
        assert!(screen.notice().as_deref().is_some_and(|n| n.starts_with("rejected")));
    }
}
