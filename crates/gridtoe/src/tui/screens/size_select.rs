//! Size picker screen: choose the board, toggle the theme, or quit.

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::Modifier,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tracing::{debug, info, instrument};

use crate::tui::Theme;
use crate::tui::screen::{Screen, ScreenTransition};

/// Entries in the picker menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    /// Start a match on a board of this side length.
    Size(usize),
    /// Switch palettes.
    ToggleTheme,
    /// Leave the application.
    Quit,
}

impl MenuOption {
    #[instrument]
    fn label(self) -> String {
        match self {
            Self::Size(size) => format!("{size}x{size}"),
            Self::ToggleTheme => "Toggle theme".to_string(),
            Self::Quit => "Quit".to_string(),
        }
    }
}

/// State for the size picker.
#[derive(Debug, Getters)]
pub struct SizeSelectScreen {
    options: Vec<MenuOption>,
    list_state: ListState,
}

impl SizeSelectScreen {
    /// Creates a picker offering the given board sizes.
    #[instrument]
    pub fn new(sizes: &[usize]) -> Self {
        debug!(?sizes, "Initializing SizeSelectScreen");
        let options = sizes
            .iter()
            .copied()
            .map(MenuOption::Size)
            .chain([MenuOption::ToggleTheme, MenuOption::Quit])
            .collect();
        let mut state = ListState::default();
        state.select(Some(0));
        Self {
            options,
            list_state: state,
        }
    }

    /// Moves selection up, wrapping to the bottom.
    #[instrument(skip(self))]
    fn select_previous(&mut self) {
        let count = self.options.len();
        let i = match self.list_state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => count - 1,
        };
        self.list_state.select(Some(i));
    }

    /// Moves selection down, wrapping to the top.
    #[instrument(skip(self))]
    fn select_next(&mut self) {
        let count = self.options.len();
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % count,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Returns the currently selected menu option.
    fn selected_option(&self) -> MenuOption {
        let idx = self.list_state.selected().unwrap_or(0);
        self.options[idx.min(self.options.len() - 1)]
    }
}

impl Screen for SizeSelectScreen {
    #[instrument(skip(self, frame))]
    fn render(&self, frame: &mut Frame, theme: Theme) {
        let palette = theme.palette();
        let area = frame.area();
        frame.render_widget(Block::default().style(palette.base()), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new("Choose a board size")
            .style(palette.title())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let items: Vec<ListItem> = self
            .options
            .iter()
            .map(|opt| ListItem::new(opt.label()))
            .collect();

        let menu = List::new(items)
            .style(palette.base())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Board ({theme} theme)")),
            )
            .highlight_style(
                palette
                    .base()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut list_state = self.list_state;
        frame.render_stateful_widget(menu, chunks[1], &mut list_state);

        let help = Paragraph::new("↑↓: Navigate | Enter: Select | t: Theme | q: Quit")
            .style(palette.hint())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);
    }

    #[instrument(skip(self, key))]
    fn handle_key(&mut self, key: KeyEvent) -> ScreenTransition {
        match key.code {
            KeyCode::Up => {
                self.select_previous();
                ScreenTransition::Stay
            }
            KeyCode::Down => {
                self.select_next();
                ScreenTransition::Stay
            }
            KeyCode::Enter => {
                let option = self.selected_option();
                info!(option = ?option, "Picker option selected");
                match option {
                    MenuOption::Size(size) => ScreenTransition::Play { size },
                    MenuOption::ToggleTheme => ScreenTransition::ToggleTheme,
                    MenuOption::Quit => ScreenTransition::Quit,
                }
            }
            KeyCode::Char('t') | KeyCode::Char('T') => ScreenTransition::ToggleTheme,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
