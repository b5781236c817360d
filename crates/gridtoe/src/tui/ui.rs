//! Stateless rendering for the game screen.

use gridtoe_engine::{CellState, GameState, Player, SessionSnapshot};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::Palette;

/// Remaining units at or below which the timer is highlighted.
pub const LOW_TIME_UNITS: u32 = 3;

/// Banner shown once a round has ended.
pub fn banner_text(state: GameState) -> Option<&'static str> {
    match state {
        GameState::InProgress => None,
        GameState::CrossWin => Some("Winner: X"),
        GameState::NoughtWin => Some("Winner: O"),
        GameState::Draw => Some("Draw"),
    }
}

/// Scoreboard line, e.g. `X: 2  O: 1`.
pub fn score_text(snapshot: &SessionSnapshot) -> String {
    format!(
        "X: {}  O: {}",
        snapshot.wins(Player::Cross),
        snapshot.wins(Player::Nought)
    )
}

/// Turn indicator plus countdown, or the banner once a round result arrived.
pub fn status_text(snapshot: &SessionSnapshot, result: Option<GameState>) -> String {
    match result.and_then(banner_text) {
        Some(banner) => banner.to_string(),
        None => format!(
            "Turn: {}  Time: {}s",
            snapshot.current_player(),
            snapshot.remaining()
        ),
    }
}

/// Renders the full game screen.
pub fn draw_game(
    frame: &mut Frame,
    snapshot: Option<&SessionSnapshot>,
    result: Option<GameState>,
    cursor: usize,
    notice: Option<&str>,
    palette: &Palette,
) {
    let area = frame.area();
    frame.render_widget(Block::default().style(palette.base()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Scoreboard
            Constraint::Min(3),    // Board
            Constraint::Length(3), // Status
            Constraint::Length(3), // Help
        ])
        .split(area);

    let Some(snapshot) = snapshot else {
        let waiting = Paragraph::new("Starting match...")
            .style(palette.hint())
            .alignment(Alignment::Center);
        frame.render_widget(waiting, chunks[1]);
        return;
    };

    let title = format!("Gridtoe {0}x{0}", snapshot.size());
    let score = Paragraph::new(score_text(snapshot))
        .style(palette.title())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(score, chunks[0]);

    draw_board(frame, chunks[1], snapshot, cursor, palette);

    let round_over = result.is_some();
    let low_time = !round_over && *snapshot.remaining() <= LOW_TIME_UNITS;
    let status_style = if low_time {
        palette.base().fg(palette.warning).add_modifier(Modifier::BOLD)
    } else if round_over {
        palette.title()
    } else {
        palette.base()
    };
    let status_line = match notice {
        Some(notice) => format!("{}  ({})", status_text(snapshot, result), notice),
        None => status_text(snapshot, result),
    };
    let status = Paragraph::new(status_line)
        .style(status_style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);

    let help = Paragraph::new(
        "Arrows: Move | Enter: Place | r: New round | n: New match | t: Theme | b: Back | q: Quit",
    )
    .style(palette.hint())
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[3]);
}

fn draw_board(
    frame: &mut Frame,
    area: Rect,
    snapshot: &SessionSnapshot,
    cursor: usize,
    palette: &Palette,
) {
    let lines = board_lines(snapshot, cursor, palette);
    let height = lines.len() as u16;
    let width = (*snapshot.size() as u16).saturating_mul(4).saturating_sub(1);
    let board = Paragraph::new(lines).alignment(Alignment::Left);
    frame.render_widget(board, center_rect(area, width, height));
}

/// Builds the grid as styled lines, highlighting the cursor cell.
pub fn board_lines(
    snapshot: &SessionSnapshot,
    cursor: usize,
    palette: &Palette,
) -> Vec<Line<'static>> {
    let size = *snapshot.size();
    let grid = palette.base().fg(palette.muted);
    let mut lines = Vec::with_capacity(size * 2);

    for row in 0..size {
        if row > 0 {
            let separator = vec!["───"; size].join("┼");
            lines.push(Line::from(Span::styled(separator, grid)));
        }
        let mut spans = Vec::with_capacity(size * 2);
        for col in 0..size {
            if col > 0 {
                spans.push(Span::styled("│", grid));
            }
            let index = row * size + col;
            let cell = snapshot.cells().get(index).copied().unwrap_or_default();
            spans.push(Span::styled(
                format!(" {} ", cell.symbol()),
                cell_style(cell, index == cursor, palette),
            ));
        }
        lines.push(Line::from(spans));
    }
    lines
}

fn cell_style(cell: CellState, selected: bool, palette: &Palette) -> Style {
    let bold = palette.base().add_modifier(Modifier::BOLD);
    let style = match cell {
        CellState::Empty => palette.base(),
        CellState::Cross => bold.fg(palette.cross),
        CellState::Nought => bold.fg(palette.nought),
    };
    if selected {
        style.bg(palette.cursor)
    } else {
        style
    }
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(area.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vert[1])[1]
}
