//! Light and dark colour palettes.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

/// Colour theme, toggled at runtime.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    /// Dark text on a light background.
    #[default]
    Light,
    /// Light text on a dark background.
    Dark,
}

impl Theme {
    /// Switches to the other theme.
    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Returns the palette for this theme.
    pub fn palette(self) -> Palette {
        match self {
            Self::Light => Palette {
                background: Color::White,
                foreground: Color::Black,
                accent: Color::Blue,
                muted: Color::Gray,
                cross: Color::Blue,
                nought: Color::Red,
                warning: Color::Red,
                cursor: Color::Yellow,
            },
            Self::Dark => Palette {
                background: Color::Black,
                foreground: Color::White,
                accent: Color::Cyan,
                muted: Color::DarkGray,
                cross: Color::LightBlue,
                nought: Color::LightRed,
                warning: Color::LightRed,
                cursor: Color::DarkGray,
            },
        }
    }
}

/// Colours used by every screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Screen background.
    pub background: Color,
    /// Body text.
    pub foreground: Color,
    /// Titles and highlights.
    pub accent: Color,
    /// Help text and grid lines.
    pub muted: Color,
    /// Cross marks.
    pub cross: Color,
    /// Nought marks.
    pub nought: Color,
    /// Low timer warning.
    pub warning: Color,
    /// Cursor cell background.
    pub cursor: Color,
}

impl Palette {
    /// Base style for text on the screen background.
    pub fn base(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    /// Bold accent style for titles.
    pub fn title(&self) -> Style {
        self.base().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// Dimmed style for hints.
    pub fn hint(&self) -> Style {
        self.base().fg(self.muted)
    }
}
