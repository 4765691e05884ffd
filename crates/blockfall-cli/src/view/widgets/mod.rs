//! Terminal widgets for a [`blockfall_engine::GameSession`].
//!
//! Every board square is drawn [`BlockDisplay::width`] columns wide so that
//! pieces look square in a typical terminal font.

use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    block_display::*, board_display::*, key_binding_display::*, preview_display::*,
    session_display::*, session_stats_display::*,
};

mod block_display;
mod board_display;
mod key_binding_display;
mod preview_display;
mod session_display;
mod session_stats_display;

pub mod palette {
    use blockfall_engine::{GameState, PieceKind};
    use ratatui::style::Color;

    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const RED: Color = Color::Rgb(255, 0, 0);

    /// Guideline colors.
    pub const fn piece(kind: PieceKind) -> Color {
        match kind {
            PieceKind::I => Color::Rgb(0, 255, 255),
            PieceKind::O => YELLOW,
            PieceKind::T => Color::Rgb(255, 0, 255),
            PieceKind::S => Color::Rgb(0, 255, 0),
            PieceKind::Z => RED,
            PieceKind::J => Color::Rgb(0, 0, 255),
            PieceKind::L => Color::Rgb(255, 127, 0),
        }
    }

    /// Border color of every panel.
    pub const fn frame(state: GameState) -> Color {
        match state {
            GameState::Ready => GRAY,
            GameState::Playing => WHITE,
            GameState::Paused => YELLOW,
            GameState::GameOver => RED,
        }
    }
}

pub mod style {
    use blockfall_engine::PieceKind;
    use ratatui::style::{Color, Style};

    use super::palette;

    const fn filled(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const TEXT: Style = Style::new().fg(palette::WHITE).bg(palette::BLACK);
    pub const EMPTY: Style = filled(palette::BLACK);
    pub const DOT: Style = Style::new().fg(palette::GRAY).bg(palette::BLACK);
    pub const SOLID: Style = filled(palette::GRAY);
    pub const GHOST: Style = TEXT;

    pub const fn piece(kind: PieceKind) -> Style {
        filled(palette::piece(kind))
    }
}

/// Columns and rows taken by the borders and padding of `block`.
fn chrome_size(block: Option<&BlockWidget>) -> (u16, u16) {
    let Some(block) = block else {
        return (0, 0);
    };
    let outer = Rect::new(0, 0, u16::MAX / 2, u16::MAX / 2);
    let inner = block.inner(outer);
    (outer.width - inner.width, outer.height - inner.height)
}
