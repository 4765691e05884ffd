use blockfall_engine::{GameSession, GameState, PieceKind};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::view::widgets::{BoardDisplay, PreviewDisplay, SessionStatsDisplay, palette, style};

/// Whole game screen: stats on the left, the board, and the preview queue.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let style = style::TEXT;
        let block_padding = Padding::symmetric(self.horizontal_padding, self.vertical_padding);
        let state = self.session.state();
        let border_style = palette::frame(state);
        let preview: Vec<PieceKind> = self.session.preview().collect();

        let game_board = {
            let mut widget = BoardDisplay::new(self.session.board())
                .block(Block::bordered().border_style(border_style).style(style));
            if let Some(ghost) = self.session.ghost_piece() {
                widget = widget.ghost(ghost.cells());
            }
            if let Some(active) = self.session.active_piece() {
                widget = widget.active_piece(active.kind(), active.cells());
            }
            widget
        };
        let preview_panel = PreviewDisplay::new(&preview).block(
            Block::bordered()
                .title(Line::from("NEXT").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style),
        );
        let session_stats = SessionStatsDisplay::new(self.session).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style),
        );

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(session_stats.width()),
            Constraint::Length(game_board.width()),
            Constraint::Length(preview_panel.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(session_stats.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [preview_area] =
            Layout::vertical([Constraint::Length(preview_panel.height())]).areas(right_column);

        let game_board_width = game_board.width();
        session_stats.render(stats_area, buf);
        game_board.render(board_area, buf);
        preview_panel.render(preview_area, buf);

        let popup = match state {
            GameState::Playing => None,
            GameState::Ready => Some((
                "PRESS ENTER",
                Style::new().fg(palette::BLACK).bg(palette::WHITE),
            )),
            GameState::Paused => {
                Some(("PAUSED", Style::new().fg(palette::BLACK).bg(palette::YELLOW)))
            }
            GameState::GameOver => {
                Some(("GAME OVER!!", Style::new().fg(palette::WHITE).bg(palette::RED)))
            }
        };

        if let Some((text, style)) = popup {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area =
                board_area.centered(Constraint::Length(game_board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{GameConfig, GameEvent, PieceSeed};

    use super::*;

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    fn render(session: &GameSession) -> Buffer {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        SessionDisplay::new(session).render(area, &mut buf);
        buf
    }

    #[test]
    fn test_ready_popup() {
        let session = GameSession::new(GameConfig::default(), PieceSeed::from_u128(1)).unwrap();
        let text = buffer_text(&render(&session));
        assert!(text.contains("PRESS ENTER"));
        assert!(text.contains("NEXT"));
        assert!(text.contains("STATS"));
    }

    #[test]
    fn test_playing_has_no_popup() {
        let mut session =
            GameSession::new(GameConfig::default(), PieceSeed::from_u128(1)).unwrap();
        session.handle_event(GameEvent::Start);
        let text = buffer_text(&render(&session));
        assert!(!text.contains("PRESS ENTER"));
        assert!(!text.contains("PAUSED"));
        assert!(text.contains("SCORE:"));
    }
}
