use blockfall_engine::{EventQueue, GameEvent, GameSession};
use crossterm::event::Event;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use crate::{
    command::play::keymap::{self, KEY_BINDINGS, KeyAction},
    tui::{App, Tui},
    view::widgets::{KeyBindingDisplay, SessionDisplay},
};

/// Interactive game screen.
///
/// Key presses and timer ticks go through one [`EventQueue`], so the session
/// sees them strictly in arrival order.
#[derive(Debug)]
pub struct PlayApp {
    session: GameSession,
    events: EventQueue,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            events: EventQueue::new(),
            is_exiting: false,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    fn apply_pending(&mut self, tui: &mut Tui) {
        self.session.process(&mut self.events);
        // Gravity follows the level; ticks stop outside the playing state.
        let interval = self
            .session
            .state()
            .is_playing()
            .then(|| self.session.drop_interval());
        tui.set_tick_interval(interval);
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        self.apply_pending(tui);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, tui: &mut Tui, event: &Event) {
        match keymap::map_event(event, self.session.state()) {
            Some(KeyAction::Game(event)) => self.events.push(event),
            Some(KeyAction::Quit) => self.is_exiting = true,
            None => return,
        }
        self.apply_pending(tui);
    }

    fn draw(&self, frame: &mut Frame) {
        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(24), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(SessionDisplay::new(&self.session), main_area);
        frame.render_widget(KeyBindingDisplay::new(KEY_BINDINGS), help_area);
    }

    fn update(&mut self, tui: &mut Tui) {
        self.events.push(GameEvent::Tick);
        self.apply_pending(tui);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use blockfall_engine::{GameConfig, GameState, PieceSeed};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn app() -> PlayApp {
        let session = GameSession::new(GameConfig::default(), PieceSeed::from_u128(9)).unwrap();
        PlayApp::new(session)
    }

    #[test]
    fn test_enter_starts_and_q_quits() {
        let mut app = app();
        let mut tui = Tui::new();
        app.init(&mut tui);
        assert_eq!(app.session().state(), GameState::Ready);

        app.handle_event(&mut tui, &press(KeyCode::Enter));
        assert_eq!(app.session().state(), GameState::Playing);
        assert!(app.session().active_piece().is_some());

        app.handle_event(&mut tui, &press(KeyCode::Char('p')));
        assert_eq!(app.session().state(), GameState::Paused);

        assert!(!app.should_exit());
        app.handle_event(&mut tui, &press(KeyCode::Char('q')));
        assert!(app.should_exit());
    }

    #[test]
    fn test_update_applies_gravity() {
        let mut app = app();
        let mut tui = Tui::new();
        app.handle_event(&mut tui, &press(KeyCode::Enter));
        let before = app.session().active_piece().unwrap().anchor();

        app.update(&mut tui);
        let after = app.session().active_piece().unwrap().anchor();
        assert_eq!(after, before.offset(0, 1));
        assert_eq!(app.session().stats().play_time(), Duration::from_secs(1));
    }

    #[test]
    fn test_hard_drop_key_locks_piece() {
        let mut app = app();
        let mut tui = Tui::new();
        app.handle_event(&mut tui, &press(KeyCode::Enter));
        app.handle_event(&mut tui, &press(KeyCode::Char(' ')));
        assert_eq!(app.session().stats().locked_pieces(), 1);
        assert_eq!(app.session().board().filled_count(), 4);
    }
}
