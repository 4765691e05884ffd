use blockfall_engine::{GameEvent, GameState, Input};
use crossterm::event::{Event, KeyCode, KeyEventKind};

/// What a key press asks the play screen to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum KeyAction {
    Game(GameEvent),
    Quit,
}

pub(super) const KEY_BINDINGS: &[(&[&str], &str)] = &[
    (&["←", "→"], "Move"),
    (&["↓"], "Soft Drop"),
    (&["↑", "Space"], "Hard Drop"),
    (&["Z", "X"], "Rotate"),
    (&["P"], "Pause"),
    (&["Enter"], "Start"),
    (&["Q"], "Quit"),
];

/// Maps a terminal event to an action. Enter starts a new game or restarts a
/// finished one, depending on `state`.
pub(super) fn map_event(event: &Event, state: GameState) -> Option<KeyAction> {
    let key = event.as_key_event()?;
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let input = match key.code {
        KeyCode::Left => Input::MoveLeft,
        KeyCode::Right => Input::MoveRight,
        KeyCode::Down => Input::SoftDrop,
        KeyCode::Up | KeyCode::Char(' ') => Input::HardDrop,
        KeyCode::Char('z' | 'Z') => Input::RotateCcw,
        KeyCode::Char('x' | 'X') => Input::RotateCw,
        KeyCode::Char('p' | 'P') => Input::Pause,
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => return Some(KeyAction::Quit),
        KeyCode::Enter => {
            return match state {
                GameState::Ready => Some(KeyAction::Game(GameEvent::Start)),
                GameState::GameOver => Some(KeyAction::Game(GameEvent::Restart)),
                GameState::Playing | GameState::Paused => None,
            };
        }
        _ => return None,
    };
    Some(KeyAction::Game(input.into()))
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_movement_keys() {
        let cases = [
            (KeyCode::Left, Input::MoveLeft),
            (KeyCode::Right, Input::MoveRight),
            (KeyCode::Down, Input::SoftDrop),
            (KeyCode::Up, Input::HardDrop),
            (KeyCode::Char(' '), Input::HardDrop),
            (KeyCode::Char('z'), Input::RotateCcw),
            (KeyCode::Char('x'), Input::RotateCw),
            (KeyCode::Char('p'), Input::Pause),
        ];
        for (code, input) in cases {
            assert_eq!(
                map_event(&press(code), GameState::Playing),
                Some(KeyAction::Game(GameEvent::Input(input))),
                "{code:?}"
            );
        }
    }

    #[test]
    fn test_enter_depends_on_state() {
        let enter = press(KeyCode::Enter);
        assert_eq!(
            map_event(&enter, GameState::Ready),
            Some(KeyAction::Game(GameEvent::Start))
        );
        assert_eq!(
            map_event(&enter, GameState::GameOver),
            Some(KeyAction::Game(GameEvent::Restart))
        );
        assert_eq!(map_event(&enter, GameState::Playing), None);
    }

    #[test]
    fn test_quit_and_unbound_keys() {
        assert_eq!(
            map_event(&press(KeyCode::Char('q')), GameState::Paused),
            Some(KeyAction::Quit)
        );
        assert_eq!(map_event(&press(KeyCode::Char('a')), GameState::Playing), None);
        assert_eq!(map_event(&Event::FocusGained, GameState::Playing), None);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let release = Event::Key(KeyEvent::new_with_kind(
            KeyCode::Left,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        assert_eq!(map_event(&release, GameState::Playing), None);
    }
}
