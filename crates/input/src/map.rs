//! Mapping from terminal events to game actions.

use crate::types::{Direction, GameAction, PointerTarget};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        // Focus
        KeyCode::Up => Some(GameAction::MoveFocus(Direction::Up)),
        KeyCode::Down => Some(GameAction::MoveFocus(Direction::Down)),
        KeyCode::Left => Some(GameAction::MoveFocus(Direction::Left)),
        KeyCode::Right => Some(GameAction::MoveFocus(Direction::Right)),

        // Selection
        KeyCode::Enter | KeyCode::Char(' ') => Some(GameAction::SelectFocused),

        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),
        KeyCode::Char('h') | KeyCode::Char('H') => Some(GameAction::Help),

        _ => None,
    }
}

/// Map a mouse event to a game action.
///
/// Only a left-button press counts as activation. `target_at` hit-tests
/// terminal coordinates (column, row) against what is currently drawn.
pub fn handle_mouse_event(
    event: MouseEvent,
    target_at: impl Fn(u16, u16) -> Option<PointerTarget>,
) -> Option<GameAction> {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            match target_at(event.column, event.row)? {
                PointerTarget::Tile(index) => Some(GameAction::Select(index)),
                PointerTarget::PlayAgain => Some(GameAction::Restart),
            }
        }
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_arrow_keys_move_focus() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Up)),
            Some(GameAction::MoveFocus(Direction::Up))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Down)),
            Some(GameAction::MoveFocus(Direction::Down))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Left)),
            Some(GameAction::MoveFocus(Direction::Left))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Right)),
            Some(GameAction::MoveFocus(Direction::Right))
        );
    }

    #[test]
    fn test_select_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Enter)),
            Some(GameAction::SelectFocused)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(GameAction::SelectFocused)
        );
    }

    #[test]
    fn test_restart_and_help_keys() {
        for c in ['r', 'R'] {
            assert_eq!(
                handle_key_event(KeyEvent::from(KeyCode::Char(c))),
                Some(GameAction::Restart)
            );
        }
        for c in ['h', 'H'] {
            assert_eq!(
                handle_key_event(KeyEvent::from(KeyCode::Char(c))),
                Some(GameAction::Help)
            );
        }
    }

    #[test]
    fn test_other_keys_do_nothing() {
        for code in [
            KeyCode::Char('x'),
            KeyCode::Char('j'),
            KeyCode::Tab,
            KeyCode::Backspace,
            KeyCode::PageDown,
        ] {
            assert_eq!(handle_key_event(KeyEvent::from(code)), None);
        }
    }

    #[test]
    fn test_left_click_selects_hit_tile() {
        let hit = |x: u16, y: u16| {
            if x < 10 && y < 5 {
                Some(PointerTarget::Tile(4))
            } else {
                None
            }
        };

        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 3, 2), hit),
            Some(GameAction::Select(4))
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 30, 2), hit),
            None
        );
    }

    #[test]
    fn test_left_click_on_play_again_restarts() {
        let hit = |_: u16, _: u16| Some(PointerTarget::PlayAgain);
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 35, 25), hit),
            Some(GameAction::Restart)
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Right), 35, 25), hit),
            None
        );
    }

    #[test]
    fn test_other_mouse_events_ignored() {
        let hit = |_: u16, _: u16| Some(PointerTarget::Tile(0));
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Right), 0, 0), hit),
            None
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 0, 0), hit),
            None
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Moved, 0, 0), hit),
            None
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('r'))));
    }
}
