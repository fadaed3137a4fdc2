use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Start,
    Quit,
}

/// Key events relevant while the name prompt is open.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum PromptInput {
    Char(char),
    Backspace,
    Submit,
    Cancel,
}

/// Maps a key press to a game input. Arrow keys and WASD steer, Space starts.
#[must_use]
pub fn map_game_key(key: KeyEvent) -> Option<GameInput> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => Some(GameInput::Direction(Direction::Up)),
        KeyCode::Down | KeyCode::Char('s' | 'S') => Some(GameInput::Direction(Direction::Down)),
        KeyCode::Left | KeyCode::Char('a' | 'A') => Some(GameInput::Direction(Direction::Left)),
        KeyCode::Right | KeyCode::Char('d' | 'D') => {
            Some(GameInput::Direction(Direction::Right))
        }
        KeyCode::Char(' ') => Some(GameInput::Start),
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => Some(GameInput::Quit),
        _ => None,
    }
}

/// Maps a key press to a prompt edit.
#[must_use]
pub fn map_prompt_key(key: KeyEvent) -> Option<PromptInput> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        KeyCode::Enter => Some(PromptInput::Submit),
        KeyCode::Esc => Some(PromptInput::Cancel),
        KeyCode::Backspace => Some(PromptInput::Backspace),
        KeyCode::Char(c) if !c.is_control() => Some(PromptInput::Char(c)),
        _ => None,
    }
}

/// Waits up to `timeout` for the next key press.
///
/// Key releases and repeats are dropped so each physical press yields one event.
pub fn poll_key(timeout: Duration) -> io::Result<Option<KeyEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }

    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::{Direction, GameInput, PromptInput, map_game_key, map_prompt_key};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_wasd_steer() {
        assert_eq!(
            map_game_key(press(KeyCode::Up)),
            Some(GameInput::Direction(Direction::Up))
        );
        assert_eq!(
            map_game_key(press(KeyCode::Char('a'))),
            Some(GameInput::Direction(Direction::Left))
        );
        assert_eq!(
            map_game_key(press(KeyCode::Char('D'))),
            Some(GameInput::Direction(Direction::Right))
        );
    }

    #[test]
    fn space_starts_and_escape_quits() {
        assert_eq!(map_game_key(press(KeyCode::Char(' '))), Some(GameInput::Start));
        assert_eq!(map_game_key(press(KeyCode::Esc)), Some(GameInput::Quit));
        assert_eq!(
            map_game_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(GameInput::Quit)
        );
        assert_eq!(map_game_key(press(KeyCode::Tab)), None);
    }

    #[test]
    fn prompt_keys_are_text_not_commands() {
        assert_eq!(
            map_prompt_key(press(KeyCode::Char('q'))),
            Some(PromptInput::Char('q'))
        );
        assert_eq!(map_prompt_key(press(KeyCode::Enter)), Some(PromptInput::Submit));
        assert_eq!(map_prompt_key(press(KeyCode::Esc)), Some(PromptInput::Cancel));
        assert_eq!(
            map_prompt_key(press(KeyCode::Backspace)),
            Some(PromptInput::Backspace)
        );
    }
}
