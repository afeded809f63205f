//! Keyboard handling: crossterm key events to engine commands.

use crate::high_score::HighScoreStore;
use crate::session::ArcadeSession;
use crate::snake::{Direction, Phase};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::Rng;

/// UI-agnostic input actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeInput {
    Up,
    Down,
    Left,
    Right,
    Pause,   // Space; also starts from the title screen
    Confirm, // Enter
    Reset,   // R
    Quit,    // Q / Esc / Ctrl+C
    Other,
}

/// What the main loop should do after an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Continue,
    Quit,
}

pub fn map_key(key: KeyEvent) -> SnakeInput {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return SnakeInput::Quit;
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => SnakeInput::Up,
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => SnakeInput::Down,
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => SnakeInput::Left,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => SnakeInput::Right,
        KeyCode::Char(' ') => SnakeInput::Pause,
        KeyCode::Enter => SnakeInput::Confirm,
        KeyCode::Char('r') | KeyCode::Char('R') => SnakeInput::Reset,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => SnakeInput::Quit,
        _ => SnakeInput::Other,
    }
}

/// Apply one input to the session.
pub fn process_input<S: HighScoreStore, R: Rng>(
    session: &mut ArcadeSession<S, R>,
    input: SnakeInput,
) -> InputOutcome {
    let direction = match input {
        SnakeInput::Up => Some(Direction::Up),
        SnakeInput::Down => Some(Direction::Down),
        SnakeInput::Left => Some(Direction::Left),
        SnakeInput::Right => Some(Direction::Right),
        _ => None,
    };
    if let Some(direction) = direction {
        session.submit_direction(direction);
        return InputOutcome::Continue;
    }

    let idle = matches!(session.game().phase, Phase::NotStarted | Phase::GameOver);
    match input {
        SnakeInput::Quit => return InputOutcome::Quit,
        SnakeInput::Confirm | SnakeInput::Pause if idle => session.start(),
        SnakeInput::Pause => {
            session.toggle_pause();
        }
        SnakeInput::Reset => session.reset(),
        _ => {}
    }
    InputOutcome::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::high_score::MemoryStore;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn session() -> ArcadeSession<MemoryStore, ChaCha8Rng> {
        ArcadeSession::new(
            EngineConfig::default(),
            MemoryStore::default(),
            ChaCha8Rng::seed_from_u64(3),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_key(key(KeyCode::Up)), SnakeInput::Up);
        assert_eq!(map_key(key(KeyCode::Char('a'))), SnakeInput::Left);
        assert_eq!(map_key(key(KeyCode::Char('D'))), SnakeInput::Right);
        assert_eq!(map_key(key(KeyCode::Char(' '))), SnakeInput::Pause);
        assert_eq!(map_key(key(KeyCode::Esc)), SnakeInput::Quit);
        assert_eq!(map_key(key(KeyCode::Char('x'))), SnakeInput::Other);
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            SnakeInput::Quit
        );
    }

    #[test]
    fn test_space_starts_then_pauses() {
        let mut session = session();
        process_input(&mut session, SnakeInput::Pause);
        assert_eq!(session.game().phase, Phase::Running);
        process_input(&mut session, SnakeInput::Pause);
        assert_eq!(session.game().phase, Phase::Paused);
        process_input(&mut session, SnakeInput::Pause);
        assert_eq!(session.game().phase, Phase::Running);
    }

    #[test]
    fn test_enter_plays_again_after_game_over() {
        let mut session = session();
        process_input(&mut session, SnakeInput::Confirm);
        session.game_mut().phase = Phase::GameOver;
        process_input(&mut session, SnakeInput::Confirm);
        assert_eq!(session.game().phase, Phase::Running);
    }

    #[test]
    fn test_direction_queued_while_running() {
        let mut session = session();
        process_input(&mut session, SnakeInput::Up);
        assert!(session.game().direction_queue.is_empty());
        process_input(&mut session, SnakeInput::Confirm);
        process_input(&mut session, SnakeInput::Up);
        assert_eq!(session.game().direction_queue.len(), 1);
    }

    #[test]
    fn test_reset_and_quit() {
        let mut session = session();
        process_input(&mut session, SnakeInput::Confirm);
        assert_eq!(
            process_input(&mut session, SnakeInput::Reset),
            InputOutcome::Continue
        );
        assert_eq!(session.game().phase, Phase::NotStarted);
        assert_eq!(
            process_input(&mut session, SnakeInput::Quit),
            InputOutcome::Quit
        );
    }
}
