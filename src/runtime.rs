use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::game::{GameEvent, GamePhase};

/// Unified event type consumed by the host loop
#[derive(Clone, Debug)]
pub enum RuntimeEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<RuntimeEvent, RecvTimeoutError>;
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Channel-backed event source for headless tests
pub struct TestEventSource {
    rx: Receiver<RuntimeEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<RuntimeEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<RuntimeEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the game one event/tick at a time
pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to the tick interval and returns the next event, or Tick on timeout
    pub fn step(&self) -> RuntimeEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                RuntimeEvent::Tick
            }
        }
    }
}

/// Maps a raw key event to a game event for the active phase. Space begins
/// from the start screen and continues from a break; `p` pauses while
/// playing; backspace press/release drive the delete repeat. Terminal
/// key-repeat events are dropped — character keys do not auto-repeat and
/// deletion repeat is emulated by the core's own timers.
pub fn translate_key(phase: GamePhase, key: KeyEvent) -> Option<GameEvent> {
    match key.kind {
        KeyEventKind::Release => match key.code {
            KeyCode::Backspace => Some(GameEvent::DeleteUp),
            _ => None,
        },
        KeyEventKind::Repeat => None,
        KeyEventKind::Press => match (phase, key.code) {
            (GamePhase::Start, KeyCode::Char(' ')) => Some(GameEvent::Begin),
            (GamePhase::Break, KeyCode::Char(' ')) => Some(GameEvent::Continue),
            (GamePhase::Playing, KeyCode::Char('p')) => Some(GameEvent::PauseToggle),
            (GamePhase::Playing, KeyCode::Backspace) => Some(GameEvent::DeleteDown),
            (GamePhase::Playing, KeyCode::Char(c)) => Some(GameEvent::CharTyped(c)),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use std::sync::mpsc;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn release(code: KeyCode) -> KeyEvent {
        let mut key = KeyEvent::new(code, KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        key
    }

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(1));
        let runner = Runner::new(es, ticker);

        // With no events available, step should yield Tick
        let ev = runner.step();
        match ev {
            RuntimeEvent::Tick => {}
            _ => panic!("expected Tick on timeout"),
        }
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(RuntimeEvent::Resize).unwrap();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(10));
        let runner = Runner::new(es, ticker);

        match runner.step() {
            RuntimeEvent::Resize => {}
            _ => panic!("expected Resize event"),
        }
    }

    #[test]
    fn space_begins_from_start_screen() {
        assert_eq!(
            translate_key(GamePhase::Start, press(KeyCode::Char(' '))),
            Some(GameEvent::Begin)
        );
    }

    #[test]
    fn space_continues_from_break() {
        assert_eq!(
            translate_key(GamePhase::Break, press(KeyCode::Char(' '))),
            Some(GameEvent::Continue)
        );
    }

    #[test]
    fn space_is_a_typed_char_while_playing() {
        assert_eq!(
            translate_key(GamePhase::Playing, press(KeyCode::Char(' '))),
            Some(GameEvent::CharTyped(' '))
        );
    }

    #[test]
    fn p_toggles_pause_while_playing_only() {
        assert_eq!(
            translate_key(GamePhase::Playing, press(KeyCode::Char('p'))),
            Some(GameEvent::PauseToggle)
        );
        assert_eq!(translate_key(GamePhase::Start, press(KeyCode::Char('p'))), None);
    }

    #[test]
    fn backspace_press_and_release_drive_delete() {
        assert_eq!(
            translate_key(GamePhase::Playing, press(KeyCode::Backspace)),
            Some(GameEvent::DeleteDown)
        );
        assert_eq!(
            translate_key(GamePhase::Playing, release(KeyCode::Backspace)),
            Some(GameEvent::DeleteUp)
        );
    }

    #[test]
    fn char_release_is_ignored() {
        assert_eq!(translate_key(GamePhase::Playing, release(KeyCode::Char('a'))), None);
    }

    #[test]
    fn terminal_autorepeat_is_ignored() {
        let mut key = press(KeyCode::Char('a'));
        key.kind = KeyEventKind::Repeat;

        assert_eq!(translate_key(GamePhase::Playing, key), None);
    }

    #[test]
    fn game_over_consumes_no_keys() {
        assert_eq!(translate_key(GamePhase::GameOver, press(KeyCode::Char(' '))), None);
        assert_eq!(translate_key(GamePhase::GameOver, press(KeyCode::Backspace)), None);
    }
}
