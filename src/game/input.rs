use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

use super::state::{GameState, Side, PADDLE_STEP};

/// Keys the game reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    W,
    S,
    Up,
    Down,
    Escape,
}

impl Key {
    const PADDLE_KEYS: [Key; 4] = [Key::W, Key::S, Key::Up, Key::Down];

    fn from_code(code: KeyCode) -> Option<Key> {
        match code {
            KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::W),
            KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::S),
            KeyCode::Up => Some(Key::Up),
            KeyCode::Down => Some(Key::Down),
            KeyCode::Esc => Some(Key::Escape),
            _ => None,
        }
    }

    /// Paddle driven by this key and the sign of its key-down velocity change
    fn paddle_binding(self) -> Option<(Side, f32)> {
        match self {
            Key::W => Some((Side::Left, -1.0)),
            Key::S => Some((Side::Left, 1.0)),
            Key::Up => Some((Side::Right, -1.0)),
            Key::Down => Some((Side::Right, 1.0)),
            Key::Escape => None,
        }
    }

    fn slot(self) -> Option<usize> {
        Self::PADDLE_KEYS.iter().position(|k| *k == self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// The player closed the game window (Ctrl+C in the terminal)
    Close,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Apply one input event to the paddles.
pub fn handle_input(state: &mut GameState, input: InputEvent) -> Control {
    match input {
        InputEvent::Close | InputEvent::KeyDown(Key::Escape) => Control::Quit,
        InputEvent::KeyDown(key) => {
            if let Some((side, sign)) = key.paddle_binding() {
                state.paddle_mut(side).velocity += sign * PADDLE_STEP;
            }
            Control::Continue
        }
        InputEvent::KeyUp(key) => {
            if let Some((side, sign)) = key.paddle_binding() {
                state.paddle_mut(side).velocity -= sign * PADDLE_STEP;
            }
            Control::Continue
        }
    }
}

/// How key releases are detected
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseMode {
    /// Terminal reports real release events (keyboard enhancement protocol)
    Native,
    /// No release events: a key counts as held until this long after its last press
    Timeout(Duration),
}

// Longer than typical auto-repeat intervals, short enough that a tap stops quickly
pub const DEFAULT_RELEASE_TIMEOUT: Duration = Duration::from_millis(150);

/// Turns raw terminal key events into key-down/key-up pairs.
///
/// Repeated presses of a key that is already held are swallowed, so every
/// `KeyDown` is matched by exactly one `KeyUp`.
#[derive(Debug, Clone)]
pub struct KeyTracker {
    mode: ReleaseMode,
    held: [Option<Instant>; 4],
}

impl KeyTracker {
    pub fn new(mode: ReleaseMode) -> Self {
        Self {
            mode,
            held: [None; 4],
        }
    }

    pub fn mode(&self) -> ReleaseMode {
        self.mode
    }

    pub fn translate(&mut self, key: KeyEvent, now: Instant) -> Option<InputEvent> {
        if key.kind == KeyEventKind::Press
            && key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        {
            return Some(InputEvent::Close);
        }

        let game_key = Key::from_code(key.code)?;
        let Some(slot) = game_key.slot() else {
            return (key.kind == KeyEventKind::Press).then_some(InputEvent::KeyDown(game_key));
        };

        match (key.kind, self.mode) {
            (KeyEventKind::Release, ReleaseMode::Native) => {
                self.held[slot].take().map(|_| InputEvent::KeyUp(game_key))
            }
            (KeyEventKind::Release, ReleaseMode::Timeout(_)) => None,
            (KeyEventKind::Press | KeyEventKind::Repeat, _) => {
                let was_held = self.held[slot].replace(now).is_some();
                (!was_held).then_some(InputEvent::KeyDown(game_key))
            }
        }
    }

    /// Release keys whose timeout ran out. Always empty in native mode.
    pub fn expire(&mut self, now: Instant) -> Vec<InputEvent> {
        let ReleaseMode::Timeout(timeout) = self.mode else {
            return Vec::new();
        };

        let mut released = Vec::new();
        for (slot, held) in self.held.iter_mut().enumerate() {
            if let Some(pressed_at) = *held {
                if now.duration_since(pressed_at) >= timeout {
                    *held = None;
                    released.push(InputEvent::KeyUp(Key::PADDLE_KEYS[slot]));
                }
            }
        }
        released
    }
}

/// Drain all pending terminal events without blocking.
pub fn poll_input(tracker: &mut KeyTracker) -> Result<Vec<InputEvent>, std::io::Error> {
    let mut inputs = Vec::new();

    while event::poll(Duration::from_millis(0))? {
        if let Event::Key(key) = event::read()? {
            if let Some(input) = tracker.translate(key, Instant::now()) {
                inputs.push(input);
            }
        }
    }

    inputs.extend(tracker.expire(Instant::now()));
    Ok(inputs)
}
