/// Keyboard → `Intent`.
///
/// Movement and jump are held actions; interact and cancel fire once per
/// physical press. Terminals that never report key releases are handled
/// with a hold timeout: a key counts as released once no Press/Repeat has
/// arrived for `HOLD_TIMEOUT`.
///
/// Key map:
///   A / ←          left          D / →           right
///   W / ↑ / Space  jump          E / Enter       interact
///   Esc            cancel        Q / Ctrl+C      quit

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::domain::entity::Intent;

const HOLD_TIMEOUT: Duration = Duration::from_millis(160);

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Action {
    Left,
    Right,
    Jump,
    Interact,
    Cancel,
    Quit,
}

/// Which action a key drives, if any. Letters are case-insensitive.
pub fn key_action(key: &KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Action::Quit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Left => Some(Action::Left),
        KeyCode::Right => Some(Action::Right),
        KeyCode::Up => Some(Action::Jump),
        KeyCode::Enter => Some(Action::Interact),
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'a' => Some(Action::Left),
            'd' => Some(Action::Right),
            'w' | ' ' => Some(Action::Jump),
            'e' => Some(Action::Interact),
            'q' => Some(Action::Quit),
            _ => None,
        },
        _ => None,
    }
}

pub struct InputState {
    /// Last Press/Repeat per action.
    last_active: HashMap<Action, Instant>,
    /// Actions that went from released to held during the last drain.
    fresh: Vec<Action>,
    /// Only trust Release events when keyboard enhancement is on.
    pub honor_release: bool,
}

impl InputState {
    pub fn new() -> Self {
        InputState {
            last_active: HashMap::with_capacity(8),
            fresh: Vec::with_capacity(4),
            honor_release: false,
        }
    }

    /// Read every pending terminal event without blocking. Once per frame.
    pub fn drain_events(&mut self) {
        self.fresh.clear();

        while poll(Duration::ZERO).unwrap_or(false) {
            let Ok(Event::Key(key)) = event::read() else {
                continue;
            };
            let Some(action) = key_action(&key) else {
                continue;
            };
            self.apply(action, key.kind, Instant::now());
        }

        let now = Instant::now();
        self.last_active.retain(|_, t| now.duration_since(*t) < HOLD_TIMEOUT);
    }

    fn apply(&mut self, action: Action, kind: KeyEventKind, now: Instant) {
        match kind {
            KeyEventKind::Release if self.honor_release => {
                self.last_active.remove(&action);
            }
            KeyEventKind::Release => {}
            _ => {
                if !self.held_at(action, now) {
                    self.fresh.push(action);
                }
                self.last_active.insert(action, now);
            }
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.fresh.contains(&Action::Quit)
    }

    pub fn intent(&self) -> Intent {
        let now = Instant::now();
        Intent {
            left: self.held_at(Action::Left, now),
            right: self.held_at(Action::Right, now),
            jump: self.held_at(Action::Jump, now),
            interact: self.fresh.contains(&Action::Interact),
            cancel: self.fresh.contains(&Action::Cancel),
        }
    }

    fn held_at(&self, action: Action, now: Instant) -> bool {
        self.last_active
            .get(&action)
            .is_some_and(|t| now.duration_since(*t) < HOLD_TIMEOUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn letters_and_arrows_map_alike() {
        assert_eq!(key_action(&key(KeyCode::Char('a'))), Some(Action::Left));
        assert_eq!(key_action(&key(KeyCode::Char('A'))), Some(Action::Left));
        assert_eq!(key_action(&key(KeyCode::Left)), Some(Action::Left));
        assert_eq!(key_action(&key(KeyCode::Char(' '))), Some(Action::Jump));
        assert_eq!(key_action(&key(KeyCode::Esc)), Some(Action::Cancel));
        assert_eq!(key_action(&key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn ctrl_c_quits() {
        let ev = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_action(&ev), Some(Action::Quit));
        // Plain 'c' is unbound.
        assert_eq!(key_action(&key(KeyCode::Char('c'))), None);
    }

    #[test]
    fn repeat_is_not_a_fresh_press() {
        let mut input = InputState::new();
        let now = Instant::now();
        input.apply(Action::Interact, KeyEventKind::Press, now);
        input.apply(Action::Interact, KeyEventKind::Repeat, now);
        assert_eq!(input.fresh, vec![Action::Interact]);
        input.apply(Action::Left, KeyEventKind::Press, now);
        let intent = input.intent();
        assert!(intent.left && intent.interact);
        assert!(!intent.cancel && !intent.right);
    }

    #[test]
    fn release_only_counts_when_honored() {
        let mut input = InputState::new();
        let now = Instant::now();
        input.apply(Action::Right, KeyEventKind::Press, now);
        input.apply(Action::Right, KeyEventKind::Release, now);
        assert!(input.intent().right);

        input.honor_release = true;
        input.apply(Action::Right, KeyEventKind::Release, now);
        assert!(!input.intent().right);
    }
}
