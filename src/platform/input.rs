//! Keyboard state
//!
//! Tracks which keys are held and maps them onto movement intents. Arrow
//! keys and WASD are equivalent.

use std::collections::HashSet;

use crate::sim::TickInput;

/// Keys the walker reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    A,
    D,
    W,
    S,
}

impl Key {
    /// Parse a host key name (`"ArrowLeft"`, `"w"`, ...). Unknown keys map to `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" | "Left" => Some(Key::Left),
            "ArrowRight" | "Right" => Some(Key::Right),
            "ArrowUp" | "Up" => Some(Key::Up),
            "ArrowDown" | "Down" => Some(Key::Down),
            "a" | "A" => Some(Key::A),
            "d" | "D" => Some(Key::D),
            "w" | "W" => Some(Key::W),
            "s" | "S" => Some(Key::S),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct VirtualKeyboard {
    held: HashSet<Key>,
}

impl VirtualKeyboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Feed a named host key event; unknown names are ignored.
    pub fn handle_named(&mut self, name: &str, pressed: bool) {
        let Some(key) = Key::from_name(name) else {
            log::trace!("Ignoring key {name:?}");
            return;
        };
        if pressed {
            self.key_down(key);
        } else {
            self.key_up(key);
        }
    }

    /// Drop every held key, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Intents for the next tick
    pub fn intents(&self) -> TickInput {
        let any = |a, b| self.is_held(a) || self.is_held(b);
        TickInput {
            turn_left: any(Key::Left, Key::A),
            turn_right: any(Key::Right, Key::D),
            forward: any(Key::Up, Key::W),
            backward: any(Key::Down, Key::S),
        }
    }
}
