//! Input adapter
//!
//! Turns raw key and level-picker signals into logical intents. The only
//! state kept is the set of keys currently held; single-jump-per-press is
//! enforced by the player's grounded flag, not here.

use std::collections::HashSet;

use crate::sim::parse_level;

/// Keys that trigger a jump by default
pub const DEFAULT_JUMP_KEYS: [&str; 2] = [" ", "ArrowUp"];

/// A raw signal from the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSignal {
    KeyDown(String),
    KeyUp(String),
    /// The surface lost focus; every held key is released
    Blur,
    /// Raw value from a level picker
    SetLevel(String),
}

/// Tracks held keys and forwards level intents
#[derive(Debug, Clone)]
pub struct InputAdapter {
    pressed: HashSet<String>,
    jump_keys: Vec<String>,
}

impl Default for InputAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_JUMP_KEYS)
    }
}

impl InputAdapter {
    pub fn new<I, S>(jump_keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pressed: HashSet::new(),
            jump_keys: jump_keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Apply a signal. Returns the requested level for level intents.
    pub fn apply(&mut self, signal: InputSignal) -> Option<u8> {
        match signal {
            InputSignal::KeyDown(key) => {
                self.pressed.insert(key);
                None
            }
            InputSignal::KeyUp(key) => {
                self.pressed.remove(&key);
                None
            }
            InputSignal::Blur => {
                self.pressed.clear();
                None
            }
            InputSignal::SetLevel(raw) => Some(parse_level(&raw)),
        }
    }

    pub fn is_pressed(&self, key: &str) -> bool {
        self.pressed.contains(key)
    }

    /// True while any jump key is held
    pub fn jump_held(&self) -> bool {
        self.jump_keys.iter().any(|k| self.pressed.contains(k))
    }

    /// True if the key is bound to jump (hosts use this to suppress scrolling)
    pub fn is_jump_key(&self, key: &str) -> bool {
        self.jump_keys.iter().any(|k| k == key)
    }
}
