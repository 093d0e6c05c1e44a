//! Per-tick input resource.
//!
//! Holds which directional sources are currently held. The keyboard, touch
//! buttons and the level-triggered directional intent are tracked separately
//! and OR-ed together, so releasing a key does not cancel a held touch button.
use bevy_ecs::prelude::*;
use rustc_hash::FxHashSet;

use crate::events::input::Key;

/// Held state of one directional source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoolState {
    /// Whether the source is currently held.
    pub active: bool,
}

impl BoolState {
    /// Mark as held. Returns true on a press edge, false for auto-repeat.
    pub fn press(&mut self) -> bool {
        let edge = !self.active;
        self.active = true;
        edge
    }

    /// Mark as released. Returns true on a release edge.
    pub fn release(&mut self) -> bool {
        let edge = self.active;
        self.active = false;
        edge
    }
}

/// Resource capturing the directional state relevant to movement.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputState {
    // Keyboard
    pub arrow_left: BoolState,
    pub arrow_right: BoolState,
    pub key_a: BoolState,
    pub key_d: BoolState,
    // Touch buttons
    pub touch_left: BoolState,
    pub touch_right: BoolState,
    // Level-triggered intent set by the embedding UI
    pub intent_left: bool,
    pub intent_right: bool,
    /// Action keys currently down, used to drop auto-repeat.
    pub action_keys: FxHashSet<Key>,
}

impl InputState {
    /// Directional key state for `key`, if it is a movement key.
    pub fn movement_key_mut(&mut self, key: Key) -> Option<&mut BoolState> {
        match key {
            Key::ArrowLeft => Some(&mut self.arrow_left),
            Key::ArrowRight => Some(&mut self.arrow_right),
            Key::A => Some(&mut self.key_a),
            Key::D => Some(&mut self.key_d),
            _ => None,
        }
    }

    pub fn held_left(&self) -> bool {
        self.arrow_left.active || self.key_a.active || self.touch_left.active || self.intent_left
    }

    pub fn held_right(&self) -> bool {
        self.arrow_right.active || self.key_d.active || self.touch_right.active || self.intent_right
    }
}
