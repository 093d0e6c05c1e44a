//! Action request throttle.
//!
//! After an accepted action request, further requests are dropped until the
//! per-action cooldown runs out. This is UI throttling at the input boundary;
//! the state machine itself does not depend on it.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

use crate::components::animation::AnimationId;
use crate::resources::animationstore::Millis;

pub const DEFAULT_COOLDOWN_MS: Millis = 300;

/// Default per-action cooldowns.
pub fn default_cooldowns() -> FxHashMap<AnimationId, Millis> {
    let mut table = FxHashMap::default();
    table.insert(AnimationId::Attack, 500);
    table.insert(AnimationId::Jump, 600);
    table.insert(AnimationId::Thrust, 400);
    table.insert(AnimationId::DownAttack, 400);
    table.insert(AnimationId::Crouch, 200);
    table
}

#[derive(Resource, Debug, Clone)]
pub struct ActionCooldown {
    table: FxHashMap<AnimationId, Millis>,
    default_ms: Millis,
    ready_at: Millis,
}

impl Default for ActionCooldown {
    fn default() -> Self {
        Self::new(default_cooldowns(), DEFAULT_COOLDOWN_MS)
    }
}

impl ActionCooldown {
    pub fn new(table: FxHashMap<AnimationId, Millis>, default_ms: Millis) -> Self {
        Self {
            table,
            default_ms,
            ready_at: 0,
        }
    }

    pub fn duration_for(&self, id: AnimationId) -> Millis {
        self.table.get(&id).copied().unwrap_or(self.default_ms)
    }

    pub fn is_cooling(&self, now: Millis) -> bool {
        now < self.ready_at
    }

    /// Start the cooldown of `id` at `now`.
    pub fn arm(&mut self, id: AnimationId, now: Millis) {
        self.ready_at = now.saturating_add(self.duration_for(id));
    }

    pub fn ready_at(&self) -> Millis {
        self.ready_at
    }
}
