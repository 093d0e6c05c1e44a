//! Movement controller system.
//!
//! Moves every [`InputControlled`] entity along the x axis from the held
//! directions in [`InputState`], gated by its animation: no movement while
//! crouched, and none while an action holds the lock unless the playfield
//! allows it.
use bevy_ecs::prelude::*;

use crate::components::animation::{AnimationId, AnimationState};
use crate::components::inputcontrolled::InputControlled;
use crate::components::movementstate::MovementState;
use crate::resources::input::InputState;
use crate::resources::playfield::Playfield;

/// Whether an entity in `anim` may move this tick.
pub fn can_move(anim: &AnimationState, playfield: &Playfield) -> bool {
    anim.current != AnimationId::Crouch && !(playfield.lock_blocks_movement && anim.locked)
}

pub fn movement(
    input: Res<InputState>,
    playfield: Res<Playfield>,
    mut query: Query<(&InputControlled, &AnimationState, &mut MovementState)>,
) {
    let held_left = input.held_left();
    let held_right = input.held_right();
    for (controlled, anim, mut state) in query.iter_mut() {
        state.tick(
            held_left,
            held_right,
            can_move(anim, &playfield),
            controlled.speed,
            &playfield.bounds,
        );
    }
}
