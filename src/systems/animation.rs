//! Animation system.
//!
//! [`animation`] advances every [`AnimationState`] once per tick and updates
//! the visible sprite-sheet cell.
//!
//! # Animation Flow
//!
//! 1. Sheet layout is defined in [`AnimationStore`]
//! 2. Requests from [`translate_input`](crate::systems::input::translate_input) switch the current animation
//! 3. `animation` expires finished actions, follows the walking flag and the jump arc
//! 4. The frame is sampled from elapsed time and written to the [`Sprite`] offset
//!
//! Automatic transitions are announced with an [`AnimationChangedEvent`].

use bevy_ecs::prelude::*;

use crate::components::animation::AnimationState;
use crate::components::movementstate::MovementState;
use crate::components::sprite::Sprite;
use crate::events::animation::AnimationChangedEvent;
use crate::resources::animationpolicy::AnimationPolicy;
use crate::resources::animationstore::AnimationStore;
use crate::resources::worldtime::WorldTime;

/// Advance animation state and update the sprite frame.
///
/// Contract
/// - Reads [`WorldTime`] for the tick timestamp.
/// - Reads the walking flag written earlier this tick by the movement system.
/// - Mutates [`AnimationState`] and the [`Sprite`] offset.
pub fn animation(
    mut query: Query<(Entity, &mut AnimationState, &MovementState, &mut Sprite)>,
    store: Res<AnimationStore>,
    policy: Res<AnimationPolicy>,
    time: Res<WorldTime>,
    mut commands: Commands,
) {
    let now = time.now_ms();
    for (entity, mut state, movement, mut sprite) in query.iter_mut() {
        if let Some(t) = state.advance(now, movement.is_walking, &store, &policy) {
            commands.trigger(AnimationChangedEvent {
                entity,
                from: t.from,
                to: t.to,
                at_ms: now,
                restarted: false,
            });
        }

        let frame = state.frame(now, &store);
        let (x, y) = store.sprite_pixel_offset(state.current, frame);
        sprite.offset_x = x;
        sprite.offset_y = y;
    }
}
