use bevy_ecs::prelude::*;

use crate::components::animation::AnimationState;
use crate::components::inputcontrolled::InputControlled;
use crate::components::movementstate::{Facing, MovementState};
use crate::components::sprite::Sprite;
use crate::resources::animationstore::AnimationStore;
use crate::resources::rendersnapshot::RenderSnapshot;
use crate::resources::worldtime::WorldTime;

/// Last step of the tick: mirror the sprite to the facing and publish the
/// [`RenderSnapshot`] of the controlled character for whatever draws it.
pub fn render_snapshot(
    mut query: Query<(&AnimationState, &MovementState, &mut Sprite), With<InputControlled>>,
    store: Res<AnimationStore>,
    time: Res<WorldTime>,
    mut snapshot: ResMut<RenderSnapshot>,
) {
    let now = time.now_ms();
    for (anim, movement, mut sprite) in query.iter_mut() {
        sprite.flip_h = movement.direction == Facing::Left;
        *snapshot = RenderSnapshot::capture(anim, movement, &store, now);
    }
}
