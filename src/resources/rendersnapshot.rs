//! Read-only drawing descriptor.
//!
//! [`RenderSnapshot`] is everything a renderer needs to draw the character
//! for the current tick. It is rebuilt at the end of every tick by
//! [`render_snapshot`](crate::systems::render::render_snapshot).

use bevy_ecs::prelude::Resource;

use crate::components::animation::{AnimationId, AnimationState};
use crate::components::movementstate::{Facing, MovementState};
use crate::resources::animationstore::{AnimationStore, Millis};

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct RenderSnapshot {
    pub animation: AnimationId,
    /// Absolute sprite-sheet column.
    pub frame: u32,
    pub sprite_offset_x: u32,
    pub sprite_offset_y: u32,
    pub position_x: f32,
    pub facing: Facing,
    /// Height above the ground (jump arc).
    pub vertical_offset: f32,
    pub is_walking: bool,
}

impl RenderSnapshot {
    pub fn capture(
        anim: &AnimationState,
        movement: &MovementState,
        store: &AnimationStore,
        now: Millis,
    ) -> Self {
        let frame = anim.frame(now, store);
        let (x, y) = store.sprite_pixel_offset(anim.current, frame);
        Self {
            animation: anim.current,
            frame,
            sprite_offset_x: x,
            sprite_offset_y: y,
            position_x: movement.position,
            facing: movement.direction,
            vertical_offset: anim.jump_height,
            is_walking: movement.is_walking,
        }
    }
}
