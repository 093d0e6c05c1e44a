use bevy_ecs::prelude::Component;

use crate::resources::animationstore::FRAME_SIZE;

/// Sprite-sheet cell to draw for an entity.
/// The offset selects the frame from the sheet in pixels; `flip_h` mirrors it when facing left.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Sprite {
    pub width: f32,
    pub height: f32,
    pub offset_x: u32,
    pub offset_y: u32,
    pub flip_h: bool,
}

impl Default for Sprite {
    fn default() -> Self {
        Self {
            width: FRAME_SIZE as f32,
            height: FRAME_SIZE as f32,
            offset_x: 0,
            offset_y: 0,
            flip_h: false,
        }
    }
}
