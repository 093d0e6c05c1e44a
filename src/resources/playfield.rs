//! Playfield resource.
//!
//! Horizontal bounds for the character and the movement gating option,
//! derived from [`GameConfig`](crate::resources::gameconfig::GameConfig).

use bevy_ecs::prelude::Resource;

use crate::components::movementstate::Bounds;
use crate::resources::gameconfig::GameConfig;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
    pub bounds: Bounds,
    /// Freeze movement while an action animation holds the lock.
    pub lock_blocks_movement: bool,
}

impl Playfield {
    pub fn from_config(config: &GameConfig) -> Self {
        let width = config.game_width as f32;
        Self {
            width,
            height: config.game_height as f32,
            bounds: Bounds::for_width(width, config.half_width),
            lock_blocks_movement: config.lock_blocks_movement,
        }
    }

    /// Spawn position: the middle of the playfield.
    pub fn center(&self) -> f32 {
        self.width / 2.0
    }
}
