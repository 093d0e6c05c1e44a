//! Horizontal movement state.
//!
//! The character only moves along the x axis. [`MovementState::tick`] is the
//! movement controller: a pure transform from held directions and the
//! state-machine gate to the next position, facing and walking flag.

use bevy_ecs::prelude::Component;

/// Which way the sprite faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Horizontal limits for the character's pivot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f32,
    pub max: f32,
}

impl Bounds {
    /// `[half_width, game_width - half_width]`, so the sprite never leaves the playfield.
    pub fn for_width(game_width: f32, half_width: f32) -> Self {
        Self {
            min: half_width,
            max: game_width - half_width,
        }
    }

    pub fn clamp(&self, x: f32) -> f32 {
        x.max(self.min).min(self.max)
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct MovementState {
    pub position: f32,
    pub direction: Facing,
    pub is_walking: bool,
}

impl MovementState {
    pub fn new(position: f32) -> Self {
        Self {
            position,
            direction: Facing::default(),
            is_walking: false,
        }
    }

    /// Advance one tick.
    ///
    /// Left wins when both directions are held. When `can_move` is false the
    /// character stays put and stops walking, but keeps its facing.
    pub fn tick(
        &mut self,
        held_left: bool,
        held_right: bool,
        can_move: bool,
        speed: f32,
        bounds: &Bounds,
    ) -> MovementState {
        if !can_move {
            self.is_walking = false;
        } else if held_left {
            self.direction = Facing::Left;
            self.position = bounds.min.max(self.position - speed);
            self.is_walking = true;
        } else if held_right {
            self.direction = Facing::Right;
            self.position = bounds.max.min(self.position + speed);
            self.is_walking = true;
        } else {
            self.is_walking = false;
        }
        *self
    }
}
