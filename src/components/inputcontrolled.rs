//! Input-controlled character marker.
//!
//! Entities with [`InputControlled`] receive the queued player intents: the
//! input translator routes animation requests to them and the movement system
//! moves them by [`InputControlled::speed`] each tick.

use bevy_ecs::prelude::Component;

/// Movement intent derived from player input.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct InputControlled {
    /// Horizontal distance covered per tick while a direction is held.
    pub speed: f32,
}

impl InputControlled {
    pub fn new(speed: f32) -> Self {
        Self { speed }
    }
}
