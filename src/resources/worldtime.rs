use bevy_ecs::prelude::Resource;

use crate::resources::animationstore::Millis;

/// Session clock advanced once per display tick.
///
/// `elapsed` is kept in `f64` seconds so it does not drift over long sessions;
/// the animation core reads it as whole milliseconds through [`WorldTime::now_ms`].
#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    pub elapsed: f64,
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Current tick timestamp in milliseconds.
    pub fn now_ms(&self) -> Millis {
        (self.elapsed * 1000.0).round().max(0.0) as Millis
    }
}
