//! Animation change notifications.
//!
//! An [`AnimationChangedEvent`] is triggered whenever a character switches
//! animation, both for accepted requests and for automatic transitions
//! (lock expiry, walk/idle). Observers can hook sounds or effects to it
//! without reaching into the state machine.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::animation::AnimationId;
use crate::resources::animationstore::Millis;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationChangedEvent {
    /// Character that changed animation.
    pub entity: Entity,
    pub from: AnimationId,
    pub to: AnimationId,
    /// Timestamp of the change.
    pub at_ms: Millis,
    /// True when the same animation restarted.
    pub restarted: bool,
}

/// Default observer: log every change.
pub fn log_animation_change(trigger: On<AnimationChangedEvent>) {
    let ev = trigger.event();
    debug!(
        "{:?}: {} -> {} at {}ms{}",
        ev.entity,
        ev.from,
        ev.to,
        ev.at_ms,
        if ev.restarted { " (restart)" } else { "" }
    );
}
