//! Input translation system.
//!
//! [`translate_input`] drains the [`IntentQueue`] once per tick and turns raw
//! messages into intents:
//!
//! - directional keys, touch buttons and the directional intent update
//!   [`InputState`], which the movement system reads;
//! - action keys, action buttons and explicit requests become animation
//!   requests on every [`InputControlled`] entity, gated by the
//!   [`ActionCooldown`].
//!
//! Key map: arrows or A/D move, X attack, Z jump, C toggles crouch, 1/2/3
//! parry middle/up/down, T thrust, S down attack. Only press edges trigger
//! actions; auto-repeat is dropped.
use bevy_ecs::prelude::*;
use log::trace;

use crate::components::animation::{AnimationId, AnimationState, RequestOutcome};
use crate::components::inputcontrolled::InputControlled;
use crate::components::movementstate::{Facing, MovementState};
use crate::events::animation::AnimationChangedEvent;
use crate::events::input::{ActionButton, InputMessage, Key};
use crate::resources::animationpolicy::AnimationPolicy;
use crate::resources::cooldown::ActionCooldown;
use crate::resources::input::InputState;
use crate::resources::intentqueue::IntentQueue;
use crate::resources::worldtime::WorldTime;

/// What an action input asks the character to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionTrigger {
    Play(AnimationId),
    /// Crouch, or stand up if already crouched.
    ToggleCrouch,
}

impl ActionTrigger {
    /// Concrete animation to request given the one currently playing.
    pub fn resolve(self, current: AnimationId) -> AnimationId {
        match self {
            ActionTrigger::Play(id) => id,
            ActionTrigger::ToggleCrouch if current == AnimationId::Crouch => AnimationId::Idle,
            ActionTrigger::ToggleCrouch => AnimationId::Crouch,
        }
    }
}

/// Action bound to a keyboard key, if any. Movement keys have none.
pub fn key_action(key: Key) -> Option<ActionTrigger> {
    match key {
        Key::X => Some(ActionTrigger::Play(AnimationId::Attack)),
        Key::Z => Some(ActionTrigger::Play(AnimationId::Jump)),
        Key::C => Some(ActionTrigger::ToggleCrouch),
        Key::Digit1 => Some(ActionTrigger::Play(AnimationId::MiddleParry)),
        Key::Digit2 => Some(ActionTrigger::Play(AnimationId::UpParry)),
        Key::Digit3 => Some(ActionTrigger::Play(AnimationId::DownParry)),
        Key::T => Some(ActionTrigger::Play(AnimationId::Thrust)),
        Key::S => Some(ActionTrigger::Play(AnimationId::DownAttack)),
        Key::ArrowLeft | Key::ArrowRight | Key::A | Key::D => None,
    }
}

/// Action bound to a touch button.
pub fn button_action(button: ActionButton) -> ActionTrigger {
    match button {
        ActionButton::Attack => ActionTrigger::Play(AnimationId::Attack),
        ActionButton::Jump => ActionTrigger::Play(AnimationId::Jump),
        ActionButton::Parry => ActionTrigger::Play(AnimationId::MiddleParry),
        ActionButton::Thrust => ActionTrigger::Play(AnimationId::Thrust),
        ActionButton::DownAttack => ActionTrigger::Play(AnimationId::DownAttack),
        ActionButton::Crouch => ActionTrigger::ToggleCrouch,
    }
}

/// Drain queued input and apply it for this tick.
pub fn translate_input(
    queue: Res<IntentQueue>,
    mut input: ResMut<InputState>,
    mut cooldown: ResMut<ActionCooldown>,
    policy: Res<AnimationPolicy>,
    time: Res<WorldTime>,
    mut query: Query<(Entity, &mut AnimationState, &MovementState), With<InputControlled>>,
    mut commands: Commands,
) {
    let now = time.now_ms();

    for msg in queue.drain() {
        let (trigger, bypass_cooldown) = match msg {
            InputMessage::Key { key, pressed } => {
                if let Some(state) = input.movement_key_mut(key) {
                    if pressed {
                        state.press();
                    } else {
                        state.release();
                    }
                    continue;
                }
                if !pressed {
                    input.action_keys.remove(&key);
                    continue;
                }
                if !input.action_keys.insert(key) {
                    continue;
                }
                match key_action(key) {
                    Some(trigger) => (trigger, false),
                    None => continue,
                }
            }
            InputMessage::Touch { facing, pressed } => {
                let state = match facing {
                    Facing::Left => &mut input.touch_left,
                    Facing::Right => &mut input.touch_right,
                };
                if pressed {
                    state.press();
                } else {
                    state.release();
                }
                continue;
            }
            // The crouch button toggles even while cooling down.
            InputMessage::Button(button) => {
                (button_action(button), button == ActionButton::Crouch)
            }
            InputMessage::Directional { left, right } => {
                input.intent_left = left;
                input.intent_right = right;
                continue;
            }
            InputMessage::Request(id) => (ActionTrigger::Play(id), false),
        };

        if !bypass_cooldown && cooldown.is_cooling(now) {
            trace!("{:?} dropped: cooling down until {}ms", trigger, cooldown.ready_at());
            continue;
        }

        // Movement is frozen while crouched, so the held keys decide whether
        // standing up resumes walking.
        let walking_hint = input.held_left() || input.held_right();
        for (entity, mut anim, movement) in query.iter_mut() {
            let from = anim.current;
            let id = trigger.resolve(from);
            let outcome = anim.request(id, walking_hint || movement.is_walking, now, &policy);
            if outcome.is_accepted() {
                cooldown.arm(id, now);
                commands.trigger(AnimationChangedEvent {
                    entity,
                    from,
                    to: anim.current,
                    at_ms: now,
                    restarted: outcome == RequestOutcome::Restarted,
                });
            }
        }
    }
}
