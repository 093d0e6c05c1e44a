//! Input messages.
//!
//! Everything the outside world can tell the character arrives as an
//! [`InputMessage`] on the [`IntentQueue`](crate::resources::intentqueue::IntentQueue).
//! Messages are queued rather than applied, so keyboard callbacks, touch
//! handlers or another thread can send at any time while the state still
//! changes only once per tick.

use crate::components::animation::AnimationId;
use crate::components::movementstate::Facing;

/// Physical keys the translator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Move left.
    ArrowLeft,
    /// Move right.
    ArrowRight,
    /// Move left (alternate).
    A,
    /// Move right (alternate).
    D,
    /// Attack.
    X,
    /// Jump.
    Z,
    /// Toggle crouch.
    C,
    /// Middle parry.
    Digit1,
    /// Up parry.
    Digit2,
    /// Down parry.
    Digit3,
    /// Thrust.
    T,
    /// Down attack.
    S,
}

/// On-screen action buttons of the touch layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionButton {
    Attack,
    Jump,
    Parry,
    Thrust,
    DownAttack,
    Crouch,
}

/// One queued input from the boundary layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMessage {
    /// Key went down (`pressed == true`) or up.
    Key { key: Key, pressed: bool },
    /// Touch direction button held or released.
    Touch { facing: Facing, pressed: bool },
    /// Touch action button tapped.
    Button(ActionButton),
    /// Level-triggered directional intent, replacing the previous one.
    Directional { left: bool, right: bool },
    /// Explicit animation request.
    Request(AnimationId),
}
