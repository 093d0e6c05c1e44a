//! ECS components for the character.
//!
//! Submodules overview:
//! - [`animation`] – animation ids and the animation state machine
//! - [`inputcontrolled`] – marks the entity driven by player intents
//! - [`movementstate`] – horizontal position, facing and walking flag
//! - [`sprite`] – sprite-sheet cell to draw

pub mod animation;
pub mod inputcontrolled;
pub mod movementstate;
pub mod sprite;
