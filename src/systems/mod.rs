//! Character systems.
//!
//! Submodules overview, in tick order
//! - [`time`] – advance the session clock (called before the schedule)
//! - [`input`] – drain queued input into held directions and animation requests
//! - [`movement`] – move controlled entities from held directions
//! - [`animation`] – advance the animation state machine and sprite frame
//! - [`render`] – publish the render snapshot

pub mod animation;
pub mod input;
pub mod movement;
pub mod render;
pub mod time;
