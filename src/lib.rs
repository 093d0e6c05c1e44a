//! Samurai sprite library.
//!
//! A horizontally moving sprite character driven by a frame-based
//! animation state machine, built on `bevy_ecs`. The library exposes the
//! components, resources, systems and events for the binary, integration
//! tests and other frontends.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
