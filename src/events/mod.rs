//! Event and message types exchanged across systems.
//!
//! Submodules:
//! - [`animation`] – animation change notifications and the logging observer
//! - [`input`] – queued input messages from the boundary layer
pub mod animation;
pub mod input;
