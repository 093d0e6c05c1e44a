//! ECS resources made available to systems.
//!
//! Overview
//! - `animationpolicy` – lock, restart and loop sets of the state machine
//! - `animationstore` – sprite-sheet catalog and frame calculator
//! - `cooldown` – throttle for action requests at the input boundary
//! - `gameconfig` – settings loaded from `config.ini`
//! - `input` – which directional sources are held this tick
//! - `intentqueue` – channel from input producers to the tick
//! - `playfield` – horizontal bounds and movement gating
//! - `rendersnapshot` – drawing descriptor rebuilt every tick
//! - `worldtime` – session clock and delta
pub mod animationpolicy;
pub mod animationstore;
pub mod cooldown;
pub mod gameconfig;
pub mod input;
pub mod intentqueue;
pub mod playfield;
pub mod rendersnapshot;
pub mod worldtime;
