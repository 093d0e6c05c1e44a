//! Animation catalog and frame calculator.
//!
//! The [`AnimationStore`] holds exactly one [`AnimationSpec`] per
//! [`AnimationId`]. The built-in table is an exhaustive `match`, and catalogs
//! loaded from JSON are rejected unless they cover every id, so a lookup can
//! never miss.
//!
//! The frame helpers are pure functions of `(id, start, now)`: the visible
//! frame is always sampled from elapsed time rather than counted per tick, so
//! playback speed does not depend on the achieved refresh rate.

use std::f32::consts::PI;
use std::path::Path;

use bevy_ecs::prelude::Resource;
use log::info;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::components::animation::AnimationId;

/// Milliseconds since session start.
pub type Millis = u64;

/// Width and height of one sprite-sheet cell, in pixels.
pub const FRAME_SIZE: u32 = 32;

/// Peak of the jump arc.
pub const MAX_JUMP_HEIGHT: f32 = 50.0;

/// Immutable description of one animation on the sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationSpec {
    /// Sprite-sheet row.
    pub row: u32,
    /// Number of frames, at least 1.
    pub frame_count: u32,
    /// First column of the animation on its row.
    pub start_frame: u32,
    /// Total duration. Zero means a static pose that never completes.
    pub duration_ms: Millis,
}

impl AnimationSpec {
    pub const fn new(row: u32, frame_count: u32, start_frame: u32, duration_ms: Millis) -> Self {
        Self {
            row,
            frame_count,
            start_frame,
            duration_ms,
        }
    }

    /// Absolute column after `elapsed` ms. Wraps, so looping animations cycle.
    pub fn frame_at(&self, elapsed: Millis) -> u32 {
        if self.duration_ms == 0 || self.frame_count <= 1 {
            return self.start_frame;
        }
        // floor((elapsed mod d) / (d / n)) without going through floats;
        // u128 keeps the product exact for any catalog values
        let local = u128::from(elapsed % self.duration_ms) * u128::from(self.frame_count)
            / u128::from(self.duration_ms);
        let local = u32::try_from(local).unwrap_or(u32::MAX);
        self.start_frame.saturating_add(local.min(self.frame_count - 1))
    }

    pub fn is_complete_at(&self, elapsed: Millis) -> bool {
        self.duration_ms > 0 && elapsed >= self.duration_ms
    }
}

/// Built-in samurai sheet layout.
pub fn builtin_spec(id: AnimationId) -> AnimationSpec {
    match id {
        AnimationId::Idle => AnimationSpec::new(0, 1, 0, 0),
        AnimationId::Walk => AnimationSpec::new(0, 4, 0, 600),
        AnimationId::MiddleParry => AnimationSpec::new(1, 1, 0, 400),
        AnimationId::UpParry => AnimationSpec::new(1, 1, 1, 400),
        AnimationId::DownParry => AnimationSpec::new(1, 1, 2, 400),
        AnimationId::Attack => AnimationSpec::new(2, 2, 0, 300),
        AnimationId::Thrust => AnimationSpec::new(3, 1, 0, 400),
        AnimationId::DownAttack => AnimationSpec::new(3, 1, 1, 400),
        AnimationId::Death => AnimationSpec::new(4, 1, 0, 0),
        AnimationId::Crouch => AnimationSpec::new(4, 1, 0, 0),
        AnimationId::Jump => AnimationSpec::new(5, 1, 0, 500),
    }
}

/// Height of the jump arc after `elapsed` ms of a `duration` ms jump.
///
/// `MAX_JUMP_HEIGHT * sin(pi * progress)`: zero at takeoff and landing, peak
/// at the midpoint.
pub fn jump_height(elapsed: Millis, duration: Millis) -> f32 {
    if duration == 0 {
        return 0.0;
    }
    let progress = (elapsed as f32 / duration as f32).min(1.0);
    (MAX_JUMP_HEIGHT * (progress * PI).sin()).max(0.0)
}

/// Registry of animation specs indexed by [`AnimationId`].
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct AnimationStore {
    specs: [AnimationSpec; AnimationId::COUNT],
}

impl Default for AnimationStore {
    fn default() -> Self {
        Self::builtin()
    }
}

impl AnimationStore {
    pub fn builtin() -> Self {
        Self {
            specs: AnimationId::ALL.map(builtin_spec),
        }
    }

    /// Parse a catalog from a JSON object keyed by animation name:
    ///
    /// ```json
    /// { "walk": { "row": 0, "frameCount": 4, "startFrame": 0, "durationMs": 600 }, ... }
    /// ```
    ///
    /// Every id must be present and every `frameCount` must be at least 1.
    pub fn from_json(text: &str) -> Result<Self, String> {
        let raw: FxHashMap<String, AnimationSpec> = serde_json::from_str(text)
            .map_err(|e| format!("Failed to parse animation catalog: {}", e))?;

        let mut found: [Option<AnimationSpec>; AnimationId::COUNT] = [None; AnimationId::COUNT];
        for (name, spec) in raw {
            let id = name.parse::<AnimationId>()?;
            if spec.frame_count == 0 {
                return Err(format!("Animation '{}' has frameCount 0", id));
            }
            found[id.index()] = Some(spec);
        }

        let missing: Vec<&str> = AnimationId::ALL
            .iter()
            .filter(|id| found[id.index()].is_none())
            .map(|id| id.name())
            .collect();
        if !missing.is_empty() {
            return Err(format!(
                "Animation catalog is missing: {}",
                missing.join(", ")
            ));
        }

        let mut store = Self::builtin();
        for id in AnimationId::ALL {
            if let Some(spec) = found[id.index()] {
                store.specs[id.index()] = spec;
            }
        }
        Ok(store)
    }

    /// Read and parse a JSON catalog file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read animation catalog {:?}: {}", path, e))?;
        let store = Self::from_json(&text)?;
        info!("Loaded animation catalog from {:?}", path);
        Ok(store)
    }

    /// Serialize the catalog back to the JSON layout accepted by [`Self::from_json`].
    pub fn to_json(&self) -> Result<String, String> {
        let map: FxHashMap<&str, AnimationSpec> = AnimationId::ALL
            .iter()
            .map(|id| (id.name(), *self.spec(*id)))
            .collect();
        serde_json::to_string_pretty(&map)
            .map_err(|e| format!("Failed to serialize animation catalog: {}", e))
    }

    pub fn spec(&self, id: AnimationId) -> &AnimationSpec {
        &self.specs[id.index()]
    }

    /// Replace the layout of one animation.
    pub fn set_spec(&mut self, id: AnimationId, spec: AnimationSpec) -> Result<(), String> {
        if spec.frame_count == 0 {
            return Err(format!("Animation '{}' has frameCount 0", id));
        }
        self.specs[id.index()] = spec;
        Ok(())
    }

    /// Absolute column of `id` at `now` for an animation started at `start`.
    pub fn current_frame(&self, id: AnimationId, start: Millis, now: Millis) -> u32 {
        self.spec(id).frame_at(now.saturating_sub(start))
    }

    pub fn is_complete(&self, id: AnimationId, start: Millis, now: Millis) -> bool {
        self.spec(id).is_complete_at(now.saturating_sub(start))
    }

    /// Pixel offset of `frame` (an absolute column from [`Self::current_frame`])
    /// on the row of `id`.
    pub fn sprite_pixel_offset(&self, id: AnimationId, frame: u32) -> (u32, u32) {
        (
            frame.saturating_mul(FRAME_SIZE),
            self.spec(id).row.saturating_mul(FRAME_SIZE),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_exhaustive_and_valid() {
        let store = AnimationStore::builtin();
        for id in AnimationId::ALL {
            let spec = store.spec(id);
            assert!(spec.frame_count >= 1, "{} has no frames", id);
        }
    }

    #[test]
    fn test_static_animation_frame_is_constant() {
        let store = AnimationStore::builtin();
        for t in [0, 1, 599, 10_000] {
            assert_eq!(store.current_frame(AnimationId::Idle, 0, t), 0);
            assert_eq!(store.current_frame(AnimationId::DownParry, 0, t), 2);
            assert_eq!(store.current_frame(AnimationId::DownAttack, 0, t), 1);
        }
    }

    #[test]
    fn test_walk_cycles_and_wraps() {
        let store = AnimationStore::builtin();
        let frames: Vec<u32> = [0, 149, 150, 299, 300, 450, 599, 600, 750]
            .iter()
            .map(|t| store.current_frame(AnimationId::Walk, 0, *t))
            .collect();
        assert_eq!(frames, vec![0, 0, 1, 1, 2, 3, 3, 0, 1]);
    }

    #[test]
    fn test_walk_visits_every_frame_in_any_window() {
        let store = AnimationStore::builtin();
        let spec = *store.spec(AnimationId::Walk);
        for start in [0u64, 37, 149, 512] {
            let mut seen = [false; 4];
            for t in start..start + spec.duration_ms {
                seen[store.current_frame(AnimationId::Walk, 0, t) as usize] = true;
            }
            assert!(seen.iter().all(|s| *s), "window at {} missed a frame", start);
        }
    }

    #[test]
    fn test_attack_frames() {
        let store = AnimationStore::builtin();
        assert_eq!(store.current_frame(AnimationId::Attack, 1000, 1000), 0);
        assert_eq!(store.current_frame(AnimationId::Attack, 1000, 1149), 0);
        assert_eq!(store.current_frame(AnimationId::Attack, 1000, 1150), 1);
        assert_eq!(store.current_frame(AnimationId::Attack, 1000, 1299), 1);
    }

    #[test]
    fn test_one_shot_completion_boundary() {
        let store = AnimationStore::builtin();
        for id in [
            AnimationId::Attack,
            AnimationId::Jump,
            AnimationId::Thrust,
            AnimationId::DownAttack,
        ] {
            let d = store.spec(id).duration_ms;
            assert!(!store.is_complete(id, 100, 100));
            assert!(!store.is_complete(id, 100, 100 + d - 1));
            assert!(store.is_complete(id, 100, 100 + d));
        }
    }

    #[test]
    fn test_zero_duration_never_completes() {
        let store = AnimationStore::builtin();
        assert!(!store.is_complete(AnimationId::Idle, 0, u64::MAX));
        assert!(!store.is_complete(AnimationId::Death, 0, 1_000_000));
        assert!(!store.is_complete(AnimationId::Crouch, 0, 1_000_000));
    }

    #[test]
    fn test_time_going_backwards_is_clamped() {
        let store = AnimationStore::builtin();
        assert_eq!(store.current_frame(AnimationId::Walk, 500, 100), 0);
        assert!(!store.is_complete(AnimationId::Attack, 500, 100));
    }

    #[test]
    fn test_sprite_pixel_offset() {
        let store = AnimationStore::builtin();
        assert_eq!(store.sprite_pixel_offset(AnimationId::Idle, 0), (0, 0));
        assert_eq!(store.sprite_pixel_offset(AnimationId::Walk, 3), (96, 0));
        assert_eq!(store.sprite_pixel_offset(AnimationId::UpParry, 1), (32, 32));
        assert_eq!(store.sprite_pixel_offset(AnimationId::Jump, 0), (0, 160));
    }

    #[test]
    fn test_extreme_catalog_values_do_not_overflow() {
        let mut store = AnimationStore::builtin();
        store
            .set_spec(
                AnimationId::Walk,
                AnimationSpec::new(u32::MAX, u32::MAX, u32::MAX, Millis::MAX),
            )
            .unwrap();
        let frame = store.current_frame(AnimationId::Walk, 0, Millis::MAX - 1);
        assert_eq!(frame, u32::MAX);
        assert_eq!(
            store.sprite_pixel_offset(AnimationId::Walk, frame),
            (u32::MAX, u32::MAX)
        );

        let spec = AnimationSpec::new(0, u32::MAX, 0, Millis::MAX);
        assert_eq!(spec.frame_at(Millis::MAX / 2), u32::MAX / 2);
    }

    #[test]
    fn test_jump_height_curve() {
        assert!(jump_height(0, 500).abs() < 1e-4);
        assert!((jump_height(250, 500) - MAX_JUMP_HEIGHT).abs() < 1e-3);
        assert!(jump_height(500, 500).abs() < 1e-4);
        assert!(jump_height(900, 500).abs() < 1e-4);
        assert!(jump_height(125, 500) > 0.0);
        assert_eq!(jump_height(10, 0), 0.0);
    }

    #[test]
    fn test_json_round_trip() {
        let store = AnimationStore::builtin();
        let text = store.to_json().unwrap();
        assert_eq!(AnimationStore::from_json(&text).unwrap(), store);
    }

    #[test]
    fn test_json_missing_id_is_rejected() {
        let text = r#"{ "idle": { "row": 0, "frameCount": 1, "startFrame": 0, "durationMs": 0 } }"#;
        let err = AnimationStore::from_json(text).unwrap_err();
        assert!(err.contains("missing"));
        assert!(err.contains("walk"));
    }

    #[test]
    fn test_json_unknown_id_is_rejected() {
        let mut map: serde_json::Value =
            serde_json::from_str(&AnimationStore::builtin().to_json().unwrap()).unwrap();
        map["fly"] = serde_json::json!({ "row": 9, "frameCount": 1, "startFrame": 0, "durationMs": 0 });
        let err = AnimationStore::from_json(&map.to_string()).unwrap_err();
        assert!(err.contains("fly"));
    }

    #[test]
    fn test_json_zero_frames_is_rejected() {
        let mut map: serde_json::Value =
            serde_json::from_str(&AnimationStore::builtin().to_json().unwrap()).unwrap();
        map["walk"]["frameCount"] = serde_json::json!(0);
        assert!(AnimationStore::from_json(&map.to_string()).is_err());
    }
}
