//! Game configuration resource.
//!
//! Manages settings loaded from an INI configuration file. Provides defaults
//! for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [game]
//! width = 800
//! height = 300
//! speed = 3
//! half_width = 16
//! character_scale = 2
//! lock_blocks_movement = true
//! catalog = ./assets/animations.json
//!
//! [window]
//! target_fps = 60
//! sprite_sheet = ./assets/samurai.png
//!
//! [cooldown]
//! attack = 500
//! jump = 600
//! default = 300
//!
//! [policy]
//! restartable = attack,jump
//! ```
//!
//! Keys are case-insensitive, so `downAttack` and `downattack` both work.

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};

use crate::components::animation::AnimationId;
use crate::resources::animationstore::Millis;
use crate::resources::cooldown::{DEFAULT_COOLDOWN_MS, default_cooldowns};

/// Default safe values for startup
const DEFAULT_GAME_WIDTH: u32 = 800;
const DEFAULT_GAME_HEIGHT: u32 = 300;
const DEFAULT_SPEED: f32 = 3.0;
const DEFAULT_HALF_WIDTH: f32 = 16.0;
const DEFAULT_CHARACTER_SCALE: f32 = 2.0;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_SPRITE_SHEET: &str = "./assets/samurai.png";
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Playfield width.
    pub game_width: u32,
    /// Playfield height.
    pub game_height: u32,
    /// Horizontal distance per tick while walking.
    pub speed: f32,
    /// Half the character's width; keeps the pivot inside the playfield.
    pub half_width: f32,
    /// Draw scale of the 32px sprite.
    pub character_scale: f32,
    /// Freeze movement while an action animation holds the lock.
    pub lock_blocks_movement: bool,
    /// Optional JSON catalog replacing the built-in sheet layout.
    pub catalog_path: Option<PathBuf>,
    /// Target frames per second of the window loop.
    pub target_fps: u32,
    /// Sprite sheet image drawn by the window.
    pub sprite_sheet: PathBuf,
    /// Per-action request cooldowns.
    pub cooldowns: FxHashMap<AnimationId, Millis>,
    /// Cooldown for actions missing from `cooldowns`.
    pub cooldown_default: Millis,
    /// Animations that restart when requested while already playing.
    pub restartable: Vec<AnimationId>,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            game_width: DEFAULT_GAME_WIDTH,
            game_height: DEFAULT_GAME_HEIGHT,
            speed: DEFAULT_SPEED,
            half_width: DEFAULT_HALF_WIDTH,
            character_scale: DEFAULT_CHARACTER_SCALE,
            lock_blocks_movement: true,
            catalog_path: None,
            target_fps: DEFAULT_TARGET_FPS,
            sprite_sheet: PathBuf::from(DEFAULT_SPRITE_SHEET),
            cooldowns: default_cooldowns(),
            cooldown_default: DEFAULT_COOLDOWN_MS,
            restartable: vec![AnimationId::Attack, AnimationId::Jump],
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config)?;
        info!(
            "Loaded config: {}x{} game, speed={}, fps={}, sheet={:?}",
            self.game_width, self.game_height, self.speed, self.target_fps, self.sprite_sheet
        );
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config)
    }

    fn apply_ini(&mut self, config: &Ini) -> Result<(), String> {
        // [game] section
        if let Some(width) = config.getuint("game", "width").ok().flatten() {
            self.game_width = width as u32;
        }
        if let Some(height) = config.getuint("game", "height").ok().flatten() {
            self.game_height = height as u32;
        }
        if let Some(speed) = config.getfloat("game", "speed").ok().flatten() {
            self.speed = speed as f32;
        }
        if let Some(half) = config.getfloat("game", "half_width").ok().flatten() {
            self.half_width = half as f32;
        }
        if let Some(scale) = config.getfloat("game", "character_scale").ok().flatten() {
            self.character_scale = scale as f32;
        }
        if let Some(lock) = config.getbool("game", "lock_blocks_movement").ok().flatten() {
            self.lock_blocks_movement = lock;
        }
        if let Some(catalog) = config.get("game", "catalog") {
            self.catalog_path = Some(PathBuf::from(catalog));
        }

        // [window] section
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(sheet) = config.get("window", "sprite_sheet") {
            self.sprite_sheet = PathBuf::from(sheet);
        }

        // [cooldown] section
        if let Some(section) = config.get_map_ref().get("cooldown") {
            for (key, value) in section {
                let Some(value) = value else {
                    continue;
                };
                let ms = value
                    .trim()
                    .parse::<Millis>()
                    .map_err(|e| format!("Invalid cooldown '{}' for {}: {}", value, key, e))?;
                if key == "default" {
                    self.cooldown_default = ms;
                } else {
                    self.cooldowns.insert(key.parse::<AnimationId>()?, ms);
                }
            }
        }

        // [policy] section
        if let Some(list) = config.get("policy", "restartable") {
            self.restartable = parse_id_list(&list)?;
        }

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        self.save_to(&self.config_path)
    }

    /// Save configuration to an arbitrary path.
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        let mut config = Ini::new();

        // [game] section
        config.set("game", "width", Some(self.game_width.to_string()));
        config.set("game", "height", Some(self.game_height.to_string()));
        config.set("game", "speed", Some(self.speed.to_string()));
        config.set("game", "half_width", Some(self.half_width.to_string()));
        config.set(
            "game",
            "character_scale",
            Some(self.character_scale.to_string()),
        );
        config.set(
            "game",
            "lock_blocks_movement",
            Some(self.lock_blocks_movement.to_string()),
        );
        if let Some(catalog) = &self.catalog_path {
            config.set("game", "catalog", Some(catalog.display().to_string()));
        }

        // [window] section
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set(
            "window",
            "sprite_sheet",
            Some(self.sprite_sheet.display().to_string()),
        );

        // [cooldown] section
        for id in AnimationId::ALL {
            if let Some(ms) = self.cooldowns.get(&id) {
                config.set("cooldown", id.name(), Some(ms.to_string()));
            }
        }
        config.set("cooldown", "default", Some(self.cooldown_default.to_string()));

        // [policy] section
        let restartable: Vec<&str> = self.restartable.iter().map(|id| id.name()).collect();
        config.set("policy", "restartable", Some(restartable.join(",")));

        config
            .write(path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", path);

        Ok(())
    }
}

/// Parse `attack, jump` into ids. An empty list is allowed.
fn parse_id_list(list: &str) -> Result<Vec<AnimationId>, String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<AnimationId>)
        .collect()
}
