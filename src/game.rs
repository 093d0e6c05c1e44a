//! Character world setup and the per-frame boundary.
//!
//! [`Game`] owns the ECS [`World`] and the update [`Schedule`]. Outer layers
//! (the raylib window, the headless demo, tests) only talk to it through
//! queued [`InputMessage`]s, [`Game::tick`] and [`Game::render`].
//!
//! # Tick order
//!
//! 1. [`update_world_time`] advances the clock
//! 2. [`translate_input`] drains the intent queue
//! 3. [`movement`] moves the character
//! 4. [`animation`] advances the state machine and sprite frame
//! 5. [`render_snapshot`] publishes the [`RenderSnapshot`]

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::components::animation::{AnimationId, AnimationState};
use crate::components::inputcontrolled::InputControlled;
use crate::components::movementstate::MovementState;
use crate::components::sprite::Sprite;
use crate::events::animation::log_animation_change;
use crate::events::input::InputMessage;
use crate::resources::animationpolicy::AnimationPolicy;
use crate::resources::animationstore::AnimationStore;
use crate::resources::cooldown::ActionCooldown;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::intentqueue::{IntentQueue, IntentSender};
use crate::resources::playfield::Playfield;
use crate::resources::rendersnapshot::RenderSnapshot;
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::animation;
use crate::systems::input::translate_input;
use crate::systems::movement::movement;
use crate::systems::render::render_snapshot;
use crate::systems::time::update_world_time;

pub struct Game {
    world: World,
    schedule: Schedule,
    character: Entity,
}

impl Game {
    /// Build the world from `config`.
    ///
    /// The sprite-sheet catalog comes from `config.catalog_path` when set; a
    /// catalog that fails to load is replaced by the built-in one.
    pub fn new(config: GameConfig) -> Result<Self, String> {
        let store = match &config.catalog_path {
            Some(path) => AnimationStore::load_from_file(path).unwrap_or_else(|e| {
                warn!("Using built-in animation catalog: {}", e);
                AnimationStore::builtin()
            }),
            None => AnimationStore::builtin(),
        };
        Self::with_store(config, store)
    }

    /// Build the world with an explicit catalog.
    pub fn with_store(config: GameConfig, store: AnimationStore) -> Result<Self, String> {
        let mut world = World::new();
        let playfield = Playfield::from_config(&config);
        let policy = AnimationPolicy::default().with_restartable(&config.restartable);
        let cooldown = ActionCooldown::new(config.cooldowns.clone(), config.cooldown_default);

        let anim = AnimationState::new(0);
        let moving = MovementState::new(playfield.center());
        let snapshot = RenderSnapshot::capture(&anim, &moving, &store, 0);

        world.insert_resource(WorldTime::default().with_time_scale(1.0));
        world.insert_resource(store);
        world.insert_resource(policy);
        world.insert_resource(cooldown);
        world.insert_resource(InputState::default());
        world.insert_resource(IntentQueue::default());
        world.insert_resource(playfield);
        world.insert_resource(snapshot);

        let character = world
            .spawn((
                anim,
                moving,
                InputControlled::new(config.speed),
                Sprite::default(),
            ))
            .id();
        world.insert_resource(config);

        world.spawn(Observer::new(log_animation_change));
        world.flush();

        let mut schedule = Schedule::default();
        schedule.add_systems(translate_input);
        schedule.add_systems(movement.after(translate_input));
        schedule.add_systems(animation.after(movement));
        schedule.add_systems(render_snapshot.after(animation));
        schedule
            .initialize(&mut world)
            .map_err(|e| format!("Failed to initialize schedule: {}", e))?;

        info!(
            "Character spawned at x={} (bounds {}..{})",
            playfield.center(),
            playfield.bounds.min,
            playfield.bounds.max
        );

        Ok(Self {
            world,
            schedule,
            character,
        })
    }

    /// Queue an explicit animation request for the next tick.
    pub fn request_animation(&self, id: AnimationId) -> bool {
        self.send(InputMessage::Request(id))
    }

    /// Queue the level-triggered directional intent for the next tick.
    pub fn set_directional_intent(&self, left: bool, right: bool) -> bool {
        self.send(InputMessage::Directional { left, right })
    }

    pub fn send(&self, msg: InputMessage) -> bool {
        self.world.resource::<IntentQueue>().sender().send(msg)
    }

    /// Cloneable handle for feeding input from other threads.
    pub fn intent_sender(&self) -> IntentSender {
        self.world.resource::<IntentQueue>().sender()
    }

    /// Advance the session by `dt` seconds and run one update.
    pub fn tick(&mut self, dt: f32) {
        update_world_time(&mut self.world, dt);
        self.schedule.run(&mut self.world);
        self.world.clear_trackers();
    }

    pub fn render(&self) -> RenderSnapshot {
        *self.world.resource::<RenderSnapshot>()
    }

    pub fn now_ms(&self) -> u64 {
        self.world.resource::<WorldTime>().now_ms()
    }

    pub fn character(&self) -> Entity {
        self.character
    }

    pub fn animation_state(&self) -> Option<&AnimationState> {
        self.world.get::<AnimationState>(self.character)
    }

    pub fn movement_state(&self) -> Option<&MovementState> {
        self.world.get::<MovementState>(self.character)
    }

    pub fn sprite(&self) -> Option<&Sprite> {
        self.world.get::<Sprite>(self.character)
    }

    pub fn config(&self) -> &GameConfig {
        self.world.resource::<GameConfig>()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
