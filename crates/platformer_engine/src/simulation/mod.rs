//! Frame and tick driver
//!
//! Owns one level: static geometry, the player's character controller and
//! the room camera. Every frame runs, in order:
//!
//! 1. room camera update, including synchronous transition notifications
//!    (the player's freeze switch is subscribed, so a transition that starts
//!    or ends this frame has already frozen or unfrozen the player);
//! 2. character per-frame update;
//! 3. as many fixed ticks as the accumulator allows;
//! 4. input edge clearing.

use crate::camera::{CameraError, RoomCamera};
use crate::config::{ConfigError, GameConfig};
use crate::controller::{CharacterController, ControllerError};
use crate::effects::{EffectSink, NullEffects};
use crate::foundation::time::FixedTimestep;
use crate::input::InputState;
use crate::physics::{Aabb, MotionBody, StaticGeometry};

/// Errors raised while building a simulation
#[derive(thiserror::Error, Debug)]
pub enum SimulationError {
    /// Configuration failed to load or validate
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The player could not be spawned
    #[error("controller error: {0}")]
    Controller(#[from] ControllerError),

    /// The room camera could not be created
    #[error("camera error: {0}")]
    Camera(#[from] CameraError),
}

/// What one call to [`Simulation::frame`] did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Fixed ticks run this frame
    pub ticks: u32,
    /// Player was frozen when its update ran
    pub frozen: bool,
    /// Camera was mid-transition after its update
    pub transitioning: bool,
}

/// A running level
pub struct Simulation {
    config: GameConfig,
    world: StaticGeometry,
    character: CharacterController,
    camera: RoomCamera,
    timestep: FixedTimestep,
    effects: Box<dyn EffectSink>,
    frame_count: u64,
}

impl Simulation {
    /// Build a level with effects discarded
    pub fn new(config: GameConfig) -> Result<Self, SimulationError> {
        Self::with_effects(config, Box::new(NullEffects))
    }

    /// Build a level that reports visual effects to `effects`
    pub fn with_effects(config: GameConfig, effects: Box<dyn EffectSink>) -> Result<Self, SimulationError> {
        config.validate()?;

        let mut world = StaticGeometry::new();
        for collider in &config.colliders {
            world.insert(Aabb::new(collider.center, collider.half_extents), collider.layer);
        }

        let spawn = config.spawn.position;
        let body = config.body.as_ref().map(|body| MotionBody::from_config(spawn, body));
        let character = CharacterController::new(config.movement.clone(), body)?;

        let camera_start = config.spawn.camera_position.unwrap_or(spawn);
        let mut camera = RoomCamera::new(config.camera.clone(), config.rooms.clone(), camera_start, spawn)?;
        camera.subscribe_all(Box::new(character.freeze_switch()));

        let timestep = FixedTimestep::new(config.simulation.fixed_timestep, config.simulation.max_ticks_per_frame);

        log::info!(
            "Simulation ready: {} colliders, {} rooms, {}s ticks",
            world.len(),
            config.rooms.len(),
            timestep.step()
        );

        Ok(Self {
            config,
            world,
            character,
            camera,
            timestep,
            effects,
            frame_count: 0,
        })
    }

    /// Advance one rendered frame of `delta_time` seconds
    pub fn frame(&mut self, delta_time: f32, input: &mut InputState) -> FrameReport {
        self.camera.update(delta_time, self.character.body().position());

        let frozen = self.character.is_frozen();
        self.character.frame(delta_time, &*input, self.effects.as_mut());

        let ticks = self.timestep.advance(delta_time);
        let step = self.timestep.step();
        for _ in 0..ticks {
            self.character.tick(step, &*input, &self.world, self.effects.as_mut());
        }

        input.end_frame();
        self.frame_count += 1;

        FrameReport {
            ticks,
            frozen,
            transitioning: self.camera.is_transitioning(),
        }
    }

    /// Loaded configuration
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Level geometry
    pub fn world(&self) -> &StaticGeometry {
        &self.world
    }

    /// Level geometry, for colliders added at runtime
    pub fn world_mut(&mut self) -> &mut StaticGeometry {
        &mut self.world
    }

    /// The player
    pub fn character(&self) -> &CharacterController {
        &self.character
    }

    /// Mutable player access (teleports, respawns)
    pub fn character_mut(&mut self) -> &mut CharacterController {
        &mut self.character
    }

    /// The room camera
    pub fn camera(&self) -> &RoomCamera {
        &self.camera
    }

    /// Camera access for subscriptions and external offsets
    pub fn camera_mut(&mut self) -> &mut RoomCamera {
        &mut self.camera
    }

    /// Frames run so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Fixed ticks run so far
    pub fn tick_count(&self) -> u64 {
        self.timestep.tick_count()
    }
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("frame_count", &self.frame_count)
            .field("character", &self.character.snapshot())
            .field("camera", &self.camera.position())
            .finish_non_exhaustive()
    }
}
