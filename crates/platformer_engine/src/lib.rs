//! # Platformer Engine
//!
//! Deterministic fixed-timestep core for a 2D platformer.
//!
//! ## Features
//!
//! - **Motion bodies**: box colliders moved per axis with three-ray discrete collision
//! - **Character controller**: jump buffering, coyote time, variable jump height and dashing
//! - **Room camera**: room-bounded following and smooth room-to-room transitions
//! - **Transition notifications**: synchronous observer list that freezes the player mid-transition
//! - **Configuration**: TOML or RON level and tuning files
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use platformer_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GameConfig::load("resources/config/level.toml")?;
//!     let mut simulation = Simulation::new(config)?;
//!     let mut input = InputState::new();
//!
//!     input.press(Action::Jump);
//!     simulation.frame(1.0 / 60.0, &mut input);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod foundation;
pub mod config;
pub mod physics;
pub mod input;
pub mod effects;
pub mod events;
pub mod controller;
pub mod camera;
pub mod simulation;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        camera::{CameraError, FollowPolicy, Room, RoomCamera},
        config::{Config, ConfigError, GameConfig},
        controller::{CharacterController, ControllerError, Mode},
        effects::{Clip, EffectSink, Emitter, NullEffects},
        events::{RoomEvent, RoomEventKind},
        foundation::math::Vec2,
        input::{Action, InputSource, InputState},
        physics::{LayerMask, MotionBody, StaticGeometry},
        simulation::{FrameReport, Simulation, SimulationError},
    };
}
