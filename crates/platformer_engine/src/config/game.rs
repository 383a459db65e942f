//! # Game Configuration
//!
//! Tunables for the character controller, the motion body, the room camera
//! and the fixed-step driver, plus the level data (rooms, colliders, spawn).
//!
//! Every section has defaults, so a file only needs to name what it
//! overrides. [`GameConfig::validate`] runs at load time; values that would
//! put NaN or a stalled loop into the simulation are rejected there rather
//! than discovered mid-frame.

use serde::{Serialize, Deserialize};

use super::{Config, ConfigError};
use crate::camera::{FollowPolicy, Room};
use crate::foundation::math::Vec2;
use crate::physics::LayerMask;

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}

fn require_positive(name: &str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be positive, got {value}")))
    }
}

fn require_positive_vec(name: &str, value: Vec2) -> Result<(), ConfigError> {
    require_positive(&format!("{name}.x"), value.x)?;
    require_positive(&format!("{name}.y"), value.y)
}

/// # Simulation Configuration
///
/// Fixed-step driver settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Length of one physics tick in seconds
    pub fixed_timestep: f32,
    /// Upper bound on ticks run inside a single frame
    pub max_ticks_per_frame: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fixed_timestep: 0.02,
            max_ticks_per_frame: 5,
        }
    }
}

impl SimulationConfig {
    /// Set the fixed timestep
    pub fn with_fixed_timestep(mut self, step: f32) -> Self {
        self.fixed_timestep = step;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("simulation.fixed_timestep", self.fixed_timestep)?;
        if self.max_ticks_per_frame == 0 {
            return Err(invalid("simulation.max_ticks_per_frame must be at least 1"));
        }
        Ok(())
    }
}

/// # Movement Configuration
///
/// Per-entity character tunables. Velocities are in units per second,
/// gravity and acceleration are applied once per tick, frame windows are
/// counted in ticks (hold, coyote) or frames (leeway).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Gravity subtracted from vertical velocity each airborne tick
    pub gravity: f32,
    /// Reduced gravity used while jump is held after a jump
    pub jump_gravity: f32,
    /// Vertical velocity set when a jump fires
    pub jump_power: f32,
    /// Ticks of reduced gravity while jump stays held
    pub jump_hold_frames: u32,
    /// Ticks after leaving ground during which a jump still fires
    pub coyote_time_frames: u32,
    /// Frames a jump press stays buffered
    pub jump_leeway_frames: u32,
    /// Maximum falling speed (magnitude)
    pub terminal_velocity: f32,
    /// Added to horizontal velocity per tick at full input
    pub horizontal_acceleration: f32,
    /// Multiplied into horizontal velocity each tick
    pub horizontal_deceleration_factor: f32,
    /// Dash speed
    pub dash_speed: f32,
    /// Dash duration in seconds
    pub dash_time: f32,
    /// Fraction of velocity retained when a dash ends
    pub post_dash_decel: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            gravity: 1.0,
            jump_gravity: 0.6,
            jump_power: 15.0,
            jump_hold_frames: 12,
            coyote_time_frames: 15,
            jump_leeway_frames: 4,
            terminal_velocity: 15.0,
            horizontal_acceleration: 1.2,
            horizontal_deceleration_factor: 0.85,
            dash_speed: 15.0,
            dash_time: 0.2,
            post_dash_decel: 0.3,
        }
    }
}

impl MovementConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("movement.terminal_velocity", self.terminal_velocity)?;
        require_positive("movement.dash_time", self.dash_time)?;

        if !(0.0..1.0).contains(&self.horizontal_deceleration_factor) {
            return Err(invalid(format!(
                "movement.horizontal_deceleration_factor must be in [0, 1), got {}",
                self.horizontal_deceleration_factor
            )));
        }
        if self.dash_speed < 0.0 || !self.dash_speed.is_finite() {
            return Err(invalid("movement.dash_speed must be a non-negative number"));
        }
        if !(0.0..=1.0).contains(&self.post_dash_decel) {
            return Err(invalid("movement.post_dash_decel must be in [0, 1]"));
        }
        if self.jump_leeway_frames == 0 || self.coyote_time_frames == 0 || self.jump_hold_frames == 0 {
            return Err(invalid("movement frame windows must be at least one frame long"));
        }
        for (name, value) in [
            ("movement.gravity", self.gravity),
            ("movement.jump_gravity", self.jump_gravity),
            ("movement.jump_power", self.jump_power),
            ("movement.horizontal_acceleration", self.horizontal_acceleration),
        ] {
            if !value.is_finite() {
                return Err(invalid(format!("{name} must be finite")));
            }
        }
        Ok(())
    }
}

/// # Motion Body Configuration
///
/// Collider shape and behavior flags for the player's motion body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    /// Half-size of the box collider
    pub half_extents: Vec2,
    /// Collider center relative to the body position
    pub offset: Vec2,
    /// Layers the body's rays collide with
    pub collides_with: LayerMask,
    /// Skip the body's own per-tick move (a controller drives it)
    pub externally_driven: bool,
    /// Probe downward for ground when vertical velocity is zero
    pub probe_grounded: bool,
    /// Zero the velocity component on the axis that hit something
    pub zero_velocity_on_collision: bool,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            half_extents: Vec2::new(0.5, 0.5),
            offset: Vec2::zeros(),
            collides_with: LayerMask::ENVIRONMENT,
            externally_driven: false,
            probe_grounded: false,
            zero_velocity_on_collision: false,
        }
    }
}

impl BodyConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive_vec("body.half_extents", self.half_extents)
    }
}

/// # Camera Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Half of the camera's visible width and height
    pub half_dimensions: Vec2,
    /// Transition speed multiplier on the remaining distance
    pub smooth_movement_speed: f32,
    /// Minimum transition step; also the snap distance
    pub smooth_min_speed: f32,
    /// Keep the last room when the target leaves every room
    pub dont_follow_target_off_screen: bool,
    /// How the camera tracks its target inside a room
    pub follow: FollowPolicy,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            half_dimensions: Vec2::new(13.5, 7.5),
            smooth_movement_speed: 8.0,
            smooth_min_speed: 0.02,
            dont_follow_target_off_screen: false,
            follow: FollowPolicy::default(),
        }
    }
}

impl CameraConfig {
    /// Select the following policy
    pub fn with_follow(mut self, follow: FollowPolicy) -> Self {
        self.follow = follow;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive_vec("camera.half_dimensions", self.half_dimensions)?;
        require_positive("camera.smooth_movement_speed", self.smooth_movement_speed)?;
        require_positive("camera.smooth_min_speed", self.smooth_min_speed)?;
        self.follow.validate()
    }
}

/// A static axis-aligned collider in the level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColliderConfig {
    /// World-space center
    pub center: Vec2,
    /// Half-size
    pub half_extents: Vec2,
    /// Layer the collider belongs to
    #[serde(default = "default_collider_layer")]
    pub layer: LayerMask,
}

fn default_collider_layer() -> LayerMask {
    LayerMask::ENVIRONMENT
}

/// Where the player and camera start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Player start position
    pub position: Vec2,
    /// Camera start position (defaults to the player position)
    pub camera_position: Option<Vec2>,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            camera_position: None,
        }
    }
}

/// # Complete Game Configuration
///
/// Top-level configuration; this is what level files deserialize into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed-step driver
    pub simulation: SimulationConfig,
    /// Character tunables
    pub movement: MovementConfig,
    /// Player motion body; a player without one cannot be spawned
    pub body: Option<BodyConfig>,
    /// Room camera
    pub camera: CameraConfig,
    /// Ordered room list
    pub rooms: Vec<Room>,
    /// Static level geometry
    pub colliders: Vec<ColliderConfig>,
    /// Start positions
    pub spawn: SpawnConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            movement: MovementConfig::default(),
            body: Some(BodyConfig::default()),
            camera: CameraConfig::default(),
            rooms: Vec::new(),
            colliders: Vec::new(),
            spawn: SpawnConfig::default(),
        }
    }
}

impl GameConfig {
    /// Load and validate a configuration file
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let config = Self::load_from_file(path)?;
        config.validate()?;
        log::info!(
            "Loaded {}: {} rooms, {} colliders",
            path,
            config.rooms.len(),
            config.colliders.len()
        );
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.simulation.validate()?;
        self.movement.validate()?;
        if let Some(body) = &self.body {
            body.validate()?;
        }
        self.camera.validate()?;

        for (index, room) in self.rooms.iter().enumerate() {
            require_positive_vec(&format!("rooms[{index}].half_size"), room.half_size)?;
        }
        for (index, collider) in self.colliders.iter().enumerate() {
            require_positive_vec(&format!("colliders[{index}].half_extents"), collider.half_extents)?;
        }
        Ok(())
    }
}

impl Config for GameConfig {}
