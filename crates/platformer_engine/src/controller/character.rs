//! Character controller state machine
//!
//! Modes are an explicit tagged variant; each trigger (dash press, dash timer
//! expiry) has its own transition function. The frozen flag is orthogonal to
//! the mode: while it is set neither cadence touches any state.

use crate::config::{ConfigError, MovementConfig};
use crate::effects::{Clip, EffectSink, Emitter};
use crate::foundation::math::{utils, Vec2};
use crate::input::{Action, InputSource};
use crate::physics::{CollisionQuery, MotionBody, MoveReport};

use super::counters::FrameCounter;
use super::freeze::FreezeSwitch;

/// Horizontal speeds below this snap to zero after deceleration
pub const HORIZONTAL_STOP_EPSILON: f32 = 0.08;

/// Controller errors
#[derive(thiserror::Error, Debug)]
pub enum ControllerError {
    /// The entity has no motion body to drive
    #[error("character spawned without a motion body")]
    MissingMotionBody,

    /// Movement tunables failed validation
    #[error("invalid movement configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Locomotion mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    /// Running and jumping under gravity
    Platforming,
    /// Fixed-velocity dash
    Dashing {
        /// Seconds left in the dash
        remaining: f32,
    },
}

/// Everything a frozen controller must leave untouched
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerSnapshot {
    /// Body position
    pub position: Vec2,
    /// Body velocity
    pub velocity: Vec2,
    /// Body grounded flag
    pub grounded: bool,
    /// Locomotion mode
    pub mode: Mode,
    /// Last sampled horizontal input
    pub horizontal_input: f32,
    /// Jump buffer counter
    pub jump_leeway: FrameCounter,
    /// Reduced-gravity hold counter
    pub jump_hold: FrameCounter,
    /// Coyote time counter
    pub coyote: FrameCounter,
}

/// Platformer character controller driving one motion body
#[derive(Debug)]
pub struct CharacterController {
    config: MovementConfig,
    body: MotionBody,
    mode: Mode,
    freeze: FreezeSwitch,

    horizontal_input: f32,
    jump_leeway: FrameCounter,
    jump_hold: FrameCounter,
    coyote: FrameCounter,
    was_grounded: bool,
}

impl CharacterController {
    /// Spawn a controller around `body`
    ///
    /// Fails if the entity has no motion body or the tunables are invalid.
    /// The body is switched to controller-driven mode with ground probing,
    /// velocity zeroing on collision and the configured terminal velocity.
    pub fn new(config: MovementConfig, body: Option<MotionBody>) -> Result<Self, ControllerError> {
        config.validate()?;
        let mut body = body.ok_or(ControllerError::MissingMotionBody)?;

        body.externally_driven = true;
        body.probe_grounded = true;
        body.zero_velocity_on_collision = true;
        body.set_terminal_velocity(Some(config.terminal_velocity));
        body.set_direction(Vec2::new(1.0, 0.0));

        log::info!("Character spawned at {:?}", body.position());

        Ok(Self {
            jump_leeway: FrameCounter::exhausted(config.jump_leeway_frames),
            jump_hold: FrameCounter::exhausted(config.jump_hold_frames),
            coyote: FrameCounter::exhausted(config.coyote_time_frames),
            config,
            body,
            mode: Mode::Platforming,
            freeze: FreezeSwitch::new(),
            horizontal_input: 0.0,
            was_grounded: false,
        })
    }

    /// Movement tunables
    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    /// The driven body
    pub fn body(&self) -> &MotionBody {
        &self.body
    }

    /// Mutable access to the driven body (teleports, respawns)
    pub fn body_mut(&mut self) -> &mut MotionBody {
        &mut self.body
    }

    /// Current mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// A jump press is still buffered
    pub fn jump_buffered(&self) -> bool {
        self.jump_leeway.is_active()
    }

    /// The body touched ground within the coyote window
    pub fn recently_grounded(&self) -> bool {
        self.coyote.is_active()
    }

    /// Reduced jump gravity is in effect
    pub fn holding_jump(&self) -> bool {
        self.jump_hold.is_active()
    }

    // ---- freezing ----

    /// Whether updates are suspended
    pub fn is_frozen(&self) -> bool {
        self.freeze.is_frozen()
    }

    /// Suspend all processing
    pub fn freeze(&self) {
        self.freeze.freeze();
    }

    /// Resume processing
    pub fn unfreeze(&self) {
        self.freeze.unfreeze();
    }

    /// Shared handle to the freeze flag, for subscribing to room transitions
    pub fn freeze_switch(&self) -> FreezeSwitch {
        self.freeze.clone()
    }

    /// Capture the mutable simulation state
    pub fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            position: self.body.position(),
            velocity: self.body.velocity(),
            grounded: self.body.grounded(),
            mode: self.mode,
            horizontal_input: self.horizontal_input,
            jump_leeway: self.jump_leeway,
            jump_hold: self.jump_hold,
            coyote: self.coyote,
        }
    }

    // ---- variable-rate update ----

    /// Per-frame update: input sampling, jump buffering and dash timing
    pub fn frame(&mut self, delta_time: f32, input: &dyn InputSource, effects: &mut dyn EffectSink) {
        if self.is_frozen() {
            return;
        }

        match self.mode {
            Mode::Platforming => {
                self.horizontal_input = input.horizontal();
                if self.horizontal_input != 0.0 {
                    self.body.set_direction(Vec2::new(utils::sign(self.horizontal_input), 0.0));
                }

                if input.pressed(Action::Jump) {
                    self.jump_leeway.reset();
                } else {
                    self.jump_leeway.advance();
                }

                if input.pressed(Action::Dash) {
                    self.begin_dash(input, effects);
                }
            }
            Mode::Dashing { remaining } => {
                let remaining = remaining - delta_time;
                if remaining < 0.0 {
                    self.end_dash(effects);
                } else {
                    self.mode = Mode::Dashing { remaining };
                }
            }
        }
    }

    /// Dash-press transition: Platforming -> Dashing
    fn begin_dash(&mut self, input: &dyn InputSource, effects: &mut dyn EffectSink) {
        let requested = Vec2::new(input.horizontal(), input.vertical());
        let direction = utils::normalize_or(requested, self.body.direction());

        self.mode = Mode::Dashing { remaining: self.config.dash_time };
        self.body.set_velocity(direction * self.config.dash_speed);

        effects.play_clip(Clip::Dash);
        effects.start_emitter(Emitter::Dash);
        log::debug!("Dash toward {:?}", direction);
    }

    /// Dash-timer-expiry transition: Dashing -> Platforming
    fn end_dash(&mut self, effects: &mut dyn EffectSink) {
        self.mode = Mode::Platforming;
        self.body.set_velocity(self.body.velocity() * self.config.post_dash_decel);
        effects.stop_emitter(Emitter::Dash);
        log::debug!("Dash ended, velocity {:?}", self.body.velocity());
    }

    // ---- fixed-rate update ----

    /// Per-tick update: windows, gravity, horizontal motion, then collision
    pub fn tick(
        &mut self,
        delta_time: f32,
        input: &dyn InputSource,
        world: &dyn CollisionQuery,
        effects: &mut dyn EffectSink,
    ) -> MoveReport {
        if self.is_frozen() {
            return MoveReport::default();
        }

        if self.mode == Mode::Platforming {
            self.platforming_tick(input, effects);
        }

        self.body.move_and_collide(world, delta_time)
    }

    fn platforming_tick(&mut self, input: &dyn InputSource, effects: &mut dyn EffectSink) {
        if input.held(Action::Jump) {
            self.jump_hold.advance();
        } else {
            self.jump_hold.exhaust();
        }

        let grounded = self.body.grounded();
        if grounded {
            self.coyote.reset();
        } else {
            self.coyote.advance();
        }

        self.apply_vertical(grounded, effects);
        self.apply_horizontal();

        self.was_grounded = grounded;
    }

    fn apply_vertical(&mut self, grounded: bool, effects: &mut dyn EffectSink) {
        if grounded {
            if !self.was_grounded {
                log::trace!("Landed at {:?}", self.body.position());
                effects.play_clip(Clip::Squash);
                start_dust(effects);
            }
            self.body.set_velocity_y(0.0);
        } else if self.jump_hold.is_active() {
            self.body.add_velocity_y(-self.config.jump_gravity);
        } else {
            self.body.add_velocity_y(-self.config.gravity);
        }

        if self.jump_leeway.is_active() && self.coyote.is_active() {
            self.jump(effects);
        }

        let floor = -self.config.terminal_velocity;
        if self.body.velocity().y < floor {
            self.body.set_velocity_y(floor);
        }
    }

    fn jump(&mut self, effects: &mut dyn EffectSink) {
        self.body.set_velocity_y(self.config.jump_power);
        self.jump_hold.reset();
        self.jump_leeway.exhaust();

        effects.play_clip(Clip::Stretch);
        start_dust(effects);
        log::debug!("Jump from {:?}", self.body.position());
    }

    fn apply_horizontal(&mut self) {
        self.body.add_velocity_x(self.horizontal_input * self.config.horizontal_acceleration);

        let decayed = self.body.velocity().x * self.config.horizontal_deceleration_factor;
        if decayed.abs() < HORIZONTAL_STOP_EPSILON {
            self.body.set_velocity_x(0.0);
        } else {
            self.body.set_velocity_x(decayed);
        }
    }
}

fn start_dust(effects: &mut dyn EffectSink) {
    if !effects.is_emitting(Emitter::Dust) {
        effects.start_emitter(Emitter::Dust);
    }
}
