//! Platformer character controller
//!
//! Drives a [`MotionBody`](crate::physics::MotionBody) on two cadences:
//! [`CharacterController::frame`] once per rendered frame (input sampling,
//! jump buffering, dash timing) and [`CharacterController::tick`] once per
//! fixed step (hold and coyote windows, gravity, horizontal motion, collision).

pub mod character;
pub mod counters;
pub mod freeze;

pub use character::{CharacterController, ControllerError, ControllerSnapshot, Mode};
pub use counters::FrameCounter;
pub use freeze::FreezeSwitch;
