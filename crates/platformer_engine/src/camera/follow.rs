//! Camera following policies used while no room transition is running
//!
//! Exactly one policy is active per camera. Neither clamps; the camera
//! re-applies its room bounds after every step.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::foundation::math::Vec2;

/// Move a fixed fraction of the remaining offset each frame, per axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingFollow {
    /// Fraction of the remaining offset covered per frame, per axis
    pub fraction: Vec2,
}

impl Default for SmoothingFollow {
    fn default() -> Self {
        Self {
            fraction: Vec2::new(0.013625, 0.0078125),
        }
    }
}

/// Accelerate toward the target whenever it leaves a dead zone around the camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringFollow {
    /// Half-size of the dead zone
    pub leeway: Vec2,
    /// Velocity added per frame while the target is outside the dead zone
    pub acceleration: f32,
    /// Per-frame velocity multiplier
    pub damping: f32,
}

impl Default for SpringFollow {
    fn default() -> Self {
        Self {
            leeway: Vec2::new(2.0, 2.0),
            acceleration: 2.0,
            damping: 0.9,
        }
    }
}

/// Following policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowPolicy {
    /// Exponential smoothing
    Smoothing(SmoothingFollow),
    /// Dead-zone spring with damping
    DeadZoneSpring(SpringFollow),
}

impl Default for FollowPolicy {
    fn default() -> Self {
        Self::Smoothing(SmoothingFollow::default())
    }
}

impl FollowPolicy {
    /// Dead-zone spring with default tuning
    pub fn dead_zone_spring() -> Self {
        Self::DeadZoneSpring(SpringFollow::default())
    }

    /// Reject tunings that stall or diverge
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Smoothing(smoothing) => {
                let in_range = |f: f32| f > 0.0 && f <= 1.0;
                if !in_range(smoothing.fraction.x) || !in_range(smoothing.fraction.y) {
                    return Err(ConfigError::Invalid(format!(
                        "camera.follow.smoothing.fraction must be in (0, 1], got {:?}",
                        smoothing.fraction
                    )));
                }
            }
            Self::DeadZoneSpring(spring) => {
                if !(0.0..1.0).contains(&spring.damping) {
                    return Err(ConfigError::Invalid(format!(
                        "camera.follow.dead_zone_spring.damping must be in [0, 1), got {}",
                        spring.damping
                    )));
                }
                if spring.leeway.x < 0.0 || spring.leeway.y < 0.0 || !spring.acceleration.is_finite() {
                    return Err(ConfigError::Invalid(
                        "camera.follow.dead_zone_spring needs a non-negative leeway and finite acceleration".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// One following step from `position` toward `target`, unclamped
    ///
    /// `velocity` is the spring's follow velocity; smoothing leaves it alone.
    pub fn step(&self, position: Vec2, target: Vec2, velocity: &mut Vec2, delta_time: f32) -> Vec2 {
        match self {
            Self::Smoothing(smoothing) => position + smoothing.fraction.component_mul(&(target - position)),
            Self::DeadZoneSpring(spring) => {
                for axis in 0..2 {
                    if position[axis] > target[axis] + spring.leeway[axis] {
                        velocity[axis] -= spring.acceleration;
                    } else if position[axis] < target[axis] - spring.leeway[axis] {
                        velocity[axis] += spring.acceleration;
                    }
                }
                *velocity *= spring.damping;
                position + *velocity * delta_time
            }
        }
    }
}
