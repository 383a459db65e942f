//! Motion body: an entity's position, velocity and box collider, moved by
//! discrete per-axis raycasting against static geometry
//!
//! Each tick the X axis is resolved and applied first, then the Y axis is
//! cast from the updated position. Per axis, three parallel rays leave the
//! leading edge of the box: one through the center line and two offset by
//! [`SIDE_RAY_FRACTION`] of the box size on the perpendicular axis. The
//! applied displacement is clamped to the nearest non-zero hit.

use super::collision_layers::LayerMask;
use super::geometry::{Axis, CollisionQuery};
use crate::config::BodyConfig;
use crate::foundation::math::{utils, Vec2};

/// Perpendicular offset of the side rays, as a fraction of the full box size
pub const SIDE_RAY_FRACTION: f32 = 0.45;

/// Displacements at or below this magnitude are dropped (anti-jitter)
pub const MIN_DISPLACEMENT: f32 = 0.02;

/// Downward probe length used to refresh `grounded` while vertical velocity is zero
pub const GROUND_PROBE_DISTANCE: f32 = 0.05;

/// Outcome of a single [`MotionBody::move_and_collide`] call
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveReport {
    /// Displacement actually applied to the position
    pub displacement: Vec2,
    /// A horizontal ray hit something
    pub hit_x: bool,
    /// A vertical ray (including the ground probe) hit something
    pub hit_y: bool,
}

/// Box-collider body resolved against [`CollisionQuery`] geometry
#[derive(Debug, Clone, PartialEq)]
pub struct MotionBody {
    position: Vec2,
    velocity: Vec2,
    direction: Vec2,

    half_extents: Vec2,
    offset: Vec2,
    collides_with: LayerMask,

    grounded: bool,
    enabled: bool,
    terminal_velocity: Option<f32>,

    /// Skip [`MotionBody::fixed_update`]; the owner calls `move_and_collide` itself
    pub externally_driven: bool,
    /// Probe for ground even when vertical velocity is zero
    pub probe_grounded: bool,
    /// Zero the velocity component on an axis whose rays hit
    pub zero_velocity_on_collision: bool,
}

impl MotionBody {
    /// Create a body at `position` with the given collider half-extents
    pub fn new(position: Vec2, half_extents: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::zeros(),
            direction: Vec2::new(0.0, -1.0),
            half_extents,
            offset: Vec2::zeros(),
            collides_with: LayerMask::ENVIRONMENT,
            grounded: false,
            enabled: true,
            terminal_velocity: None,
            externally_driven: false,
            probe_grounded: false,
            zero_velocity_on_collision: false,
        }
    }

    /// Create a body from configuration
    pub fn from_config(position: Vec2, config: &BodyConfig) -> Self {
        Self {
            offset: config.offset,
            collides_with: config.collides_with,
            externally_driven: config.externally_driven,
            probe_grounded: config.probe_grounded,
            zero_velocity_on_collision: config.zero_velocity_on_collision,
            ..Self::new(position, config.half_extents)
        }
    }

    /// Set the layers the body's rays collide with
    pub fn with_collision_mask(mut self, mask: LayerMask) -> Self {
        self.collides_with = mask;
        self
    }

    /// Set the collider center offset
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    // ---- position ----

    /// Body position
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Teleport the body
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// World-space collider center
    pub fn center(&self) -> Vec2 {
        self.position + self.offset
    }

    /// Collider half-extents
    pub fn half_extents(&self) -> Vec2 {
        self.half_extents
    }

    /// Collision filter
    pub fn collision_mask(&self) -> LayerMask {
        self.collides_with
    }

    // ---- velocity ----

    /// Current velocity
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Replace the velocity
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Replace the horizontal velocity
    pub fn set_velocity_x(&mut self, x: f32) {
        self.velocity.x = x;
    }

    /// Replace the vertical velocity
    pub fn set_velocity_y(&mut self, y: f32) {
        self.velocity.y = y;
    }

    /// Add to the velocity
    pub fn add_velocity(&mut self, delta: Vec2) {
        self.velocity += delta;
    }

    /// Add to the horizontal velocity
    pub fn add_velocity_x(&mut self, delta_x: f32) {
        self.velocity.x += delta_x;
    }

    /// Add to the vertical velocity
    pub fn add_velocity_y(&mut self, delta_y: f32) {
        self.velocity.y += delta_y;
    }

    /// Maximum falling speed enforced at the start of every move
    pub fn terminal_velocity(&self) -> Option<f32> {
        self.terminal_velocity
    }

    /// Set (or clear) the maximum falling speed magnitude
    pub fn set_terminal_velocity(&mut self, terminal_velocity: Option<f32>) {
        self.terminal_velocity = terminal_velocity.map(f32::abs);
    }

    // ---- direction ----

    /// Explicitly set facing direction
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// Set the facing direction
    pub fn set_direction(&mut self, direction: Vec2) {
        self.direction = direction;
    }

    /// Set the horizontal facing component
    pub fn set_direction_x(&mut self, x: f32) {
        self.direction.x = x;
    }

    /// Set the vertical facing component
    pub fn set_direction_y(&mut self, y: f32) {
        self.direction.y = y;
    }

    /// Normalized velocity, or the facing direction when velocity is exactly zero
    pub fn true_direction(&self) -> Vec2 {
        if self.velocity.magnitude() != 0.0 {
            self.velocity.normalize()
        } else {
            self.direction
        }
    }

    // ---- state ----

    /// Whether the last vertical resolution hit something while moving down
    pub fn grounded(&self) -> bool {
        self.grounded
    }

    /// Whether the body moves at all
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable movement
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    // ---- simulation ----

    /// Self-driven tick; a no-op when an owner drives the body
    pub fn fixed_update(&mut self, world: &dyn CollisionQuery, delta_time: f32) -> MoveReport {
        if self.externally_driven {
            return MoveReport::default();
        }
        self.move_and_collide(world, delta_time)
    }

    /// Resolve this tick's velocity against `world` and move
    pub fn move_and_collide(&mut self, world: &dyn CollisionQuery, delta_time: f32) -> MoveReport {
        let mut report = MoveReport::default();
        if !self.enabled {
            return report;
        }

        self.clamp_to_terminal_velocity();

        if self.velocity.x != 0.0 {
            let (dx, hit) = self.resolve_axis(world, Axis::X, self.velocity.x * delta_time);
            report.hit_x = hit;
            if dx.abs() > MIN_DISPLACEMENT {
                self.position.x += dx;
                report.displacement.x = dx;
            }
        }

        if self.velocity.y != 0.0 {
            let (dy, hit) = self.resolve_axis(world, Axis::Y, self.velocity.y * delta_time);
            report.hit_y = hit;
            if dy.abs() > MIN_DISPLACEMENT {
                self.position.y += dy;
                report.displacement.y = dy;
            }
        } else if self.probe_grounded {
            let (_, hit) = self.resolve_axis(world, Axis::Y, -GROUND_PROBE_DISTANCE);
            report.hit_y = hit;
        }

        report
    }

    fn clamp_to_terminal_velocity(&mut self) {
        if let Some(limit) = self.terminal_velocity {
            if self.velocity.y < -limit {
                self.velocity.y = -limit;
            }
        }
    }

    /// Cast one axis and return the displacement to apply plus whether anything hit
    fn resolve_axis(&mut self, world: &dyn CollisionQuery, axis: Axis, delta: f32) -> (f32, bool) {
        let nearest = self.cast_axis(world, axis, delta);

        if axis == Axis::Y {
            self.grounded = nearest.is_some() && delta < 0.0;
        }

        match nearest {
            Some(distance) => {
                if self.zero_velocity_on_collision {
                    match axis {
                        Axis::X => self.velocity.x = 0.0,
                        Axis::Y => self.velocity.y = 0.0,
                    }
                }
                (utils::sign(delta) * distance, true)
            }
            None => (delta, false),
        }
    }

    /// Three parallel rays from the leading edge; `Some(min non-zero hit)` if any hit
    fn cast_axis(&self, world: &dyn CollisionQuery, axis: Axis, delta: f32) -> Option<f32> {
        let along = axis.unit();
        let across = axis.perpendicular().unit();
        let sign = utils::sign(delta);
        let size = self.half_extents * 2.0;

        let edge = self.center() + along * (sign * 0.5 * axis.of(size));
        let spread = axis.perpendicular().of(size) * SIDE_RAY_FRACTION;
        let direction = along * sign;
        let length = delta.abs();

        let hits = [0.0, spread, -spread]
            .map(|offset| world.raycast(edge + across * offset, direction, length, self.collides_with));

        if hits.iter().all(Option::is_none) {
            return None;
        }

        log::trace!("{:?} rays from {:?}: {:?}", axis, edge, hits);
        Some(min_excluding_zero(&hits))
    }
}

/// Smallest non-zero hit distance, or `0.0` when every hit is already touching
///
/// Touching hits are skipped so a ray grazing a corner cannot pin the body
/// in place while the other rays report free space.
fn min_excluding_zero(hits: &[Option<f32>]) -> f32 {
    hits.iter()
        .flatten()
        .copied()
        .filter(|distance| *distance != 0.0)
        .min_by(f32::total_cmp)
        .unwrap_or(0.0)
}
