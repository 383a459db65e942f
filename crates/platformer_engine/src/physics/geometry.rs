//! Static collidable geometry and the ray query the motion body runs against
//!
//! The level is a set of axis-aligned boxes. [`CollisionQuery`] is the seam:
//! anything that can answer "nearest hit along this ray" can stand in for
//! [`StaticGeometry`].

use slotmap::{SlotMap, new_key_type};

use super::collision_layers::LayerMask;
use crate::foundation::math::Vec2;

/// One of the two world axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal
    X,
    /// Vertical
    Y,
}

impl Axis {
    /// Unit vector along this axis
    pub fn unit(self) -> Vec2 {
        match self {
            Self::X => Vec2::new(1.0, 0.0),
            Self::Y => Vec2::new(0.0, 1.0),
        }
    }

    /// The other axis
    pub fn perpendicular(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }

    /// Component of `v` along this axis
    pub fn of(self, v: Vec2) -> f32 {
        match self {
            Self::X => v.x,
            Self::Y => v.y,
        }
    }
}

/// Axis-aligned bounding box stored as center + half-extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// World-space center
    pub center: Vec2,
    /// Half-size on each axis
    pub half_extents: Vec2,
}

impl Aabb {
    /// Create a new box
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self { center, half_extents }
    }

    /// Create a box from its min and max corners
    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self {
            center: (min + max) * 0.5,
            half_extents: (max - min) * 0.5,
        }
    }

    /// Lower-left corner
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    /// Upper-right corner
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    /// Inclusive point containment
    pub fn contains_point(&self, point: Vec2) -> bool {
        let min = self.min();
        let max = self.max();
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    /// Slab test; returns the entry distance along `direction` (unit length)
    ///
    /// A ray starting on the boundary and heading in, or starting inside,
    /// reports `0.0`. A ray starting on the boundary and heading out misses.
    pub fn raycast(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<f32> {
        let min = self.min();
        let max = self.max();

        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;

        for axis in [Axis::X, Axis::Y] {
            let o = axis.of(origin);
            let d = axis.of(direction);
            let lo = axis.of(min);
            let hi = axis.of(max);

            if d == 0.0 {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let t1 = (lo - o) / d;
            let t2 = (hi - o) / d;
            let (near, far) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
            t_enter = t_enter.max(near);
            t_exit = t_exit.min(far);
        }

        if t_enter > t_exit || t_exit <= 0.0 {
            return None;
        }

        let t = t_enter.max(0.0);
        (t <= max_distance).then_some(t)
    }
}

/// Collidable-geometry query
pub trait CollisionQuery {
    /// Nearest hit distance along `direction` within `max_distance`, counting
    /// only colliders on a layer in `mask`
    fn raycast(&self, origin: Vec2, direction: Vec2, max_distance: f32, mask: LayerMask) -> Option<f32>;
}

new_key_type! {
    /// Handle to a collider inside [`StaticGeometry`]
    pub struct ColliderKey;
}

/// A box collider registered with the level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticCollider {
    /// World-space bounds
    pub bounds: Aabb,
    /// Layer this collider belongs to
    pub layer: LayerMask,
}

/// Level geometry: static boxes, linear-scan ray queries
#[derive(Debug, Default, Clone)]
pub struct StaticGeometry {
    colliders: SlotMap<ColliderKey, StaticCollider>,
}

impl StaticGeometry {
    /// Create empty geometry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a collider
    pub fn insert(&mut self, bounds: Aabb, layer: LayerMask) -> ColliderKey {
        self.colliders.insert(StaticCollider { bounds, layer })
    }

    /// Remove a collider
    pub fn remove(&mut self, key: ColliderKey) -> Option<StaticCollider> {
        self.colliders.remove(key)
    }

    /// Look up a collider
    pub fn get(&self, key: ColliderKey) -> Option<&StaticCollider> {
        self.colliders.get(key)
    }

    /// Number of colliders
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Whether there are no colliders
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Iterate all colliders
    pub fn iter(&self) -> impl Iterator<Item = (ColliderKey, &StaticCollider)> {
        self.colliders.iter()
    }
}

impl CollisionQuery for StaticGeometry {
    fn raycast(&self, origin: Vec2, direction: Vec2, max_distance: f32, mask: LayerMask) -> Option<f32> {
        self.colliders
            .values()
            .filter(|collider| mask.accepts(collider.layer))
            .filter_map(|collider| collider.bounds.raycast(origin, direction, max_distance))
            .min_by(f32::total_cmp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_box_at(x: f32, y: f32) -> Aabb {
        Aabb::new(Vec2::new(x, y), Vec2::new(0.5, 0.5))
    }

    #[test]
    fn test_ray_hits_box_ahead() {
        let aabb = unit_box_at(3.0, 0.0);
        let hit = aabb.raycast(Vec2::zeros(), Vec2::new(1.0, 0.0), 10.0);
        assert_relative_eq!(hit.expect("hit"), 2.5);
    }

    #[test]
    fn test_ray_misses_when_too_short() {
        let aabb = unit_box_at(3.0, 0.0);
        assert!(aabb.raycast(Vec2::zeros(), Vec2::new(1.0, 0.0), 2.0).is_none());
    }

    #[test]
    fn test_ray_misses_box_behind() {
        let aabb = unit_box_at(-3.0, 0.0);
        assert!(aabb.raycast(Vec2::zeros(), Vec2::new(1.0, 0.0), 10.0).is_none());
    }

    #[test]
    fn test_touching_ray_reports_zero() {
        let aabb = unit_box_at(0.0, -0.5);
        // Origin sits on the top face, heading down into the box
        let hit = aabb.raycast(Vec2::new(0.0, 0.0), Vec2::new(0.0, -1.0), 0.05);
        assert_eq!(hit, Some(0.0));
    }

    #[test]
    fn test_leaving_ray_misses() {
        let aabb = unit_box_at(0.0, -0.5);
        assert!(aabb.raycast(Vec2::new(0.0, 0.0), Vec2::new(0.0, 1.0), 1.0).is_none());
    }

    #[test]
    fn test_origin_inside_reports_zero() {
        let aabb = unit_box_at(0.0, 0.0);
        assert_eq!(aabb.raycast(Vec2::zeros(), Vec2::new(0.0, 1.0), 1.0), Some(0.0));
    }

    #[test]
    fn test_geometry_returns_nearest_and_filters_layers() {
        let mut geometry = StaticGeometry::new();
        geometry.insert(unit_box_at(5.0, 0.0), LayerMask::ENVIRONMENT);
        let hazard = geometry.insert(unit_box_at(2.0, 0.0), LayerMask::HAZARD);

        let dir = Vec2::new(1.0, 0.0);
        assert_relative_eq!(
            geometry.raycast(Vec2::zeros(), dir, 10.0, LayerMask::ENVIRONMENT).expect("hit"),
            4.5
        );
        assert_relative_eq!(
            geometry.raycast(Vec2::zeros(), dir, 10.0, LayerMask::ALL).expect("hit"),
            1.5
        );

        geometry.remove(hazard);
        assert_eq!(geometry.len(), 1);
        assert_relative_eq!(
            geometry.raycast(Vec2::zeros(), dir, 10.0, LayerMask::ALL).expect("hit"),
            4.5
        );
    }

    #[test]
    fn test_from_min_max() {
        let aabb = Aabb::from_min_max(Vec2::new(-1.0, 0.0), Vec2::new(3.0, 2.0));
        assert_eq!(aabb.center, Vec2::new(1.0, 1.0));
        assert_eq!(aabb.half_extents, Vec2::new(2.0, 1.0));
        assert!(aabb.contains_point(Vec2::new(3.0, 2.0)));
    }
}
