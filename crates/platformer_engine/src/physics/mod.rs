//! Physics module for discrete 2D collision resolution
//!
//! Movement is resolved per axis, per tick, by raycasting against static
//! geometry. There is no solver, no rotation and no body-vs-body response.

pub mod collision_layers;
pub mod geometry;
pub mod motion_body;

pub use collision_layers::LayerMask;
pub use geometry::{Aabb, Axis, ColliderKey, CollisionQuery, StaticCollider, StaticGeometry};
pub use motion_body::{MotionBody, MoveReport, GROUND_PROBE_DISTANCE, MIN_DISPLACEMENT, SIDE_RAY_FRACTION};
