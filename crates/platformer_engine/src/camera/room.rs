//! Rectangular rooms partitioning the level

use serde::{Deserialize, Serialize};

use crate::foundation::math::{utils, Vec2};

/// A room: center position plus half-size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Center of the room
    pub position: Vec2,
    /// Half of the room's width and height
    pub half_size: Vec2,
}

impl Room {
    /// Create a room
    pub fn new(position: Vec2, half_size: Vec2) -> Self {
        Self { position, half_size }
    }

    /// Strict interior containment; points on the boundary are outside
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.position.x - self.half_size.x
            && point.x < self.position.x + self.half_size.x
            && point.y > self.position.y - self.half_size.y
            && point.y < self.position.y + self.half_size.y
    }

    /// Top-left corner
    pub fn top_left(&self) -> Vec2 {
        self.position + Vec2::new(-self.half_size.x, self.half_size.y)
    }

    /// Top-right corner
    pub fn top_right(&self) -> Vec2 {
        self.position + self.half_size
    }

    /// Bottom-right corner
    pub fn bottom_right(&self) -> Vec2 {
        self.position + Vec2::new(self.half_size.x, -self.half_size.y)
    }

    /// Bottom-left corner
    pub fn bottom_left(&self) -> Vec2 {
        self.position - self.half_size
    }

    /// Corners in drawing order, for debug outlines
    pub fn corners(&self) -> [Vec2; 4] {
        [self.top_left(), self.top_right(), self.bottom_right(), self.bottom_left()]
    }

    /// Range of camera centers that keep the view inside the room, as `(min, max)`
    ///
    /// When the room is smaller than the view on an axis, `min > max` there.
    pub fn visible_bounds(&self, camera_half_dimensions: Vec2) -> (Vec2, Vec2) {
        let min = self.position - self.half_size + camera_half_dimensions;
        let max = self.position + self.half_size - camera_half_dimensions;
        (min, max)
    }

    /// Clamp a camera center into [`Room::visible_bounds`]
    ///
    /// The lower bound wins when the bounds are inverted.
    pub fn clamp_view(&self, point: Vec2, camera_half_dimensions: Vec2) -> Vec2 {
        let (min, max) = self.visible_bounds(camera_half_dimensions);
        Vec2::new(utils::clamp(point.x, min.x, max.x), utils::clamp(point.y, min.y, max.y))
    }
}

/// Index of the first room in list order that strictly contains `point`
pub fn room_index(rooms: &[Room], point: Vec2) -> Option<usize> {
    rooms.iter().position(|room| room.contains(point))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_rooms() -> Vec<Room> {
        vec![
            Room::new(Vec2::new(0.0, 0.0), Vec2::new(20.0, 10.0)),
            Room::new(Vec2::new(40.0, 0.0), Vec2::new(20.0, 10.0)),
        ]
    }

    #[test]
    fn test_contains_is_strict() {
        let room = Room::new(Vec2::zeros(), Vec2::new(2.0, 1.0));
        assert!(room.contains(Vec2::new(1.9, 0.9)));
        assert!(!room.contains(Vec2::new(2.0, 0.0)));
        assert!(!room.contains(Vec2::new(0.0, -1.0)));
    }

    #[test]
    fn test_room_index_center_and_gaps() {
        let rooms = two_rooms();
        assert_eq!(room_index(&rooms, Vec2::new(0.0, 0.0)), Some(0));
        assert_eq!(room_index(&rooms, Vec2::new(40.0, 0.0)), Some(1));
        // Shared edge belongs to neither room
        assert_eq!(room_index(&rooms, Vec2::new(20.0, 0.0)), None);
        assert_eq!(room_index(&rooms, Vec2::new(0.0, 50.0)), None);
        assert_eq!(room_index(&[], Vec2::zeros()), None);
    }

    #[test]
    fn test_room_index_prefers_first_overlapping_room() {
        let rooms = vec![
            Room::new(Vec2::zeros(), Vec2::new(10.0, 10.0)),
            Room::new(Vec2::new(5.0, 0.0), Vec2::new(10.0, 10.0)),
        ];
        assert_eq!(room_index(&rooms, Vec2::new(6.0, 0.0)), Some(0));
        assert_eq!(room_index(&rooms, Vec2::new(12.0, 0.0)), Some(1));
    }

    #[test]
    fn test_corners() {
        let room = Room::new(Vec2::new(1.0, 1.0), Vec2::new(2.0, 3.0));
        assert_eq!(
            room.corners(),
            [
                Vec2::new(-1.0, 4.0),
                Vec2::new(3.0, 4.0),
                Vec2::new(3.0, -2.0),
                Vec2::new(-1.0, -2.0),
            ]
        );
    }

    #[test]
    fn test_clamp_view_insets_by_camera_half_dimensions() {
        let room = Room::new(Vec2::zeros(), Vec2::new(20.0, 10.0));
        let half = Vec2::new(13.5, 7.5);

        assert_eq!(room.clamp_view(Vec2::new(100.0, -100.0), half), Vec2::new(6.5, -2.5));
        assert_eq!(room.clamp_view(Vec2::new(1.0, 1.0), half), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_clamp_view_in_room_smaller_than_view() {
        let room = Room::new(Vec2::zeros(), Vec2::new(5.0, 5.0));
        let half = Vec2::new(13.5, 7.5);
        // Bounds are inverted; every point snaps to the lower bound
        assert_eq!(room.clamp_view(Vec2::zeros(), half), Vec2::new(8.5, 2.5));
        assert_eq!(room.clamp_view(Vec2::new(-30.0, -30.0), half), Vec2::new(8.5, 2.5));
        assert_eq!(room.clamp_view(Vec2::new(30.0, 30.0), half), Vec2::new(8.5, 2.5));
    }
}
