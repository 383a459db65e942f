//! Room partitioning and the room camera

pub mod follow;
pub mod room;
pub mod room_camera;

pub use follow::{FollowPolicy, SmoothingFollow, SpringFollow};
pub use room::{room_index, Room};
pub use room_camera::{CameraError, CameraState, RoomCamera};
