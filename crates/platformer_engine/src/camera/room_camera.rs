//! Room camera: follows a target inside the active room and slides to the
//! next room when the target crosses into it
//!
//! Only one camera may exist per thread. Consumers receive it (or its event
//! bus) explicitly; there is no global accessor.

use std::cell::Cell;

use crate::config::{CameraConfig, ConfigError};
use crate::events::{EventBus, EventHandler, RoomEvent, RoomEventKind, SubscriptionId};
use crate::foundation::math::Vec2;

use super::room::{room_index, Room};

thread_local! {
    static CAMERA_ALIVE: Cell<bool> = Cell::new(false);
}

/// Camera errors
#[derive(thiserror::Error, Debug)]
pub enum CameraError {
    /// A camera is already alive on this thread
    #[error("a room camera already exists on this thread")]
    AlreadyConstructed,

    /// Camera settings or room list failed validation
    #[error("invalid camera configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Camera state machine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraState {
    /// Tracking the target inside the current room
    Following,
    /// Sliding toward a position in the target room
    Transitioning {
        /// Room being entered
        room: Option<usize>,
        /// Where the slide ends
        destination: Vec2,
    },
}

/// Room-aware camera controller
#[derive(Debug)]
pub struct RoomCamera {
    config: CameraConfig,
    rooms: Vec<Room>,

    position: Vec2,
    pinned_position: Vec2,
    current_room: Option<usize>,
    target_room: Option<usize>,
    state: CameraState,
    follow_velocity: Vec2,

    events: EventBus,
}

impl RoomCamera {
    /// Create the camera at `position`, tracking `target`
    ///
    /// The room containing `target` becomes the current room and the camera
    /// starts clamped into it. Fails if a camera already exists on this thread.
    pub fn new(config: CameraConfig, rooms: Vec<Room>, position: Vec2, target: Vec2) -> Result<Self, CameraError> {
        config.validate()?;
        for (index, room) in rooms.iter().enumerate() {
            if !(room.half_size.x > 0.0 && room.half_size.y > 0.0) {
                return Err(ConfigError::Invalid(format!("rooms[{index}] has a non-positive half size")).into());
            }
        }

        CAMERA_ALIVE.with(|alive| {
            if alive.get() {
                return Err(CameraError::AlreadyConstructed);
            }
            alive.set(true);
            Ok(())
        })?;

        let current_room = room_index(&rooms, target);
        let position = match current_room {
            Some(index) => rooms[index].clamp_view(position, config.half_dimensions),
            None => position,
        };

        log::info!("Room camera created with {} rooms, starting in {:?}", rooms.len(), current_room);

        Ok(Self {
            config,
            rooms,
            position,
            pinned_position: position,
            current_room,
            target_room: current_room,
            state: CameraState::Following,
            follow_velocity: Vec2::zeros(),
            events: EventBus::new(),
        })
    }

    /// Camera settings
    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Room list in lookup order
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Camera center as rendered this frame, including external offsets
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Room the camera is settled in
    pub fn current_room(&self) -> Option<usize> {
        self.current_room
    }

    /// Room containing the target as of the last update
    pub fn target_room(&self) -> Option<usize> {
        self.target_room
    }

    /// Current state
    pub fn state(&self) -> CameraState {
        self.state
    }

    /// Whether a room transition is running
    pub fn is_transitioning(&self) -> bool {
        matches!(self.state, CameraState::Transitioning { .. })
    }

    /// Spring follow velocity (zero under smoothing)
    pub fn follow_velocity(&self) -> Vec2 {
        self.follow_velocity
    }

    /// Room index lookup against this camera's rooms
    pub fn room_index(&self, point: Vec2) -> Option<usize> {
        room_index(&self.rooms, point)
    }

    /// Add a transient offset (shake, recoil) for this frame only
    ///
    /// Ignored while transitioning; returns whether the offset was applied.
    /// The shaken position is still clamped into the current room.
    pub fn apply_offset(&mut self, offset: Vec2) -> bool {
        if self.is_transitioning() {
            return false;
        }
        self.position = self.clamp_to(self.current_room, self.position + offset);
        true
    }

    // ---- notifications ----

    /// Subscribe to transition notifications of the given kinds
    pub fn subscribe(&mut self, kinds: &[RoomEventKind], handler: Box<dyn EventHandler>) -> SubscriptionId {
        self.events.subscribe(kinds, handler)
    }

    /// Subscribe to both transition notifications
    pub fn subscribe_all(&mut self, handler: Box<dyn EventHandler>) -> SubscriptionId {
        self.events.subscribe_all(handler)
    }

    /// Remove a subscription; returns whether it existed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    // ---- update ----

    /// Per-frame update; notifications are delivered before this returns
    pub fn update(&mut self, delta_time: f32, target: Vec2) {
        self.position = self.pinned_position;
        self.refresh_target_room(target);

        if self.state == CameraState::Following && self.target_room != self.current_room {
            self.begin_transition(target);
        }

        match self.state {
            CameraState::Transitioning { room, destination } => {
                self.slide_toward(destination, delta_time);
                let threshold = self.config.smooth_min_speed * self.config.smooth_min_speed;
                if (self.position - destination).magnitude_squared() < threshold {
                    self.finish_transition(room, destination);
                }
            }
            CameraState::Following => self.follow(target, delta_time),
        }

        self.pinned_position = self.position;
    }

    fn refresh_target_room(&mut self, target: Vec2) {
        let index = room_index(&self.rooms, target);
        if index.is_none() && self.config.dont_follow_target_off_screen {
            return;
        }
        self.target_room = index;
    }

    fn clamp_to(&self, room: Option<usize>, point: Vec2) -> Vec2 {
        match room {
            Some(index) => self.rooms[index].clamp_view(point, self.config.half_dimensions),
            None => point,
        }
    }

    fn begin_transition(&mut self, target: Vec2) {
        self.events.publish(&RoomEvent::TransitionEnter {
            from: self.current_room,
            to: self.target_room,
        });

        let destination = self.clamp_to(self.target_room, target);
        self.state = CameraState::Transitioning {
            room: self.target_room,
            destination,
        };
        log::info!(
            "Room transition {:?} -> {:?}, sliding to {:?}",
            self.current_room,
            self.target_room,
            destination
        );
    }

    /// Never steps past the destination, however long the frame
    fn slide_toward(&mut self, destination: Vec2, delta_time: f32) {
        let factor = (self.config.smooth_movement_speed * delta_time).min(1.0);
        let mut step = Vec2::zeros();
        if self.position.x != destination.x {
            step.x = (destination.x - self.position.x) * factor;
        }
        if self.position.y != destination.y {
            step.y = (destination.y - self.position.y) * factor;
        }

        let magnitude = step.magnitude();
        if magnitude > 0.0 && magnitude < self.config.smooth_min_speed {
            step *= self.config.smooth_min_speed / magnitude;
        }

        self.position += step;
    }

    /// The room entered is the one chosen when the slide began, even if the
    /// target has moved on since
    fn finish_transition(&mut self, room: Option<usize>, destination: Vec2) {
        self.position = destination;
        self.events.publish(&RoomEvent::TransitionExit { room });

        self.current_room = room;
        self.follow_velocity = Vec2::zeros();
        self.state = CameraState::Following;
        log::info!("Room transition finished in {:?}", self.current_room);
    }

    fn follow(&mut self, target: Vec2, delta_time: f32) {
        let next = self.config.follow.step(self.position, target, &mut self.follow_velocity, delta_time);
        self.position = self.clamp_to(self.current_room, next);
    }
}

impl Drop for RoomCamera {
    fn drop(&mut self) {
        CAMERA_ALIVE.with(|alive| alive.set(false));
    }
}
