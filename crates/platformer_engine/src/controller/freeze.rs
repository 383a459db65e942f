//! Freeze flag shared between a controller and the room transition bus

use std::cell::Cell;
use std::rc::Rc;

use crate::events::{EventHandler, RoomEvent};

/// Level-triggered freeze flag
///
/// Cloning shares the flag. The controller keeps one copy and checks it at
/// the start of every update; a copy subscribed to the room camera's bus
/// sets it on transition enter and clears it on transition exit.
#[derive(Debug, Clone, Default)]
pub struct FreezeSwitch {
    frozen: Rc<Cell<bool>>,
}

impl FreezeSwitch {
    /// Create an unfrozen switch
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the owner is frozen
    pub fn is_frozen(&self) -> bool {
        self.frozen.get()
    }

    /// Suspend the owner
    pub fn freeze(&self) {
        if !self.frozen.replace(true) {
            log::debug!("Character frozen");
        }
    }

    /// Resume the owner
    pub fn unfreeze(&self) {
        if self.frozen.replace(false) {
            log::debug!("Character unfrozen");
        }
    }
}

impl EventHandler for FreezeSwitch {
    fn on_event(&mut self, event: &RoomEvent) {
        match event {
            RoomEvent::TransitionEnter { .. } => self.freeze(),
            RoomEvent::TransitionExit { .. } => self.unfreeze(),
        }
    }
}
