//! Collision layer system for filtering raycasts
//!
//! Based on Game Engine Architecture 3rd Edition, Section 13.3.8:
//! "Most games need to filter collisions... This is typically done via
//! collision layers or groups."

use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// Collision layer bits; a collider belongs to one or more layers and a
    /// query names the layers it wants to hit
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct LayerMask: u32 {
        /// Player character layer
        const PLAYER = 1 << 0;
        /// Solid level geometry
        const ENVIRONMENT = 1 << 1;
        /// Hazards (spikes, pits)
        const HAZARD = 1 << 2;
        /// Pass-through platforms, tagged apart from `ENVIRONMENT` so a body
        /// can opt in; solid from every side when included in a mask
        const ONE_WAY = 1 << 3;
        /// Trigger volumes, left out of movement masks
        const TRIGGER = 1 << 4;
    }
}

impl LayerMask {
    /// No collision layer
    pub const NONE: Self = Self::empty();

    /// All collision layers
    pub const ALL: Self = Self::all();

    /// Whether a collider on `layer` is visible to a query filtered by `self`
    pub fn accepts(self, layer: Self) -> bool {
        self.intersects(layer)
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ENVIRONMENT
    }
}
