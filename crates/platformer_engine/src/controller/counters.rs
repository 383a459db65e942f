//! Bounded frame counters for input windows

/// Counter clamped to `[0, max]`; the window is open while `value < max`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameCounter {
    value: u32,
    max: u32,
}

impl FrameCounter {
    /// Create a counter that starts exhausted (window closed)
    pub fn exhausted(max: u32) -> Self {
        Self { value: max, max }
    }

    /// Current count
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Configured maximum
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Whether the window is still open
    pub fn is_active(&self) -> bool {
        self.value < self.max
    }

    /// Count one frame, saturating at the maximum
    pub fn advance(&mut self) {
        if self.value < self.max {
            self.value += 1;
        }
    }

    /// Restart the window
    pub fn reset(&mut self) {
        self.value = 0;
    }

    /// Close the window immediately
    pub fn exhaust(&mut self) {
        self.value = self.max;
    }
}
