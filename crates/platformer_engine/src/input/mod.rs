//! Input source contract and a frame-based input state
//!
//! The controller only ever reads input through [`InputSource`]: two axes in
//! [-1, 1] plus press-edge and held queries for the named actions.

/// Named buttons the controller reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Jump button
    Jump,
    /// Dash button
    Dash,
}

impl Action {
    const COUNT: usize = 2;

    fn index(self) -> usize {
        match self {
            Self::Jump => 0,
            Self::Dash => 1,
        }
    }
}

/// Input source consumed by the character controller
pub trait InputSource {
    /// Horizontal axis in [-1, 1]
    fn horizontal(&self) -> f32;
    /// Vertical axis in [-1, 1]
    fn vertical(&self) -> f32;
    /// Whether `action` went down this frame
    fn pressed(&self, action: Action) -> bool;
    /// Whether `action` is currently down
    fn held(&self, action: Action) -> bool;
}

/// Input state built from press/release/axis events
///
/// Press edges survive until [`InputState::end_frame`], so every fixed tick
/// run inside the frame sees the same edges the frame update saw.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    horizontal: f32,
    vertical: f32,
    held: [bool; Action::COUNT],
    pressed: [bool; Action::COUNT],
}

impl InputState {
    /// Create an idle input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both axes, clamped to [-1, 1]
    pub fn set_axes(&mut self, horizontal: f32, vertical: f32) {
        self.horizontal = horizontal.clamp(-1.0, 1.0);
        self.vertical = vertical.clamp(-1.0, 1.0);
    }

    /// Button down; records a press edge only on the transition
    pub fn press(&mut self, action: Action) {
        let i = action.index();
        if !self.held[i] {
            self.pressed[i] = true;
        }
        self.held[i] = true;
    }

    /// Button up
    pub fn release(&mut self, action: Action) {
        self.held[action.index()] = false;
    }

    /// Clear this frame's press edges
    pub fn end_frame(&mut self) {
        self.pressed = [false; Action::COUNT];
    }
}

impl InputSource for InputState {
    fn horizontal(&self) -> f32 {
        self.horizontal
    }

    fn vertical(&self) -> f32 {
        self.vertical
    }

    fn pressed(&self, action: Action) -> bool {
        self.pressed[action.index()]
    }

    fn held(&self, action: Action) -> bool {
        self.held[action.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_edge_lasts_one_frame() {
        let mut input = InputState::new();
        input.press(Action::Jump);
        assert!(input.pressed(Action::Jump));
        assert!(input.held(Action::Jump));

        input.end_frame();
        assert!(!input.pressed(Action::Jump));
        assert!(input.held(Action::Jump));
    }

    #[test]
    fn test_repeat_press_while_held_is_not_an_edge() {
        let mut input = InputState::new();
        input.press(Action::Dash);
        input.end_frame();
        input.press(Action::Dash);
        assert!(!input.pressed(Action::Dash));

        input.release(Action::Dash);
        input.press(Action::Dash);
        assert!(input.pressed(Action::Dash));
    }

    #[test]
    fn test_axes_clamped() {
        let mut input = InputState::new();
        input.set_axes(3.0, -2.0);
        assert_eq!(input.horizontal(), 1.0);
        assert_eq!(input.vertical(), -1.0);
    }
}
