//! Scripted input track for headless runs

use platformer_engine::input::{Action, InputState};

/// One input change
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cue {
    /// Set both stick axes
    Axes(f32, f32),
    /// Button down
    Press(Action),
    /// Button up
    Release(Action),
}

/// Time-ordered list of cues replayed into an [`InputState`]
#[derive(Debug, Clone)]
pub struct InputScript {
    cues: Vec<(f32, Cue)>,
    next: usize,
}

impl InputScript {
    /// Build a script; cues are sorted by time, ties keep their order
    pub fn new(mut cues: Vec<(f32, Cue)>) -> Self {
        cues.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { cues, next: 0 }
    }

    /// Walk right through the first room, jump onto the platforms in the
    /// second and dash up into the shaft
    pub fn demo() -> Self {
        Self::new(vec![
            (0.5, Cue::Axes(1.0, 0.0)),
            (1.5, Cue::Press(Action::Jump)),
            (1.8, Cue::Release(Action::Jump)),
            (4.5, Cue::Press(Action::Jump)),
            (4.9, Cue::Release(Action::Jump)),
            (6.5, Cue::Axes(0.0, 0.0)),
            (7.0, Cue::Press(Action::Jump)),
            (7.2, Cue::Release(Action::Jump)),
            (7.6, Cue::Axes(1.0, 1.0)),
            (7.6, Cue::Press(Action::Dash)),
            (7.7, Cue::Release(Action::Dash)),
            (8.0, Cue::Axes(-1.0, 0.0)),
            (8.1, Cue::Press(Action::Jump)),
            (8.4, Cue::Release(Action::Jump)),
            (9.0, Cue::Axes(0.0, 0.0)),
            (9.5, Cue::Press(Action::Dash)),
            (9.6, Cue::Release(Action::Dash)),
        ])
    }

    /// Apply every cue due at or before `time`; returns how many were applied
    pub fn apply_until(&mut self, time: f32, input: &mut InputState) -> usize {
        let start = self.next;
        while let Some(&(at, cue)) = self.cues.get(self.next) {
            if at > time {
                break;
            }
            log::debug!("t={at:.2}s input {cue:?}");
            match cue {
                Cue::Axes(horizontal, vertical) => input.set_axes(horizontal, vertical),
                Cue::Press(action) => input.press(action),
                Cue::Release(action) => input.release(action),
            }
            self.next += 1;
        }
        self.next - start
    }

    /// Whether every cue has been applied
    pub fn finished(&self) -> bool {
        self.next >= self.cues.len()
    }

    /// Time of the last cue
    pub fn duration(&self) -> f32 {
        self.cues.last().map_or(0.0, |(at, _)| *at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platformer_engine::input::InputSource;

    #[test]
    fn test_cues_apply_in_time_order() {
        let mut script = InputScript::new(vec![
            (1.0, Cue::Release(Action::Jump)),
            (0.5, Cue::Press(Action::Jump)),
            (2.0, Cue::Axes(-1.0, 0.0)),
        ]);
        let mut input = InputState::new();

        assert_eq!(script.apply_until(0.4, &mut input), 0);
        assert_eq!(script.apply_until(0.5, &mut input), 1);
        assert!(input.held(Action::Jump));

        assert_eq!(script.apply_until(1.5, &mut input), 1);
        assert!(!input.held(Action::Jump));
        assert!(!script.finished());

        assert_eq!(script.apply_until(10.0, &mut input), 1);
        assert_eq!(input.horizontal(), -1.0);
        assert!(script.finished());
    }

    #[test]
    fn test_demo_duration() {
        assert_eq!(InputScript::demo().duration(), 9.6);
    }
}
