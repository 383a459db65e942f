//! Visual side-effect sink
//!
//! Fire-and-forget triggers for one-shot clips and particle emitters. Nothing
//! here feeds back into the simulation except [`EffectSink::is_emitting`],
//! which only gates whether an emitter is restarted.

use std::collections::HashSet;

/// One-shot animation clips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Clip {
    /// Landing squash
    Squash,
    /// Jump stretch
    Stretch,
    /// Dash pose
    Dash,
}

impl Clip {
    /// Clip name as authored in the animation set
    pub fn name(self) -> &'static str {
        match self {
            Self::Squash => "Squash",
            Self::Stretch => "Stretch",
            Self::Dash => "Dash",
        }
    }
}

/// Particle emitters attached to the character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emitter {
    /// Dust burst on jump and landing
    Dust,
    /// Trail while dashing
    Dash,
}

impl Emitter {
    /// Looping emitters keep running until stopped; bursts end on their own
    pub fn is_looping(self) -> bool {
        matches!(self, Self::Dash)
    }
}

/// Receiver of visual side effects
pub trait EffectSink {
    /// Play a one-shot clip
    fn play_clip(&mut self, clip: Clip);
    /// Start an emitter
    fn start_emitter(&mut self, emitter: Emitter);
    /// Stop an emitter
    fn stop_emitter(&mut self, emitter: Emitter);
    /// Whether an emitter is currently running
    fn is_emitting(&self, emitter: Emitter) -> bool;
}

/// Sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEffects;

impl EffectSink for NullEffects {
    fn play_clip(&mut self, _clip: Clip) {}
    fn start_emitter(&mut self, _emitter: Emitter) {}
    fn stop_emitter(&mut self, _emitter: Emitter) {}
    fn is_emitting(&self, _emitter: Emitter) -> bool {
        false
    }
}

/// A recorded side effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectEvent {
    /// Clip played
    Clip(Clip),
    /// Emitter started
    EmitterStarted(Emitter),
    /// Emitter stopped
    EmitterStopped(Emitter),
}

/// Sink that records every effect in order
#[derive(Debug, Clone, Default)]
pub struct EffectRecorder {
    events: Vec<EffectEvent>,
    running: HashSet<Emitter>,
}

impl EffectRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far
    pub fn events(&self) -> &[EffectEvent] {
        &self.events
    }

    /// Drain the recorded events
    pub fn take(&mut self) -> Vec<EffectEvent> {
        std::mem::take(&mut self.events)
    }

    /// How many times `clip` was played
    pub fn clip_count(&self, clip: Clip) -> usize {
        self.events.iter().filter(|e| **e == EffectEvent::Clip(clip)).count()
    }
}

impl EffectSink for EffectRecorder {
    fn play_clip(&mut self, clip: Clip) {
        log::debug!("Effect: play clip {}", clip.name());
        self.events.push(EffectEvent::Clip(clip));
    }

    fn start_emitter(&mut self, emitter: Emitter) {
        log::debug!("Effect: start {:?} emitter", emitter);
        if emitter.is_looping() {
            self.running.insert(emitter);
        }
        self.events.push(EffectEvent::EmitterStarted(emitter));
    }

    fn stop_emitter(&mut self, emitter: Emitter) {
        self.running.remove(&emitter);
        self.events.push(EffectEvent::EmitterStopped(emitter));
    }

    fn is_emitting(&self, emitter: Emitter) -> bool {
        self.running.contains(&emitter)
    }
}
