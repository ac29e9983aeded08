//! The notification sink — informational events for the UI layer, with an
//! injected audio capability.
//!
//! Audio is a capability handed to the sink with an explicit
//! initialize/teardown lifecycle, so tests can inject a recorder and the
//! headless runner a no-op. Delivery is best-effort; nothing here is
//! persisted or retried.

use crate::error::SimResult;
use crate::event::{event_type_name, SimEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    Coin,
    Alarm,
    Fanfare,
    Chime,
}

/// The audio capability injected into the notification sink.
pub trait AudioService: Send {
    fn initialize(&mut self) -> SimResult<()>;
    fn play(&mut self, cue: AudioCue);
    fn teardown(&mut self);
}

/// No-op audio for tests and headless runs.
pub struct SilentAudio;

impl AudioService for SilentAudio {
    fn initialize(&mut self) -> SimResult<()> {
        Ok(())
    }
    fn play(&mut self, _cue: AudioCue) {}
    fn teardown(&mut self) {}
}

pub struct Notifier {
    audio: Box<dyn AudioService>,
}

impl Notifier {
    pub fn new(audio: Box<dyn AudioService>) -> Self {
        Self { audio }
    }

    pub fn silent() -> Self {
        Self::new(Box::new(SilentAudio))
    }

    pub fn initialize(&mut self) -> SimResult<()> {
        self.audio.initialize()
    }

    pub fn teardown(&mut self) {
        self.audio.teardown();
    }

    /// Deliver one notification: a log line plus an optional audio cue.
    pub fn notify(&mut self, event: &SimEvent) {
        log::info!("notify: {}", event_type_name(event));
        if let Some(cue) = cue_for(event) {
            self.audio.play(cue);
        }
    }
}

fn cue_for(event: &SimEvent) -> Option<AudioCue> {
    match event {
        SimEvent::InterestCharged { .. } | SimEvent::PaymentMissed { .. } => Some(AudioCue::Alarm),
        SimEvent::QuizAnswered { correct: true, .. } => Some(AudioCue::Coin),
        SimEvent::BadgeEarned { .. } | SimEvent::OutcomeReached { .. } => Some(AudioCue::Fanfare),
        SimEvent::LoanAccepted { .. } | SimEvent::LoanDeclined { .. } => Some(AudioCue::Chime),
        _ => None,
    }
}
