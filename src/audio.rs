//! Audio boundary: the simulator only emits `Effect::PlaySound`, a sink
//! decides what that means on the host.

use crate::entities::{Effect, SoundId};

pub trait AudioSink {
    fn play_sound(&mut self, sound: SoundId);
}

/// Discards every sound.
#[derive(Debug, Default)]
pub struct Muted;

impl AudioSink for Muted {
    fn play_sound(&mut self, _sound: SoundId) {}
}

/// Forward the sound requests in `effects` to `sink`, in emission order.
pub fn dispatch_effects<S: AudioSink + ?Sized>(effects: &[Effect], sink: &mut S) {
    for effect in effects {
        if let Effect::PlaySound(sound) = effect {
            sink.play_sound(*sound);
        }
    }
}
