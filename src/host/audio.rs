//! Audio collaborator.
//!
//! Sounds are fire-and-forget. A sink may refuse to play (browsers block
//! audio until the first user gesture, devices disappear); the refusal is
//! logged and the game carries on.

use log::warn;

use crate::events::SoundCue;

#[derive(thiserror::Error, Debug)]
pub enum AudioError {
    #[error("playback blocked until the player interacts")]
    Blocked,
    #[error("no sound loaded for {0:?}")]
    Missing(SoundCue),
    #[error("audio device unavailable: {0}")]
    Device(String),
}

/// Something that can play the game's sound cues.
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue) -> Result<(), AudioError>;
}

/// Play `cue`, logging and discarding any failure.
///
/// Returns whether the sink accepted the cue.
pub fn play_cue<A: AudioSink + ?Sized>(sink: &mut A, cue: SoundCue) -> bool {
    match sink.play(cue) {
        Ok(()) => true,
        Err(err) => {
            warn!("could not play {cue:?}: {err}");
            false
        }
    }
}

/// Sink that plays nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct Muted;

impl AudioSink for Muted {
    fn play(&mut self, _cue: SoundCue) -> Result<(), AudioError> {
        Ok(())
    }
}
