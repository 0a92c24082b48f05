//=========================================================================
// Audio
//=========================================================================
//
// Sound effects and the looping music track, behind a backend trait.
//
// Architecture:
//   Scene → Audio (facade, owned by GlobalContext) → dyn AudioBackend
//
// Playback is best effort. A backend may refuse to play (no device,
// missing asset); the facade logs the refusal and gameplay carries on.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;
use thiserror::Error;

//=== Sound Catalogue =====================================================

/// One-shot sound effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    Jump,
    Interact,
    ChestOpen,
    Victory,
    Explosion,
    EvilLaugh,
    Collect,
}

impl SoundEffect {
    /// Asset name of the effect.
    pub fn name(self) -> &'static str {
        match self {
            Self::Jump => "jump",
            Self::Interact => "interact",
            Self::ChestOpen => "chest_open",
            Self::Victory => "victory",
            Self::Explosion => "explosion",
            Self::EvilLaugh => "evil_laugh",
            Self::Collect => "collect",
        }
    }
}

/// Looping background tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MusicTrack {
    Background,
    Minigame,
}

impl MusicTrack {
    pub fn name(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Minigame => "minigame",
        }
    }
}

//=== AudioError ==========================================================

/// Reasons a backend declined to play something.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AudioError {
    #[error("playback of '{sound}' rejected: {reason}")]
    Rejected { sound: &'static str, reason: String },

    #[error("no asset for '{0}'")]
    MissingAsset(&'static str),
}

//=== AudioBackend ========================================================

/// Device-facing half of the audio capability.
pub trait AudioBackend: Send {
    fn play_effect(&mut self, effect: SoundEffect) -> Result<(), AudioError>;
    fn start_loop(&mut self, track: MusicTrack) -> Result<(), AudioError>;
    fn stop_loop(&mut self) -> Result<(), AudioError>;
    fn switch_loop(&mut self, track: MusicTrack) -> Result<(), AudioError>;
}

/// Backend that plays nothing and only traces the requests.
#[derive(Debug, Default)]
pub struct SilentBackend;

impl AudioBackend for SilentBackend {
    fn play_effect(&mut self, effect: SoundEffect) -> Result<(), AudioError> {
        debug!(target: "audio", "effect {}", effect.name());
        Ok(())
    }

    fn start_loop(&mut self, track: MusicTrack) -> Result<(), AudioError> {
        debug!(target: "audio", "loop start {}", track.name());
        Ok(())
    }

    fn stop_loop(&mut self) -> Result<(), AudioError> {
        debug!(target: "audio", "loop stop");
        Ok(())
    }

    fn switch_loop(&mut self, track: MusicTrack) -> Result<(), AudioError> {
        debug!(target: "audio", "loop switch {}", track.name());
        Ok(())
    }
}

//=== Audio ===============================================================

/// Scene-facing audio facade.
///
/// Never fails. Tracks which loop is active so [`restore_loop`](Self::restore_loop)
/// can return to the track playing before the last switch.
pub struct Audio {
    backend: Box<dyn AudioBackend>,
    track: MusicTrack,
    previous: Option<MusicTrack>,
    playing: bool,
}

impl Audio {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            track: MusicTrack::Background,
            previous: None,
            playing: false,
        }
    }

    pub fn silent() -> Self {
        Self::new(Box::new(SilentBackend))
    }

    //--- Effects ----------------------------------------------------------

    pub fn play(&mut self, effect: SoundEffect) {
        Self::swallow(self.backend.play_effect(effect));
    }

    //--- Loop Control -----------------------------------------------------

    /// Starts the current loop track. No-op while already playing.
    pub fn start_loop(&mut self) {
        if self.playing {
            return;
        }
        self.playing = true;
        Self::swallow(self.backend.start_loop(self.track));
    }

    pub fn stop_loop(&mut self) {
        self.playing = false;
        Self::swallow(self.backend.stop_loop());
    }

    /// Replaces the loop track, remembering the one it replaced.
    pub fn switch_loop(&mut self, track: MusicTrack) {
        self.previous = Some(self.track);
        self.track = track;
        self.playing = true;
        Self::swallow(self.backend.switch_loop(track));
    }

    /// Switches back to the track active before the last `switch_loop`.
    pub fn restore_loop(&mut self) {
        if let Some(previous) = self.previous.take() {
            self.track = previous;
            self.playing = true;
            Self::swallow(self.backend.switch_loop(previous));
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn current_track(&self) -> MusicTrack {
        self.track
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    fn swallow(result: Result<(), AudioError>) {
        if let Err(e) = result {
            debug!(target: "audio", "Ignoring audio failure: {}", e);
        }
    }
}

impl Default for Audio {
    fn default() -> Self {
        Self::silent()
    }
}

//=========================================================================
// Test Support
//=========================================================================


//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::recording::{AudioCall, RecordingBackend};
    use super::*;

    #[test]
    fn restore_returns_to_previous_track() {
        let (backend, calls) = RecordingBackend::new(false);
        let mut audio = Audio::new(Box::new(backend));

        audio.start_loop();
        audio.switch_loop(MusicTrack::Minigame);
        assert_eq!(audio.current_track(), MusicTrack::Minigame);

        audio.restore_loop();
        assert_eq!(audio.current_track(), MusicTrack::Background);

        assert_eq!(
            *calls.lock().unwrap(),
            vec![
                AudioCall::Start(MusicTrack::Background),
                AudioCall::Switch(MusicTrack::Minigame),
                AudioCall::Switch(MusicTrack::Background),
            ]
        );
    }

    #[test]
    fn restore_without_switch_is_a_no_op() {
        let (backend, calls) = RecordingBackend::new(false);
        let mut audio = Audio::new(Box::new(backend));

        audio.restore_loop();

        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn start_loop_is_idempotent() {
        let (backend, calls) = RecordingBackend::new(false);
        let mut audio = Audio::new(Box::new(backend));

        audio.start_loop();
        audio.start_loop();
        assert_eq!(calls.lock().unwrap().len(), 1);

        audio.stop_loop();
        assert!(!audio.is_playing());
        audio.start_loop();
        assert_eq!(calls.lock().unwrap().len(), 3);
    }

    #[test]
    fn rejected_playback_is_swallowed() {
        let (backend, calls) = RecordingBackend::new(true);
        let mut audio = Audio::new(Box::new(backend));

        audio.play(SoundEffect::Jump);
        audio.start_loop();
        audio.switch_loop(MusicTrack::Minigame);
        audio.restore_loop();

        assert_eq!(calls.lock().unwrap().len(), 4);
        assert_eq!(audio.current_track(), MusicTrack::Background);
    }

    #[test]
    fn error_messages_name_the_sound() {
        let err = AudioError::Rejected { sound: "jump", reason: "denied".into() };
        assert!(err.to_string().contains("jump"));
        assert!(AudioError::MissingAsset("victory").to_string().contains("victory"));
    }
}
