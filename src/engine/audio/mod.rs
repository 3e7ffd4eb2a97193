// Audio playback behind an optional backend
//
// The backend is opened once at startup. When it is unavailable the whole
// session runs muted and every call below is a no-op.

mod bank;
#[cfg(feature = "audio")]
mod output;

pub use bank::SoundBank;

use log::{debug, info, warn};

use crate::engine::assets::AssetLoader;

/// Audio errors
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("No audio backend available")]
    Unavailable,

    #[error("Failed to open audio device: {0}")]
    Device(String),
}

/// Something that can actually make noise
pub trait AudioBackend {
    /// Fire-and-forget sound effect
    fn play_sound(&mut self, name: &str);

    /// Start a music track from the beginning
    fn play_music(&mut self, track: &str);

    fn pause_music(&mut self);

    fn resume_music(&mut self);

    fn stop_music(&mut self);
}

/// Open the platform's default audio output, reading sounds through
/// `loader`
#[cfg(feature = "audio")]
pub fn open_default_backend(loader: AssetLoader) -> Result<Box<dyn AudioBackend>, AudioError> {
    let backend = output::RodioBackend::open(SoundBank::new(loader))?;
    Ok(Box::new(backend))
}

/// Built without the `audio` feature: there is no output to open
#[cfg(not(feature = "audio"))]
pub fn open_default_backend(_loader: AssetLoader) -> Result<Box<dyn AudioBackend>, AudioError> {
    Err(AudioError::Unavailable)
}

/// Playback state of the background track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicState {
    Stopped,
    Playing,
    Paused,
}

/// Process-wide audio: sound effects plus one background track
pub struct Audio {
    backend: Option<Box<dyn AudioBackend>>,
    track: &'static str,
    music_on: bool,
    music: MusicState,
}

impl Audio {
    /// Take the result of opening a backend. On success the track is
    /// started and immediately paused, ready to resume when a game starts.
    pub fn open(
        backend: Result<Box<dyn AudioBackend>, AudioError>,
        track: &'static str,
    ) -> Self {
        match backend {
            Ok(mut backend) => {
                backend.play_music(track);
                backend.pause_music();
                info!("Audio backend ready");
                Self {
                    backend: Some(backend),
                    track,
                    music_on: true,
                    music: MusicState::Paused,
                }
            }
            Err(e) => {
                warn!("{}; running muted", e);
                Self::muted(track)
            }
        }
    }

    /// Audio with no backend at all
    pub fn muted(track: &'static str) -> Self {
        Self {
            backend: None,
            track,
            music_on: false,
            music: MusicState::Stopped,
        }
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    pub fn music_on(&self) -> bool {
        self.music_on
    }

    pub fn music_state(&self) -> MusicState {
        self.music
    }

    pub fn play_sound(&mut self, name: &str) {
        if let Some(backend) = self.backend.as_mut() {
            backend.play_sound(name);
        }
    }

    /// Flip the music preference. Pausing and resuming never restarts the
    /// track.
    pub fn toggle_music(&mut self) {
        if !self.is_available() {
            debug!("Music toggle ignored: no audio backend");
            return;
        }

        self.music_on = !self.music_on;
        if self.music_on {
            self.start_or_resume();
        } else if self.music == MusicState::Playing {
            if let Some(backend) = self.backend.as_mut() {
                backend.pause_music();
            }
            self.music = MusicState::Paused;
        }
        info!("Music {}", if self.music_on() { "on" } else { "off" });
    }

    /// Resume the track for a new game if music is enabled
    pub fn resume_for_game(&mut self) {
        if self.music_on {
            self.start_or_resume();
        }
    }

    pub fn stop_music(&mut self) {
        if self.music == MusicState::Stopped {
            return;
        }
        if let Some(backend) = self.backend.as_mut() {
            backend.stop_music();
        }
        self.music = MusicState::Stopped;
    }

    fn start_or_resume(&mut self) {
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        match self.music {
            MusicState::Playing => {}
            MusicState::Paused => backend.resume_music(),
            MusicState::Stopped => backend.play_music(self.track),
        }
        self.music = MusicState::Playing;
    }
}
