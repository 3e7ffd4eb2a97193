// Audio output through rodio

use log::{info, warn};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source, StreamError};
use std::io::Cursor;

use super::{AudioBackend, AudioError, SoundBank};

/// Plays sounds on the default output device. Music runs on its own sink
/// so it can be paused without affecting sound effects.
pub struct RodioBackend {
    // Dropping the stream closes the device
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sounds: SoundBank,
    music: Option<Sink>,
}

impl RodioBackend {
    pub fn open(sounds: SoundBank) -> Result<Self, AudioError> {
        let (stream, handle) = OutputStream::try_default().map_err(stream_error)?;
        info!("Audio output opened");
        Ok(Self {
            _stream: stream,
            handle,
            sounds,
            music: None,
        })
    }
}

impl AudioBackend for RodioBackend {
    fn play_sound(&mut self, name: &str) {
        let Some(bytes) = self.sounds.get(name) else {
            return;
        };
        let result = Decoder::new(Cursor::new(bytes))
            .map_err(|e| e.to_string())
            .and_then(|source| {
                self.handle
                    .play_raw(source.convert_samples())
                    .map_err(|e| e.to_string())
            });
        if let Err(e) = result {
            warn!("Failed to play sound '{}': {}", name, e);
        }
    }

    fn play_music(&mut self, track: &str) {
        self.stop_music();
        let Some(bytes) = self.sounds.get(track) else {
            return;
        };
        let source = match Decoder::new_looped(Cursor::new(bytes)) {
            Ok(source) => source,
            Err(e) => {
                warn!("Failed to decode music '{}': {}", track, e);
                return;
            }
        };
        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.append(source);
                self.music = Some(sink);
            }
            Err(e) => warn!("Failed to start music '{}': {}", track, e),
        }
    }

    fn pause_music(&mut self) {
        if let Some(sink) = &self.music {
            sink.pause();
        }
    }

    fn resume_music(&mut self) {
        if let Some(sink) = &self.music {
            sink.play();
        }
    }

    fn stop_music(&mut self) {
        if let Some(sink) = self.music.take() {
            sink.stop();
        }
    }
}

/// A host with no output device is muted, not broken
fn stream_error(error: StreamError) -> AudioError {
    match error {
        StreamError::NoDevice => AudioError::Unavailable,
        other => AudioError::Device(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_device_is_unavailable() {
        assert!(matches!(
            stream_error(StreamError::NoDevice),
            AudioError::Unavailable
        ));
    }
}
