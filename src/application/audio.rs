// src/application/audio.rs
use anyhow::Result;
use tracing::warn;

/// Something that can start and release background playback
pub trait AudioBackend {
    type Handle;

    fn start(&mut self, clip: &str, volume: f32) -> Result<Self::Handle>;

    /// Stop playback and free the handle
    fn release(&mut self, handle: Self::Handle);
}

/// Exclusive playback: at most one clip is loaded at any time.
///
/// The handle is released when a new clip starts, on `stop`, and when the
/// session is dropped.
pub struct AudioSession<B: AudioBackend> {
    backend: B,
    current: Option<B::Handle>,
}

impl<B: AudioBackend> AudioSession<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            current: None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.current.is_some()
    }

    pub fn play(&mut self, clip: &str, volume: f32) {
        self.stop();
        match self.backend.start(clip, volume.clamp(0.0, 1.0)) {
            Ok(handle) => self.current = Some(handle),
            // A screen without sound is still usable
            Err(e) => warn!(clip, error = %e, "Could not start playback"),
        }
    }

    /// Play until the returned guard goes out of scope
    pub fn play_scoped(&mut self, clip: &str, volume: f32) -> PlaybackGuard<'_, B> {
        self.play(clip, volume);
        PlaybackGuard { session: self }
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.current.take() {
            self.backend.release(handle);
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: AudioBackend> Drop for AudioSession<B> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Stops the session's playback on drop
pub struct PlaybackGuard<'a, B: AudioBackend> {
    session: &'a mut AudioSession<B>,
}

impl<B: AudioBackend> PlaybackGuard<'_, B> {
    pub fn is_playing(&self) -> bool {
        self.session.is_playing()
    }
}

impl<B: AudioBackend> Drop for PlaybackGuard<'_, B> {
    fn drop(&mut self) {
        self.session.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::RecordingAudioBackend;

    #[test]
    fn given_playing_clip_when_playing_another_then_releases_first() {
        // Arrange
        let backend = RecordingAudioBackend::default();
        let events = backend.events();
        let mut session = AudioSession::new(backend);

        // Act
        session.play("index.mp3", 0.3);
        session.play("login.mp3", 0.2);

        // Assert
        assert_eq!(
            events.all(),
            vec!["start index.mp3", "release index.mp3", "start login.mp3"]
        );
        assert!(session.is_playing());
    }

    #[test]
    fn given_scoped_playback_when_guard_dropped_then_releases_clip() {
        let backend = RecordingAudioBackend::default();
        let events = backend.events();
        let mut session = AudioSession::new(backend);

        {
            let guard = session.play_scoped("logged.mp3", 0.2);
            assert!(guard.is_playing());
        }

        assert!(!session.is_playing());
        assert_eq!(events.all(), vec!["start logged.mp3", "release logged.mp3"]);
    }

    #[test]
    fn given_playing_session_when_dropped_then_releases_clip() {
        let backend = RecordingAudioBackend::default();
        let events = backend.events();

        {
            let mut session = AudioSession::new(backend);
            session.play("register.mp3", 0.2);
        }

        assert_eq!(events.all(), vec!["start register.mp3", "release register.mp3"]);
    }

    #[test]
    fn given_failing_backend_when_playing_then_session_stays_idle() {
        let mut session = AudioSession::new(RecordingAudioBackend::failing());

        session.play("index.mp3", 0.3);

        assert!(!session.is_playing());
    }

    #[test]
    fn given_nothing_playing_when_stopping_then_releases_nothing() {
        let backend = RecordingAudioBackend::default();
        let events = backend.events();
        let mut session = AudioSession::new(backend);

        session.stop();

        assert!(events.all().is_empty());
    }
}
