// src/infrastructure/audio.rs
use crate::application::AudioBackend;
use anyhow::Result;
use std::time::Instant;
use tracing::{debug, info};

/// Handle of a clip "playing" in the terminal
#[derive(Debug)]
pub struct TerminalClip {
    clip: String,
    started: Instant,
}

/// Audio backend for the terminal: announces themes in the log instead of
/// decoding audio.
#[derive(Debug)]
pub struct TerminalAudio {
    enabled: bool,
    master_volume: f32,
}

impl TerminalAudio {
    pub fn new(enabled: bool, master_volume: f32) -> Self {
        Self {
            enabled,
            master_volume: master_volume.clamp(0.0, 1.0),
        }
    }
}

impl AudioBackend for TerminalAudio {
    type Handle = TerminalClip;

    fn start(&mut self, clip: &str, volume: f32) -> Result<TerminalClip> {
        let volume = volume * self.master_volume;
        if self.enabled {
            info!(clip, volume, "♪ Now playing");
        }
        Ok(TerminalClip {
            clip: clip.to_string(),
            started: Instant::now(),
        })
    }

    fn release(&mut self, handle: TerminalClip) {
        debug!(
            clip = %handle.clip,
            played_ms = handle.started.elapsed().as_millis() as u64,
            "Released clip"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::AudioSession;

    #[test]
    fn given_terminal_backend_when_playing_then_session_holds_handle() {
        let mut session = AudioSession::new(TerminalAudio::new(true, 0.5));

        session.play("index.mp3", 0.3);

        assert!(session.is_playing());
        session.stop();
        assert!(!session.is_playing());
    }
}
