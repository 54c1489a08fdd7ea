// Audio output devices

use std::io::Write;

use super::SoundBuffer;

/// Something that can make noise
pub trait AudioSink {
    /// Play a one-shot effect; `volume` is 0-100. Starting a new effect cuts off the previous one.
    fn play(&mut self, sound: &SoundBuffer, volume: u8);

    /// Start the background track
    fn start_music(&mut self, music: &SoundBuffer, looping: bool);

    fn music_playing(&self) -> bool;
}

/// Discards everything (audio disabled)
#[derive(Debug, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, _sound: &SoundBuffer, _volume: u8) {}

    fn start_music(&mut self, _music: &SoundBuffer, _looping: bool) {}

    fn music_playing(&self) -> bool {
        false
    }
}

const BELL: &[u8] = b"\x07";

/// Rings the terminal bell for loud enough effects.
///
/// A terminal cannot decode Ogg, so music is tracked but not rendered.
pub struct TerminalBell<W: Write> {
    out: W,
    min_volume: u8,
    music_looping: bool,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W, min_volume: u8) -> Self {
        Self {
            out,
            min_volume,
            music_looping: false,
        }
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, sound: &SoundBuffer, volume: u8) {
        if volume < self.min_volume {
            tracing::trace!(sound = sound.name, volume, "below bell threshold");
            return;
        }

        if let Err(e) = self.out.write_all(BELL).and_then(|_| self.out.flush()) {
            tracing::warn!(sound = sound.name, error = %e, "failed to ring bell");
        }
    }

    fn start_music(&mut self, music: &SoundBuffer, looping: bool) {
        tracing::info!(track = music.name, looping, "background music started");
        self.music_looping = looping;
    }

    fn music_playing(&self) -> bool {
        self.music_looping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(name: &'static str) -> SoundBuffer {
        SoundBuffer {
            name,
            bytes: b"OggS".to_vec(),
        }
    }

    #[test]
    fn test_bell_respects_volume_threshold() {
        let mut bell = TerminalBell::new(Vec::new(), 50);

        bell.play(&buffer("collision.ogg"), 100);
        bell.play(&buffer("score.ogg"), 10);
        bell.play(&buffer("collision.ogg"), 50);

        assert_eq!(bell.out, b"\x07\x07".to_vec());
    }

    #[test]
    fn test_bell_tracks_music() {
        let mut bell = TerminalBell::new(Vec::new(), 0);
        assert!(!bell.music_playing());

        bell.start_music(&buffer("music.ogg"), true);
        assert!(bell.music_playing());
        assert!(bell.out.is_empty());
    }

    #[test]
    fn test_null_sink_is_silent() {
        let mut sink = NullSink;
        sink.start_music(&buffer("music.ogg"), true);
        sink.play(&buffer("score.ogg"), 100);
        assert!(!sink.music_playing());
    }
}
