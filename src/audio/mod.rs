//! Sound effects and background music.
//!
//! The game only decides *which* cue to play each frame; producing sound is
//! left to an [`AudioSink`].

mod assets;
mod sink;

pub use assets::{SoundBank, SoundBuffer};
pub use sink::{AudioSink, NullSink, TerminalBell};

use crate::game::FrameEvents;

pub const COLLISION_VOLUME: u8 = 100;
pub const SCORE_VOLUME: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Collision,
    Score,
}

impl Cue {
    pub fn volume(self) -> u8 {
        match self {
            Cue::Collision => COLLISION_VOLUME,
            Cue::Score => SCORE_VOLUME,
        }
    }

    /// The cue for a frame. There is a single voice, so a point beats a bounce.
    pub fn for_frame(events: &FrameEvents) -> Option<Cue> {
        if events.scored.is_some() {
            Some(Cue::Score)
        } else if events.collided() {
            Some(Cue::Collision)
        } else {
            None
        }
    }
}

/// Loaded sounds plus the device they are played on
pub struct Audio {
    bank: SoundBank,
    sink: Box<dyn AudioSink>,
}

impl Audio {
    pub fn new(bank: SoundBank, sink: Box<dyn AudioSink>) -> Self {
        Self { bank, sink }
    }

    pub fn play(&mut self, cue: Cue) {
        let buffer = match cue {
            Cue::Collision => &self.bank.collision,
            Cue::Score => &self.bank.score,
        };
        self.sink.play(buffer, cue.volume());
    }

    /// Play whatever the frame calls for, if anything
    pub fn play_frame(&mut self, events: &FrameEvents) {
        if let Some(cue) = Cue::for_frame(events) {
            self.play(cue);
        }
    }

    pub fn start_music(&mut self) {
        self.sink.start_music(&self.bank.music, true);
    }

    pub fn music_playing(&self) -> bool {
        self.sink.music_playing()
    }
}
