// Paddleball configuration types
// Only presentation, audio output and logging are configurable; gameplay is fixed

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    // Frame rate cap; physics advances one step per frame
    pub target_fps: u64,

    // Field background (RGB values 0-255)
    pub background_color: [u8; 3],

    // Show the controls hint under the field
    pub show_hint: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            background_color: [0, 0, 0],
            show_hint: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AudioConfig {
    // Directory holding collision.ogg, score.ogg and music.ogg.
    // Relative paths are resolved against the config directory.
    pub asset_dir: PathBuf,

    // Ring the terminal bell for sound cues
    pub bell: bool,

    // Cues quieter than this (0-100) stay silent on the bell
    pub bell_min_volume: u8,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("assets"),
            bell: true,
            bell_min_volume: 50,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    // Write a debug log (same as passing --debug)
    pub enabled: bool,

    // Log file location; the terminal is owned by the game
    pub file: PathBuf,

    // tracing filter directive, e.g. "debug" or "paddleball=info"
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            file: std::env::temp_dir().join("paddleball-debug.log"),
            level: "debug".to_string(),
        }
    }
}
