// Sound asset loading

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const COLLISION_FILE: &str = "collision.ogg";
pub const SCORE_FILE: &str = "score.ogg";
pub const MUSIC_FILE: &str = "music.ogg";

// Every Ogg stream starts with this capture pattern
const OGG_MAGIC: &[u8; 4] = b"OggS";

#[derive(Debug)]
pub enum AssetError {
    Missing { path: PathBuf, source: io::Error },
    Corrupt { path: PathBuf, reason: &'static str },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Missing { path, source } => {
                write!(f, "failed to load {}: {}", path.display(), source)
            }
            AssetError::Corrupt { path, reason } => {
                write!(f, "failed to load {}: {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetError::Missing { source, .. } => Some(source),
            AssetError::Corrupt { .. } => None,
        }
    }
}

/// Raw encoded audio, handed as-is to the output sink
#[derive(Debug, Clone)]
pub struct SoundBuffer {
    pub name: &'static str,
    pub bytes: Vec<u8>,
}

impl SoundBuffer {
    pub fn load(dir: &Path, name: &'static str) -> Result<Self, AssetError> {
        let path = dir.join(name);
        let bytes = fs::read(&path).map_err(|source| AssetError::Missing {
            path: path.clone(),
            source,
        })?;

        if bytes.is_empty() {
            return Err(AssetError::Corrupt {
                path,
                reason: "file is empty",
            });
        }
        if !bytes.starts_with(OGG_MAGIC) {
            return Err(AssetError::Corrupt {
                path,
                reason: "not an Ogg stream",
            });
        }

        Ok(Self { name, bytes })
    }
}

/// All sounds the game needs, loaded up front
#[derive(Debug, Clone)]
pub struct SoundBank {
    pub collision: SoundBuffer,
    pub score: SoundBuffer,
    pub music: SoundBuffer,
}

impl SoundBank {
    pub fn load(dir: &Path) -> Result<Self, AssetError> {
        let bank = Self {
            collision: SoundBuffer::load(dir, COLLISION_FILE)?,
            score: SoundBuffer::load(dir, SCORE_FILE)?,
            music: SoundBuffer::load(dir, MUSIC_FILE)?,
        };

        tracing::info!(
            dir = %dir.display(),
            collision_bytes = bank.collision.bytes.len(),
            score_bytes = bank.score.bytes.len(),
            music_bytes = bank.music.bytes.len(),
            "sound assets loaded"
        );
        Ok(bank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("paddleball-assets-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_ogg(dir: &Path, name: &str) {
        let mut bytes = OGG_MAGIC.to_vec();
        bytes.extend_from_slice(&[0u8; 60]);
        fs::write(dir.join(name), bytes).unwrap();
    }

    fn complete_asset_dir(name: &str) -> PathBuf {
        let dir = asset_dir(name);
        for file in [COLLISION_FILE, SCORE_FILE, MUSIC_FILE] {
            write_ogg(&dir, file);
        }
        dir
    }

    #[test]
    fn test_load_complete_bank() {
        let dir = complete_asset_dir("complete");

        let bank = SoundBank::load(&dir).unwrap();
        assert_eq!(bank.collision.name, COLLISION_FILE);
        assert_eq!(bank.music.bytes.len(), 64);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file_is_named_in_error() {
        let dir = asset_dir("missing");
        write_ogg(&dir, COLLISION_FILE);
        write_ogg(&dir, MUSIC_FILE);

        let err = SoundBank::load(&dir).unwrap_err();
        assert!(matches!(err, AssetError::Missing { .. }));
        assert!(err.to_string().contains(SCORE_FILE));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_empty_and_foreign_files_are_corrupt() {
        let dir = asset_dir("corrupt");
        fs::write(dir.join(COLLISION_FILE), b"").unwrap();
        fs::write(dir.join(SCORE_FILE), b"RIFF....WAVE").unwrap();

        let err = SoundBuffer::load(&dir, COLLISION_FILE).unwrap_err();
        assert!(err.to_string().contains("empty"));

        let err = SoundBuffer::load(&dir, SCORE_FILE).unwrap_err();
        assert!(matches!(err, AssetError::Corrupt { reason: "not an Ogg stream", .. }));

        let _ = fs::remove_dir_all(&dir);
    }
}
