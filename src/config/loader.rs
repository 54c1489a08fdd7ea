// Configuration file loading and creation

use super::types::Config;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Directory holding config.toml (and, by default, the audio assets)
pub fn config_dir() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("paddleball");
    path
}

/// Get the path to the configuration file
pub fn get_config_path() -> PathBuf {
    let path = config_dir();

    // Create config directory if it doesn't exist
    fs::create_dir_all(&path).ok();

    path.join("config.toml")
}

/// Load configuration from `path`, or create a default file there if it doesn't exist
pub fn load_config(path: &Path) -> Result<Config, io::Error> {
    let mut config = if path.exists() {
        let contents = fs::read_to_string(path)?;
        match toml::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: Failed to parse config file: {}", e);
                eprintln!("Using default configuration");
                Config::default()
            }
        }
    } else {
        create_default_config(path)?;
        Config::default()
    };

    if let Some(base) = path.parent() {
        resolve_paths(&mut config, base);
    }
    Ok(config)
}

/// Make relative asset paths relative to the directory of the config file
fn resolve_paths(config: &mut Config, base: &Path) {
    if config.audio.asset_dir.is_relative() {
        config.audio.asset_dir = base.join(&config.audio.asset_dir);
    }
}

/// Create a default configuration file with helpful comments
pub fn create_default_config(path: &Path) -> Result<(), io::Error> {
    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let commented_toml = format!(
        "# Paddleball Configuration File\n\
         # After editing, restart the game for changes to take effect\n\
         #\n\
         # audio.asset_dir must contain collision.ogg, score.ogg and music.ogg\n\
         # Colors: RGB values from 0-255\n\n\
         {}",
        toml_string
    );

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, commented_toml)?;
    println!("Created default config file at: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("paddleball-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_default_config_serialization() {
        let config = Config::default();
        let toml_string = toml::to_string_pretty(&config).unwrap();

        let parsed: Config = toml::from_str(&toml_string).unwrap();

        assert_eq!(parsed.display.target_fps, config.display.target_fps);
        assert_eq!(parsed.audio.asset_dir, config.audio.asset_dir);
        assert_eq!(parsed.audio.bell_min_volume, config.audio.bell_min_volume);
        assert_eq!(parsed.logging.level, config.logging.level);
    }

    #[test]
    fn test_partial_config_with_defaults() {
        let partial_toml = r#"
            [display]
            target_fps = 30
        "#;

        let config: Config = toml::from_str(partial_toml).unwrap();

        assert_eq!(config.display.target_fps, 30);
        assert!(config.display.show_hint);
        assert!(config.audio.bell);
        assert!(!config.logging.enabled);
    }

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let dir = scratch_dir("create");
        let path = dir.join("config.toml");

        let config = load_config(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config.display.target_fps, 60);
        assert_eq!(config.audio.asset_dir, dir.join("assets"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let dir = scratch_dir("invalid");
        let path = dir.join("config.toml");
        fs::write(&path, "display = 12 [[[").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.display.target_fps, 60);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_absolute_asset_dir_is_kept() {
        let dir = scratch_dir("absolute");
        let path = dir.join("config.toml");
        let assets = std::env::temp_dir().join("somewhere-else");
        fs::write(
            &path,
            format!("[audio]\nasset_dir = {:?}\n", assets.display().to_string()),
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.audio.asset_dir, assets);

        let _ = fs::remove_dir_all(&dir);
    }
}
