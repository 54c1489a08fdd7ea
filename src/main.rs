mod audio;
mod config;
mod debug;
mod game;
mod game_loop;
mod ui;

use anyhow::{Context, Result};
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;

use audio::{Audio, AudioSink, NullSink, SoundBank, TerminalBell};
use game::input::DEFAULT_RELEASE_TIMEOUT;
use game::{KeyTracker, ReleaseMode};
use game_loop::GameLoop;

/// Command line options
#[derive(Debug, Default, PartialEq)]
struct Args {
    debug: bool,
    config_path: Option<PathBuf>,
}

fn main() -> Result<()> {
    let raw: Vec<String> = std::env::args().collect();
    let args = parse_args(&raw)?;

    let config_path = args.config_path.clone().unwrap_or_else(config::get_config_path);
    let config = config::load_config(&config_path)
        .with_context(|| format!("failed to read config {}", config_path.display()))?;

    debug::init(
        args.debug || config.logging.enabled,
        &config.logging.file,
        &config.logging.level,
    )
    .context("failed to start debug log")?;
    tracing::info!(config = %config_path.display(), "session start");

    // Missing or broken assets abort before the terminal is touched
    let bank = SoundBank::load(&config.audio.asset_dir).context("cannot start without sound assets")?;
    let sink: Box<dyn AudioSink> = if config.audio.bell {
        Box::new(TerminalBell::new(io::stdout(), config.audio.bell_min_volume))
    } else {
        Box::new(NullSink)
    };
    let mut game_loop = GameLoop::new(StdRng::from_entropy(), Audio::new(bank, sink));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Real key releases where the terminal can report them, timeouts otherwise
    let enhanced = supports_keyboard_enhancement().unwrap_or(false);
    let release_mode = if enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
        ReleaseMode::Native
    } else {
        ReleaseMode::Timeout(DEFAULT_RELEASE_TIMEOUT)
    };
    let mut tracker = KeyTracker::new(release_mode);

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = game_loop::run(&mut terminal, &mut game_loop, &mut tracker, &config.display);

    // Restore terminal
    if enhanced {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.context("game loop failed")
}

/// Parse command line arguments
fn parse_args(args: &[String]) -> Result<Args> {
    let program = args.first().map(String::as_str).unwrap_or("paddleball");
    let mut parsed = Args::default();
    let mut rest = args.iter().skip(1);

    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--debug" | "-d" => parsed.debug = true,
            "--config" | "-c" => {
                let path = rest
                    .next()
                    .with_context(|| format!("{} requires a path", arg))?;
                parsed.config_path = Some(PathBuf::from(path));
            }
            "--help" | "-h" => {
                print_usage(program);
                std::process::exit(0);
            }
            other => {
                print_usage(program);
                anyhow::bail!("unknown argument: {}", other);
            }
        }
    }

    Ok(parsed)
}

fn print_usage(program: &str) {
    println!("Paddleball - two-paddle terminal ball game");
    println!();
    println!("Usage:");
    println!("  {} [--debug] [--config <path>]", program);
    println!();
    println!("Options:");
    println!("  -d, --debug            Write a debug log (see logging.file in the config)");
    println!("  -c, --config <path>    Use this config file instead of the default");
    println!("  -h, --help             Show this message");
    println!();
    println!("Controls:");
    println!("  W / S       Left paddle up / down");
    println!("  Up / Down   Right paddle up / down");
    println!("  Esc         Quit");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_arguments() {
        assert_eq!(parse_args(&args(&["paddleball"])).unwrap(), Args::default());
    }

    #[test]
    fn test_debug_and_config() {
        let parsed = parse_args(&args(&["paddleball", "-d", "--config", "/tmp/p.toml"])).unwrap();
        assert!(parsed.debug);
        assert_eq!(parsed.config_path, Some(PathBuf::from("/tmp/p.toml")));
    }

    #[test]
    fn test_bad_arguments() {
        assert!(parse_args(&args(&["paddleball", "--config"])).is_err());
        assert!(parse_args(&args(&["paddleball", "--network"])).is_err());
    }
}
