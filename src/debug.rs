// Debug logging for Paddleball
// The TUI owns the terminal, so tracing output goes to a file (--debug flag)

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;

use tracing_subscriber::EnvFilter;

/// Initialize debug logging to file
///
/// # Behavior
/// - If enabled=false: Returns immediately, no file created, tracing events are dropped
/// - If enabled=true: Truncates the log file, writes a header and installs a
///   global `tracing` subscriber filtered by `level` (overridden by `RUST_LOG`)
pub fn init(enabled: bool, path: &Path, level: &str) -> io::Result<()> {
    if !enabled {
        return Ok(());
    }

    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;

    writeln!(file, "=== Paddleball Debug Log ===")?;
    writeln!(file, "Session started: {:?}", SystemTime::now())?;
    writeln!(file, "To monitor: tail -f {}", path.display())?;
    writeln!(file, "========================================\n")?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    Ok(())
}
