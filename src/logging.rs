//! Trace output.
//!
//! The terminal is in raw mode on the alternate screen while the game runs,
//! so log lines go to a file instead of stderr.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Install the global subscriber writing to `path`.
///
/// `RUST_LOG` takes precedence; otherwise `verbose` selects debug level and
/// the default is info.
pub fn init(verbose: bool, path: &Path) -> io::Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    // `try_init` only fails if a subscriber was already set; keep the first.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}
