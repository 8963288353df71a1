//! # Logging
//!
//! The terminal belongs to the TUI, so tracing output goes to a log file.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use lopper_core::ConfigDirs;
use tracing::Level;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Map `-v` repetitions to a tracing level.
pub fn level_for_verbosity(verbose: u8) -> Level {
  match verbose {
    0 => Level::WARN,  // Default: warnings and errors
    1 => Level::INFO,  // -v: info, warnings, and errors
    2 => Level::DEBUG, // -vv: debug, info, warnings, and errors
    _ => Level::TRACE, // -vvv or more: trace and everything else
  }
}

/// Where logs go when `--log-file` is not given.
pub fn default_log_path() -> Option<PathBuf> {
  ConfigDirs::new().ok().map(|dirs| dirs.log_path())
}

fn open_log_file(path: &Path) -> io::Result<File> {
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  OpenOptions::new().create(true).append(true).open(path)
}

/// Initialize the tracing subscriber.
///
/// If the log file cannot be opened lopper runs without logging.
pub fn init_tracing(verbose: u8, log_file: Option<&Path>) {
  let level = level_for_verbosity(verbose);
  let path = log_file.map(Path::to_path_buf).or_else(default_log_path);
  let Some(file) = path.as_deref().and_then(|path| open_log_file(path).ok()) else {
    return;
  };

  let _ = tracing_subscriber::registry()
    .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
    .with(EnvFilter::from_default_env().add_directive(level.into()))
    .try_init();

  tracing::debug!("Tracing initialized with level: {}", level);
}
