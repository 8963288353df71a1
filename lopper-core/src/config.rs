//! # Configuration Management
//!
//! Locates lopper's config and data directories and loads the optional
//! `config.toml`. Every field has a default, so a missing file or a partial
//! one is valid.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts;
use crate::delete::DeleteMode;
use crate::git::RepositoryOptions;

/// The configuration directories for the lopper application
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
  pub data_dir: PathBuf,
}

impl ConfigDirs {
  /// Resolve the platform's project directories.
  pub fn new() -> Result<Self> {
    let proj_dirs = ProjectDirs::from("", "", "lopper").context("Failed to determine project directories")?;

    Ok(Self {
      config_dir: proj_dirs.config_dir().to_path_buf(),
      data_dir: proj_dirs.data_dir().to_path_buf(),
    })
  }

  /// Get the path to the configuration file
  pub fn config_path(&self) -> PathBuf {
    self.config_dir.join(consts::CONFIG_FILE_NAME)
  }

  /// Get the path to the default log file
  pub fn log_path(&self) -> PathBuf {
    self.data_dir.join("lopper.log")
  }
}

/// Settings read from `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LopperConfig {
  /// Remote whose `HEAD` names the main branch.
  pub remote: String,
  /// Local branches tried, in order, when the remote pointer is unusable.
  pub fallback_branches: Vec<String>,
  /// Main branch name when nothing else resolves.
  pub default_branch: String,
  /// Keep deleting after a failure and report every failed branch.
  pub continue_on_error: bool,
  /// Rows moved by page-up/page-down.
  pub page_size: usize,
}

impl Default for LopperConfig {
  fn default() -> Self {
    let options = RepositoryOptions::default();
    Self {
      remote: options.remote,
      fallback_branches: options.fallback_branches,
      default_branch: options.default_branch,
      continue_on_error: false,
      page_size: consts::DEFAULT_PAGE_SIZE,
    }
  }
}

impl LopperConfig {
  /// Load the config file at `path`, or the defaults if it does not exist.
  pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    if !path.exists() {
      debug!("No config file at {}, using defaults", path.display());
      return Ok(Self::default());
    }

    let contents = fs::read_to_string(path).with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: Self =
      toml::from_str(&contents).with_context(|| format!("Failed to parse config from {}", path.display()))?;
    debug!("Loaded config from {}", path.display());

    Ok(config)
  }

  /// Load `config.toml` from the user's config directory.
  pub fn load(config_dirs: &ConfigDirs) -> Result<Self> {
    Self::load_from_path(config_dirs.config_path())
  }

  /// Options for the git facade.
  pub fn repository_options(&self) -> RepositoryOptions {
    RepositoryOptions {
      remote: self.remote.clone(),
      fallback_branches: self.fallback_branches.clone(),
      default_branch: self.default_branch.clone(),
    }
  }

  /// The configured deletion mode.
  pub fn delete_mode(&self) -> DeleteMode {
    if self.continue_on_error {
      DeleteMode::ContinueOnError
    } else {
      DeleteMode::FailFast
    }
  }
}
