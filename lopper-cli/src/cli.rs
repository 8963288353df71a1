//! # Command Line Interface
//!
//! Parses arguments, merges them over `config.toml`, validates the
//! repository, and hands a started session to the TUI.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser};
use lopper_core::{ConfigDirs, GitCli, LopperConfig, Session};
use tracing::{debug, info};

use crate::output::ColorMode;
use crate::tui::{self, Theme};

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("LOPPER_GIT_HASH"), ")");

/// Interactively review local branches and delete the stale ones
#[derive(Parser, Debug)]
#[command(name = "lopper")]
#[command(about = "Interactively review and delete local git branches")]
#[command(
  long_about = "Lopper lists the local branches of a git repository, newest first, with their\n\
        merge status and how many commits each is ahead of the main branch.\n\n\
        Select branches with space and press d to delete them. Merged branches are\n\
        removed with `git branch -d`; anything git refuses is retried with\n\
        `git branch -D` after you confirm. The main branch can never be selected."
)]
#[command(version = VERSION)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    long_help = "Sets the level of verbosity for the log file.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Repository to operate on (defaults to the current directory)
  #[arg(short = 'C', long = "repo", value_name = "PATH")]
  pub repo: Option<PathBuf>,

  /// Remote whose HEAD names the main branch
  #[arg(long, value_name = "NAME")]
  pub remote: Option<String>,

  /// Keep deleting after a failure and report every failed branch
  #[arg(long = "continue-on-error")]
  pub continue_on_error: bool,

  /// Read settings from this file instead of the default config.toml
  #[arg(long, value_name = "PATH")]
  pub config: Option<PathBuf>,

  /// Write logs to this file instead of the default data directory
  #[arg(long = "log-file", value_name = "PATH")]
  pub log_file: Option<PathBuf>,
}

impl Cli {
  /// Load the config file and apply command line overrides.
  pub fn resolve_config(&self) -> Result<LopperConfig> {
    let mut config = match &self.config {
      Some(path) => LopperConfig::load_from_path(path)?,
      None => match ConfigDirs::new() {
        Ok(dirs) => LopperConfig::load(&dirs)?,
        Err(err) => {
          debug!("No config directory available ({err:#}), using defaults");
          LopperConfig::default()
        }
      },
    };

    if let Some(remote) = &self.remote {
      config.remote = remote.clone();
    }
    if self.continue_on_error {
      config.continue_on_error = true;
    }

    Ok(config)
  }

  /// The repository path to open.
  pub fn repository_path(&self) -> Result<PathBuf> {
    match &self.repo {
      Some(path) => Ok(path.clone()),
      None => env::current_dir().context("Failed to determine the current directory"),
    }
  }
}

/// Run lopper for the parsed command line.
pub fn handle_cli(cli: Cli) -> Result<()> {
  let config = cli.resolve_config()?;
  let repo_path = cli.repository_path()?;
  debug!("Opening repository at {}", repo_path.display());

  let queries = GitCli::open(&repo_path, config.repository_options())?;
  let session = Session::start(queries)
    .context("Failed to list branches")?
    .with_delete_mode(config.delete_mode())
    .with_page_size(config.page_size);
  info!(
    "Loaded {} branches, main branch is {}",
    session.store().len(),
    session.main_branch()
  );

  let theme = Theme::for_color_mode(cli.colors);
  tui::run(session, &theme)
}
