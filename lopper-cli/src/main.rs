//! # Lopper Entry Point
//!
//! Interactive terminal tool for reviewing local git branches and deleting the
//! ones you no longer need.

use std::process::ExitCode;

use clap::Parser;
use lopper_cli::cli::{self, Cli};
use lopper_cli::output::{apply_color_mode, print_error};
use lopper_cli::{logging, panic};
use tracing::{debug, error};

fn main() -> ExitCode {
  panic::install_panic_hook();

  let cmd = Cli::parse();
  apply_color_mode(cmd.colors);
  logging::init_tracing(cmd.verbose, cmd.log_file.as_deref());
  debug!("Starting lopper {}", env!("CARGO_PKG_VERSION"));

  match cli::handle_cli(cmd) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      error!("{err:#}");
      print_error(&format!("{err:#}"));
      ExitCode::FAILURE
    }
  }
}
