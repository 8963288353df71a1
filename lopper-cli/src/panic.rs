//! # Panic Handling
//!
//! A panic while the TUI owns the terminal would leave the shell in raw mode
//! on the alternate screen. The hook restores the terminal first, then prints
//! a short notice and hands over to the default hook.

use std::panic;

use owo_colors::OwoColorize;

use crate::output::get_emoji_or_default;
use crate::tui::restore_terminal;

/// Install the terminal-restoring panic hook.
pub fn install_panic_hook() {
  let default_hook = panic::take_hook();
  panic::set_hook(Box::new(move |info| {
    let _ = restore_terminal();
    report_panic();
    default_hook(info);
  }));
}

#[allow(clippy::print_stderr)]
fn report_panic() {
  let cross = get_emoji_or_default("boom", "✗");
  eprintln!(
    "\n{} {}",
    cross.red().bold(),
    "lopper crashed and restored your terminal.".bold()
  );
  eprintln!("Please report this issue along with the details below.\n");
}
