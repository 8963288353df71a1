//! # Output Formatting
//!
//! Coloured messages printed outside the TUI, for startup failures.

use owo_colors::OwoColorize;

/// Enum representing different color modes for output
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
  /// Enable colored output
  Yes,
  /// Enable colored output (alias for Yes)
  Always,
  /// Automatically detect if colors should be used based on terminal
  /// capabilities
  Auto,
  /// Disable colored output
  No,
  /// Disable colored output (alias for No)
  Never,
}

impl ColorMode {
  /// Whether colours should be used, resolving `Auto` from `NO_COLOR`.
  pub fn enabled(self) -> bool {
    match self {
      ColorMode::Yes | ColorMode::Always => true,
      ColorMode::No | ColorMode::Never => false,
      ColorMode::Auto => std::env::var_os("NO_COLOR").is_none_or(|value| value.is_empty()),
    }
  }
}

/// Set the global colour override for printed messages.
pub fn apply_color_mode(mode: ColorMode) {
  match mode {
    ColorMode::Always | ColorMode::Yes => owo_colors::set_override(true),
    ColorMode::Never | ColorMode::No => owo_colors::set_override(false),
    ColorMode::Auto => {
      // Let owo_colors use its default auto-detection
    }
  }
}

/// Helper function to safely get an emoji or fallback to a default character
pub fn get_emoji_or_default(name: &str, default: &str) -> String {
  match emojis::get_by_shortcode(name) {
    Some(emoji) => emoji.to_string(),
    None => default.to_string(),
  }
}

/// Print an error message
#[allow(clippy::print_stderr)]
pub fn print_error(message: &str) {
  let cross = get_emoji_or_default("x", "✗");
  eprintln!("{} {}", cross.red().bold(), message);
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_get_emoji_or_default() {
    let result = get_emoji_or_default("warning", "!");
    assert!(!result.is_empty());

    let result = get_emoji_or_default("not_a_real_emoji_name", "?");
    assert_eq!(result, "?");
  }

  #[test]
  fn test_explicit_color_modes() {
    assert!(ColorMode::Always.enabled());
    assert!(ColorMode::Yes.enabled());
    assert!(!ColorMode::Never.enabled());
    assert!(!ColorMode::No.enabled());
  }
}
