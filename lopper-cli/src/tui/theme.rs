//! Styles for the branch table and confirmation dialog, built once at startup
//! and passed into rendering.

use ratatui::style::{Color, Modifier, Style};

use crate::output::ColorMode;

/// Immutable style table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
  pub title: Style,
  pub subtitle: Style,
  pub header: Style,
  pub border: Style,
  pub cursor: Style,
  pub selected: Style,
  pub merged: Style,
  pub unmerged: Style,
  pub protected: Style,
  pub error: Style,
  pub warning: Style,
  pub help: Style,
  pub dialog_border: Style,
}

impl Theme {
  /// The default 256-colour palette.
  pub fn colored() -> Self {
    Self {
      title: Style::new().fg(Color::Indexed(205)).add_modifier(Modifier::BOLD),
      subtitle: Style::new().fg(Color::Indexed(250)),
      header: Style::new().fg(Color::Indexed(212)).add_modifier(Modifier::BOLD),
      border: Style::new().fg(Color::Indexed(240)),
      cursor: Style::new().fg(Color::Indexed(229)).bg(Color::Indexed(57)),
      selected: Style::new().fg(Color::Indexed(170)).add_modifier(Modifier::BOLD),
      merged: Style::new().fg(Color::Indexed(34)),
      unmerged: Style::new().fg(Color::Indexed(208)),
      protected: Style::new()
        .fg(Color::Indexed(240))
        .add_modifier(Modifier::CROSSED_OUT),
      error: Style::new().fg(Color::Indexed(196)).add_modifier(Modifier::BOLD),
      warning: Style::new().fg(Color::Indexed(214)).add_modifier(Modifier::BOLD),
      help: Style::new().fg(Color::Indexed(241)),
      dialog_border: Style::new().fg(Color::Indexed(62)),
    }
  }

  /// No colours; emphasis only through modifiers.
  pub fn plain() -> Self {
    Self {
      title: Style::new().add_modifier(Modifier::BOLD),
      subtitle: Style::new(),
      header: Style::new().add_modifier(Modifier::BOLD),
      border: Style::new(),
      cursor: Style::new().add_modifier(Modifier::REVERSED),
      selected: Style::new().add_modifier(Modifier::BOLD),
      merged: Style::new(),
      unmerged: Style::new(),
      protected: Style::new().add_modifier(Modifier::DIM),
      error: Style::new().add_modifier(Modifier::BOLD),
      warning: Style::new().add_modifier(Modifier::BOLD),
      help: Style::new().add_modifier(Modifier::DIM),
      dialog_border: Style::new(),
    }
  }

  /// Pick a theme for the `--colors` setting.
  pub fn for_color_mode(mode: ColorMode) -> Self {
    if mode.enabled() { Self::colored() } else { Self::plain() }
  }
}

impl Default for Theme {
  fn default() -> Self {
    Self::colored()
  }
}
