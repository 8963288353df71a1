//! Key bindings: decode crossterm key events into session actions.
//!
//! Decoding depends on the session state, so `y` means nothing while
//! browsing and `j` means nothing while confirming.

use crossterm::event::{KeyCode, KeyModifiers};
use lopper_core::{Action, SessionState};

/// Key legend for the help panel, in display order.
pub const KEY_HELP: [(&str, &str); 9] = [
  ("↑/k", "move up"),
  ("↓/j", "move down"),
  ("PgUp/PgDn", "move a page"),
  ("g/Home", "first branch"),
  ("G/End", "last branch"),
  ("space", "select/deselect"),
  ("d", "delete selected"),
  ("?", "toggle help"),
  ("q/Ctrl+C", "quit"),
];

/// One-line legend shown under the table.
pub const FOOTER_HELP: &str = "space: select • d: delete selected • q: quit • ↑/↓: navigate • ?: help";

/// Decode a key press for the current state.
pub fn action_for_key(state: &SessionState, code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
  let ctrl_c = code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL);

  match state {
    SessionState::Browsing => {
      if ctrl_c {
        return Some(Action::Quit);
      }
      match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::Home | KeyCode::Char('g') => Some(Action::Top),
        KeyCode::End | KeyCode::Char('G') => Some(Action::Bottom),
        KeyCode::Char(' ') => Some(Action::ToggleSelect),
        KeyCode::Char('d') => Some(Action::RequestDelete),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        _ => None,
      }
    }
    SessionState::ConfirmingDeletion(_) => {
      if ctrl_c {
        return Some(Action::Cancel);
      }
      match code {
        KeyCode::Char('y') | KeyCode::Char('Y') => Some(Action::Confirm),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::Cancel),
        _ => None,
      }
    }
  }
}
