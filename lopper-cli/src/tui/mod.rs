//! # Terminal UI
//!
//! Owns the terminal for the lifetime of a session: raw mode and the
//! alternate screen on the way in, both restored on the way out.

pub mod keys;
pub mod theme;
pub mod view;

use std::io;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use crossterm::{cursor, execute};
use lopper_core::{BranchQueries, Session, Transition};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::widgets::TableState;
pub use theme::Theme;
use tracing::debug;

/// Run the interactive loop until the user quits. The terminal is restored
/// whether the loop ends normally or with an error.
pub fn run<Q: BranchQueries>(session: Session<Q>, theme: &Theme) -> Result<()> {
  enable_raw_mode()?;
  let result = enter_and_run(session, theme);
  let restored = restore_terminal();

  result?;
  restored?;
  Ok(())
}

fn enter_and_run<Q: BranchQueries>(session: Session<Q>, theme: &Theme) -> Result<()> {
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen)?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend)?;

  run_app(&mut terminal, session, theme)
}

fn run_app<Q: BranchQueries>(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  mut session: Session<Q>,
  theme: &Theme,
) -> Result<()> {
  let mut table_state = TableState::default();

  loop {
    terminal.draw(|frame| view::render(frame, &session, theme, &mut table_state))?;

    let Event::Key(key) = event::read()? else {
      continue;
    };
    if key.kind != KeyEventKind::Press {
      continue;
    }

    let Some(action) = keys::action_for_key(session.state(), key.code, key.modifiers) else {
      continue;
    };
    debug!("Key {:?} -> {action:?}", key.code);

    if session.handle(action) == Transition::Quit {
      return Ok(());
    }
  }
}

/// Leave raw mode and the alternate screen. Safe to call when neither is
/// active.
pub fn restore_terminal() -> io::Result<()> {
  disable_raw_mode()?;
  execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)
}
