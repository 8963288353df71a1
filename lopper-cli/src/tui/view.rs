//! Rendering of the branch table, the error banner, the help panel, and the
//! confirmation dialog.

use lopper_core::{Branch, BranchQueries, PendingDeletion, Session, SessionState};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
  Block, BorderType, Borders, Cell, Clear, Padding, Paragraph, Row, Table, TableState, Wrap,
};

use super::keys::{FOOTER_HELP, KEY_HELP};
use super::theme::Theme;

const TITLE: &str = "Lopper: Git Branch Cleaner";
const MESSAGE_WIDTH: usize = 30;
const DIALOG_WIDTH: u16 = 50;

/// Draw the whole screen for the session's current state.
pub fn render<Q: BranchQueries>(frame: &mut Frame, session: &Session<Q>, theme: &Theme, table_state: &mut TableState) {
  let error_height = u16::from(session.visible_error().is_some());
  let help_height = if session.show_help() {
    u16::try_from(KEY_HELP.len()).unwrap_or(u16::MAX).saturating_add(2)
  } else {
    1
  };

  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1),
      Constraint::Length(1),
      Constraint::Length(error_height),
      Constraint::Min(3),
      Constraint::Length(help_height),
    ])
    .split(frame.area());

  frame.render_widget(Paragraph::new(Span::styled(TITLE, theme.title)), chunks[0]);
  frame.render_widget(Paragraph::new(repository_line(session, theme)), chunks[1]);

  if let Some(err) = session.visible_error() {
    frame.render_widget(
      Paragraph::new(Span::styled(format!("Error: {err}"), theme.error)),
      chunks[2],
    );
  }

  render_branch_table(frame, session, theme, table_state, chunks[3]);

  if session.show_help() {
    render_help_panel(frame, theme, chunks[4]);
  } else {
    frame.render_widget(Paragraph::new(Span::styled(FOOTER_HELP, theme.help)), chunks[4]);
  }

  if let SessionState::ConfirmingDeletion(pending) = session.state() {
    render_confirm_dialog(frame, pending, theme);
  }
}

fn repository_line<Q: BranchQueries>(session: &Session<Q>, theme: &Theme) -> Line<'static> {
  let root = session
    .repository_root()
    .map(|path| path.display().to_string())
    .unwrap_or_else(|| "Unknown".to_string());

  Line::from(vec![
    Span::styled(format!("Repository: {root}"), theme.subtitle),
    Span::styled(format!("  (main: {})", session.main_branch()), theme.help),
  ])
}

fn render_branch_table<Q: BranchQueries>(
  frame: &mut Frame,
  session: &Session<Q>,
  theme: &Theme,
  table_state: &mut TableState,
  area: Rect,
) {
  let block = Block::default().borders(Borders::ALL).border_style(theme.border);
  let store = session.store();

  if store.is_empty() {
    frame.render_widget(
      Paragraph::new(Span::styled("No local branches found.", theme.help)).block(block),
      area,
    );
    return;
  }

  let header = Row::new(["Select", "Branch", "Status", "Date", "Commits", "Message"]).style(theme.header);
  let rows = store.branches().iter().map(|branch| branch_row(branch, theme));
  let widths = [
    Constraint::Length(8),
    Constraint::Min(25),
    Constraint::Length(10),
    Constraint::Length(12),
    Constraint::Length(8),
    Constraint::Length(MESSAGE_WIDTH as u16),
  ];

  let table = Table::new(rows, widths)
    .header(header)
    .block(block)
    .row_highlight_style(theme.cursor);

  table_state.select(Some(store.cursor()));
  frame.render_stateful_widget(table, area, table_state);
}

/// Build the table row for one branch.
fn branch_row<'a>(branch: &'a Branch, theme: &Theme) -> Row<'a> {
  let (checkbox, status, commits) = if branch.is_main {
    ("[-]", Cell::from("-"), "-".to_string())
  } else {
    let status_style = if branch.is_merged { theme.merged } else { theme.unmerged };
    let checkbox = if branch.selected { "[x]" } else { "[ ]" };
    (
      checkbox,
      Cell::from(Span::styled(branch.status_label(), status_style)),
      format!("{}↑", branch.commits_ahead),
    )
  };

  let row_style = if branch.is_main {
    theme.protected
  } else if branch.selected {
    theme.selected
  } else {
    Style::default()
  };

  Row::new(vec![
    Cell::from(checkbox),
    Cell::from(branch.name.as_str()),
    status,
    Cell::from(branch.last_commit_time.format("%Y-%m-%d").to_string()),
    Cell::from(commits),
    Cell::from(truncate_message(&branch.last_commit_message, MESSAGE_WIDTH)),
  ])
  .style(row_style)
}

fn render_help_panel(frame: &mut Frame, theme: &Theme, area: Rect) {
  let lines: Vec<Line> = KEY_HELP
    .iter()
    .map(|(key, description)| {
      Line::from(vec![
        Span::styled(format!("{key:>10}"), theme.header),
        Span::styled(format!("  {description}"), theme.help),
      ])
    })
    .collect();

  let block = Block::default()
    .borders(Borders::ALL)
    .border_style(theme.border)
    .title(" Keys ");
  frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Lines of the confirmation dialog body.
pub fn confirm_dialog_lines<'a>(pending: &'a PendingDeletion, theme: &Theme) -> Vec<Line<'a>> {
  let mut lines = vec![Line::from("The following branches will be deleted:"), Line::from("")];

  for branch in pending.branches() {
    let status_style = if branch.is_merged { theme.merged } else { theme.unmerged };
    lines.push(Line::from(vec![
      Span::raw(format!("• {} (", branch.name)),
      Span::styled(branch.status_label(), status_style),
      Span::raw(")"),
    ]));
  }

  if pending.has_unmerged() {
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
      "⚠ Warning: Some branches are unmerged!",
      theme.warning,
    )));
  }

  lines.push(Line::from(""));
  lines.push(Line::from("Continue? (y/N)"));
  lines
}

fn render_confirm_dialog(frame: &mut Frame, pending: &PendingDeletion, theme: &Theme) {
  let lines = confirm_dialog_lines(pending, theme);
  let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(4);
  let area = centered_rect(frame.area(), DIALOG_WIDTH, height);

  let block = Block::default()
    .borders(Borders::ALL)
    .border_type(BorderType::Rounded)
    .border_style(theme.dialog_border)
    .title(" Confirm deletion ");

  frame.render_widget(Clear, area);
  frame.render_widget(
    Paragraph::new(lines)
      .block(block.padding(Padding::new(2, 2, 1, 1)))
      .wrap(Wrap { trim: false }),
    area,
  );
}

/// A `width` x `height` rectangle centred in `area`, shrunk to fit.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
  let width = width.min(area.width);
  let height = height.min(area.height);

  Rect {
    x: area.x + (area.width - width) / 2,
    y: area.y + (area.height - height) / 2,
    width,
    height,
  }
}

/// Shorten `message` to at most `max_chars` characters, ending in `...`
/// when cut.
pub fn truncate_message(message: &str, max_chars: usize) -> String {
  if message.chars().count() <= max_chars {
    return message.to_string();
  }

  let kept: String = message.chars().take(max_chars.saturating_sub(3)).collect();
  format!("{kept}...")
}
