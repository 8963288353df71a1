//! # Branch Records
//!
//! The raw per-branch metadata produced by `git for-each-ref`, the classified
//! [`Branch`] entries shown to the user, and the parser that turns one into
//! the other.

use chrono::{DateTime, FixedOffset};
use tracing::warn;

use crate::consts::{COMMIT_DATE_FORMAT, RECORD_FIELDS, RECORD_SEPARATOR};

/// One local branch as listed by git, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBranch {
  pub name: String,
  pub author: String,
  pub last_commit_time: DateTime<FixedOffset>,
  pub last_commit_message: String,
}

/// A local branch with its merge status and divergence relative to the main
/// branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
  pub name: String,
  /// True for the resolved main branch. Never selectable.
  pub is_main: bool,
  /// Every commit of this branch is reachable from main. Always false for
  /// main itself.
  pub is_merged: bool,
  /// Commits reachable from this branch but not from main. Always 0 for main.
  pub commits_ahead: usize,
  pub last_commit_time: DateTime<FixedOffset>,
  pub last_commit_message: String,
  pub author: String,
  pub selected: bool,
}

impl Branch {
  /// Human readable merge status used by both the table and the dialog.
  pub fn status_label(&self) -> &'static str {
    if self.is_merged { "Merged" } else { "Unmerged" }
  }
}

/// Parse the output of `git for-each-ref` into raw branch records.
///
/// Lines with fewer than four `|`-separated fields are skipped. The subject is
/// everything after the third separator, so subjects containing `|` survive.
/// A date that does not parse is replaced with `now`.
pub fn parse_branch_records(output: &str, now: DateTime<FixedOffset>) -> Vec<RawBranch> {
  output
    .lines()
    .filter_map(|line| parse_branch_record(line, now))
    .collect()
}

fn parse_branch_record(line: &str, now: DateTime<FixedOffset>) -> Option<RawBranch> {
  let fields: Vec<&str> = line.splitn(RECORD_FIELDS, RECORD_SEPARATOR).collect();
  if fields.len() < RECORD_FIELDS {
    if !line.trim().is_empty() {
      warn!("Skipping malformed branch record: {line:?}");
    }
    return None;
  }

  let last_commit_time = parse_commit_date(fields[2]).unwrap_or_else(|| {
    warn!("Unparsable commit date {:?} for branch {}, using current time", fields[2], fields[0]);
    now
  });

  Some(RawBranch {
    name: fields[0].to_string(),
    author: fields[1].to_string(),
    last_commit_time,
    last_commit_message: fields[3].to_string(),
  })
}

/// Parse a `YYYY-MM-DD HH:MM:SS ±HHMM` commit date.
pub fn parse_commit_date(value: &str) -> Option<DateTime<FixedOffset>> {
  DateTime::parse_from_str(value.trim(), COMMIT_DATE_FORMAT).ok()
}
