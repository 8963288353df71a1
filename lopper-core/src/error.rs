//! Error types for the lopper core.

use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the git facade and the deletion executor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LopperError {
  /// The working directory is not inside a git repository.
  #[error("{} is not a git repository", .0.display())]
  NotARepository(PathBuf),

  /// The git executable could not be found.
  #[error("git command not found in PATH")]
  ToolUnavailable,

  /// A git invocation failed; `diagnostic` carries git's own message.
  #[error("git {command} failed: {diagnostic}")]
  ExternalTool { command: String, diagnostic: String },

  /// Neither the safe nor the forced delete removed the branch.
  #[error("failed to delete branch {branch}: {diagnostic}")]
  DeleteFailed { branch: String, diagnostic: String },

  /// One or more deletions failed while continuing past errors.
  #[error("failed to delete {} branch(es): {}", .failures.len(), format_failures(.failures))]
  DeleteManyFailed { failures: Vec<(String, String)> },
}

impl LopperError {
  /// Build an [`LopperError::ExternalTool`] from git arguments and output.
  pub fn external(args: &[&str], diagnostic: impl Into<String>) -> Self {
    Self::ExternalTool {
      command: args.first().copied().unwrap_or_default().to_string(),
      diagnostic: diagnostic.into(),
    }
  }

  /// Names of the branches this error is about, if any.
  pub fn failed_branches(&self) -> Vec<&str> {
    match self {
      Self::DeleteFailed { branch, .. } => vec![branch.as_str()],
      Self::DeleteManyFailed { failures } => failures.iter().map(|(name, _)| name.as_str()).collect(),
      _ => Vec::new(),
    }
  }
}

fn format_failures(failures: &[(String, String)]) -> String {
  failures
    .iter()
    .map(|(branch, diagnostic)| format!("{branch} ({diagnostic})"))
    .collect::<Vec<_>>()
    .join(", ")
}

/// Result alias used throughout the core.
pub type Result<T> = std::result::Result<T, LopperError>;
