//! # Git Query Facade
//!
//! Typed wrappers around the `git` sub-processes lopper needs. The
//! [`BranchQueries`] trait is the seam between the workflow and git so that
//! classification, deletion, and the session can be exercised without a real
//! repository; [`GitCli`] is the process-backed implementation.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::Local;
use tracing::{debug, trace, warn};

use crate::branch::{RawBranch, parse_branch_records};
use crate::consts;
use crate::error::{LopperError, Result};

/// Queries and mutations lopper performs against a repository.
pub trait BranchQueries {
  /// List every local branch with its last-commit metadata.
  fn list_branches(&self) -> Result<Vec<RawBranch>>;

  /// Name of the repository's main branch. The returned name does not have to
  /// exist locally.
  fn resolve_main_branch(&self) -> Result<String>;

  /// Whether every commit of `branch` is reachable from `of_branch`. Always
  /// false when both names are equal.
  fn is_ancestor(&self, branch: &str, of_branch: &str) -> Result<bool>;

  /// Commits reachable from `branch` but not from `of_branch`. Failures are
  /// reported as 0.
  fn count_ahead(&self, branch: &str, of_branch: &str) -> usize;

  /// Run a single `git branch -d` (or `-D` when `force` is set).
  fn delete_ref(&self, name: &str, force: bool) -> Result<()>;

  /// Absolute path of the working tree's top level.
  fn repository_root(&self) -> Result<PathBuf>;

  /// Delete a branch, escalating from a safe delete to a forced one.
  ///
  /// The error, if any, names the branch and carries the forced delete's
  /// diagnostic.
  fn delete_branch(&self, name: &str) -> Result<()> {
    match self.delete_ref(name, false) {
      Ok(()) => Ok(()),
      Err(safe_err) => {
        debug!("Safe delete of {name} refused ({safe_err}), retrying with force");
        self.delete_ref(name, true).map_err(|err| LopperError::DeleteFailed {
          branch: name.to_string(),
          diagnostic: diagnostic_of(err),
        })
      }
    }
  }
}

fn diagnostic_of(err: LopperError) -> String {
  match err {
    LopperError::ExternalTool { diagnostic, .. } | LopperError::DeleteFailed { diagnostic, .. } => diagnostic,
    other => other.to_string(),
  }
}

/// Settings that steer main-branch resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOptions {
  /// Remote whose `HEAD` symbolic ref is consulted first.
  pub remote: String,
  /// Local branch names tried in order after the remote pointer.
  pub fallback_branches: Vec<String>,
  /// Name returned when nothing else resolves.
  pub default_branch: String,
}

impl Default for RepositoryOptions {
  fn default() -> Self {
    Self {
      remote: consts::DEFAULT_REMOTE.to_string(),
      fallback_branches: consts::DEFAULT_FALLBACK_BRANCHES
        .iter()
        .map(|name| name.to_string())
        .collect(),
      default_branch: consts::DEFAULT_MAIN_BRANCH.to_string(),
    }
  }
}

/// Pick the main branch name.
///
/// The remote's default-branch pointer wins if a local branch of that name
/// exists, then the first existing fallback candidate, then the literal
/// default.
pub fn choose_main_branch(
  remote_head: Option<&str>,
  options: &RepositoryOptions,
  exists: impl Fn(&str) -> bool,
) -> String {
  if let Some(remote_head) = remote_head {
    if exists(remote_head) {
      return remote_head.to_string();
    }
    debug!("Remote HEAD points to {remote_head}, which does not exist locally");
  }

  options
    .fallback_branches
    .iter()
    .find(|candidate| exists(candidate))
    .cloned()
    .unwrap_or_else(|| options.default_branch.clone())
}

/// Output from a git command.
pub struct GitCommandOutput {
  pub stdout: String,
  pub stderr: String,
  /// Exit code, `None` if the process was killed by a signal.
  pub code: Option<i32>,
}

impl GitCommandOutput {
  /// Whether the command exited with status code 0.
  pub fn success(&self) -> bool {
    self.code == Some(0)
  }

  /// The most useful text to show when the command failed.
  pub fn diagnostic(&self) -> String {
    let stderr = self.stderr.trim();
    if !stderr.is_empty() {
      return stderr.to_string();
    }
    let stdout = self.stdout.trim();
    if !stdout.is_empty() {
      return stdout.to_string();
    }
    match self.code {
      Some(code) => format!("exited with status {code}"),
      None => "terminated by signal".to_string(),
    }
  }
}

/// Execute a git command in `repo_path` and capture its output.
///
/// A missing executable maps to [`LopperError::ToolUnavailable`].
pub fn execute_git_command(repo_path: &Path, args: &[&str]) -> Result<GitCommandOutput> {
  debug!("Running git {}", args.join(" "));

  let output = Command::new(consts::GIT_EXECUTABLE)
    .args(args)
    .current_dir(repo_path)
    .output()
    .map_err(|err| match err.kind() {
      io::ErrorKind::NotFound => LopperError::ToolUnavailable,
      _ => LopperError::external(args, err.to_string()),
    })?;

  let result = GitCommandOutput {
    stdout: String::from_utf8_lossy(&output.stdout).to_string(),
    stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    code: output.status.code(),
  };
  trace!("git {} exited with {:?}", args.join(" "), result.code);

  Ok(result)
}

/// [`BranchQueries`] backed by the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCli {
  repo_path: PathBuf,
  options: RepositoryOptions,
}

impl GitCli {
  /// Validate the environment and open the repository containing `path`.
  pub fn open<P: AsRef<Path>>(path: P, options: RepositoryOptions) -> Result<Self> {
    let repo_path = path.as_ref().to_path_buf();
    if !repo_path.is_dir() {
      return Err(LopperError::NotARepository(repo_path));
    }

    let output = execute_git_command(&repo_path, &["rev-parse", "--git-dir"])?;
    if !output.success() {
      debug!("rev-parse --git-dir failed: {}", output.diagnostic());
      return Err(LopperError::NotARepository(repo_path));
    }

    Ok(Self { repo_path, options })
  }

  /// The path this facade runs git in.
  pub fn path(&self) -> &Path {
    &self.repo_path
  }

  /// Options used for main-branch resolution.
  pub fn options(&self) -> &RepositoryOptions {
    &self.options
  }

  /// Run git and return stdout, turning a non-zero exit into an error.
  fn git_stdout(&self, args: &[&str]) -> Result<String> {
    let output = execute_git_command(&self.repo_path, args)?;
    if output.success() {
      Ok(output.stdout)
    } else {
      Err(LopperError::external(args, output.diagnostic()))
    }
  }

  /// Whether a local branch named `name` exists.
  pub fn branch_exists(&self, name: &str) -> bool {
    let reference = format!("refs/heads/{name}");
    execute_git_command(&self.repo_path, &["show-ref", "--verify", "--quiet", &reference])
      .map(|output| output.success())
      .unwrap_or(false)
  }

  /// Branch the remote's `HEAD` symbolic ref points to, if it is set.
  fn remote_head(&self) -> Option<String> {
    let reference = format!("refs/remotes/{}/HEAD", self.options.remote);
    let stdout = self.git_stdout(&["symbolic-ref", &reference]).ok()?;
    let prefix = format!("refs/remotes/{}/", self.options.remote);
    let target = stdout.trim();
    let name = target.strip_prefix(&prefix).unwrap_or(target);
    if name.is_empty() { None } else { Some(name.to_string()) }
  }
}

impl BranchQueries for GitCli {
  fn list_branches(&self) -> Result<Vec<RawBranch>> {
    let stdout = self.git_stdout(&["for-each-ref", consts::BRANCH_RECORD_FORMAT, "refs/heads/"])?;
    let records = parse_branch_records(&stdout, Local::now().fixed_offset());
    debug!("Listed {} local branches", records.len());
    Ok(records)
  }

  fn resolve_main_branch(&self) -> Result<String> {
    let remote_head = self.remote_head();
    let main = choose_main_branch(remote_head.as_deref(), &self.options, |name| self.branch_exists(name));
    debug!("Resolved main branch: {main}");
    Ok(main)
  }

  fn is_ancestor(&self, branch: &str, of_branch: &str) -> Result<bool> {
    if branch == of_branch {
      return Ok(false);
    }

    let args = ["merge-base", "--is-ancestor", branch, of_branch];
    let output = execute_git_command(&self.repo_path, &args)?;
    match output.code {
      Some(0) => Ok(true),
      Some(1) => Ok(false),
      _ => Err(LopperError::external(&args, output.diagnostic())),
    }
  }

  fn count_ahead(&self, branch: &str, of_branch: &str) -> usize {
    if branch == of_branch {
      return 0;
    }

    let exclude = format!("^{of_branch}");
    match self.git_stdout(&["rev-list", "--count", branch, &exclude, "--"]) {
      Ok(stdout) => stdout.trim().parse::<usize>().unwrap_or_else(|err| {
        warn!("Unexpected rev-list output {:?} for {branch}: {err}", stdout.trim());
        0
      }),
      Err(err) => {
        warn!("Could not count commits of {branch} ahead of {of_branch}: {err}");
        0
      }
    }
  }

  fn delete_ref(&self, name: &str, force: bool) -> Result<()> {
    let flag = if force { "-D" } else { "-d" };
    let output = execute_git_command(&self.repo_path, &["branch", flag, name])?;
    if output.success() {
      debug!("git branch {flag} {name} succeeded");
      Ok(())
    } else {
      Err(LopperError::DeleteFailed {
        branch: name.to_string(),
        diagnostic: output.diagnostic(),
      })
    }
  }

  fn repository_root(&self) -> Result<PathBuf> {
    let stdout = self.git_stdout(&["rev-parse", "--show-toplevel"])?;
    Ok(PathBuf::from(stdout.trim()))
  }
}
