//! Git repository management for testing
//!
//! This module provides utilities for creating temporary git repositories
//! with a known branch layout.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use git2::{BranchType, Repository, Signature, Time};
use tempfile::TempDir;

/// A temporary git repository that is removed when dropped.
pub struct GitRepoTestGuard {
  /// The temporary directory containing the git repository
  pub temp_dir: TempDir,
  /// The git repository
  pub repo: Repository,
}

impl GitRepoTestGuard {
  /// Create a new, empty test git repository whose initial branch is `main`.
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let temp_path = temp_dir.path();

    let mut opts = git2::RepositoryInitOptions::new();
    opts.initial_head("main");
    let repo = Repository::init_opts(temp_path, &opts).expect("Failed to initialize git repository");

    let mut config = repo.config().expect("Failed to get repository config");
    config
      .set_str("user.name", "Lopper Test User")
      .expect("Failed to set user.name");
    config
      .set_str("user.email", "lopper-test@example.com")
      .expect("Failed to set user.email");

    assert!(
      temp_path.join(".git").exists(),
      "Git repository was not properly initialized"
    );

    Self { temp_dir, repo }
  }

  /// Get the path to the git repository
  pub fn path(&self) -> &Path {
    self.temp_dir.path()
  }
}

impl Default for GitRepoTestGuard {
  fn default() -> Self {
    Self::new()
  }
}

/// Commit `content` to `file_name` on the current branch.
///
/// `timestamp` is the commit time in seconds since the epoch, which lets
/// tests control the recency order of branches.
pub fn create_commit(repo: &Repository, file_name: &str, content: &str, message: &str, timestamp: i64) -> Result<()> {
  let repo_path = repo.workdir().context("Repository has no working directory")?;
  fs::write(repo_path.join(file_name), content)?;

  let mut index = repo.index()?;
  index.add_path(Path::new(file_name))?;
  index.write()?;

  let tree_id = index.write_tree()?;
  let tree = repo.find_tree(tree_id)?;

  let signature = Signature::new("Test User", "test@example.com", &Time::new(timestamp, 0))?;

  let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
  match parent {
    Some(parent) => repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &[&parent])?,
    None => repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &[])?,
  };

  Ok(())
}

/// Create `branch_name` at `start_point` (or at HEAD).
pub fn create_branch(repo: &Repository, branch_name: &str, start_point: Option<&str>) -> Result<()> {
  let head = if let Some(start) = start_point {
    repo
      .find_branch(start, BranchType::Local)?
      .into_reference()
      .peel_to_commit()?
  } else {
    repo.head()?.peel_to_commit()?
  };

  repo.branch(branch_name, &head, false)?;
  Ok(())
}

/// Check out `branch_name`, updating the working tree.
pub fn checkout_branch(repo: &Repository, branch_name: &str) -> Result<()> {
  let obj = repo
    .revparse_single(&format!("refs/heads/{branch_name}"))?
    .peel_to_commit()?;

  let mut checkout = git2::build::CheckoutBuilder::new();
  checkout.force();
  repo.checkout_tree(&obj.into_object(), Some(&mut checkout))?;
  repo.set_head(&format!("refs/heads/{branch_name}"))?;

  Ok(())
}

/// Point `refs/remotes/<remote>/HEAD` at `refs/remotes/<remote>/<branch>`,
/// creating the remote-tracking ref from the local branch of that name when
/// it exists, or from HEAD otherwise.
pub fn set_remote_head(repo: &Repository, remote: &str, branch: &str) -> Result<()> {
  let commit = match repo.find_branch(branch, BranchType::Local) {
    Ok(local) => local.into_reference().peel_to_commit()?,
    Err(_) => repo.head()?.peel_to_commit()?,
  };

  let tracking = format!("refs/remotes/{remote}/{branch}");
  repo.reference(&tracking, commit.id(), true, "test remote branch")?;
  repo.reference_symbolic(&format!("refs/remotes/{remote}/HEAD"), &tracking, true, "test remote head")?;

  Ok(())
}
