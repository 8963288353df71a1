#![allow(dead_code)]

use anyhow::Result;
use lopper_test_utils::{GitRepoTestGuard, checkout_branch, create_branch, create_commit};

/// Epoch seconds of the first commit in every fixture.
pub const BASE_TIME: i64 = 1_700_000_000;

/// A repository with a known branch layout:
///
/// - `main`: initial commit plus one more at `BASE_TIME + 50`
/// - `feat-merged`: the initial commit only, so it is contained in `main`
/// - `feat-old`: one commit of its own at `BASE_TIME + 100`
/// - `feat-new`: two commits of its own, the last at `BASE_TIME + 200`
///
/// `main` is checked out.
pub fn branch_fixture() -> Result<GitRepoTestGuard> {
  let guard = GitRepoTestGuard::new();
  let repo = &guard.repo;

  create_commit(repo, "README.md", "hello", "Initial commit", BASE_TIME)?;
  create_branch(repo, "feat-merged", None)?;
  create_branch(repo, "feat-old", None)?;
  create_branch(repo, "feat-new", None)?;
  create_commit(repo, "main.txt", "main", "Main work", BASE_TIME + 50)?;

  checkout_branch(repo, "feat-old")?;
  create_commit(repo, "old.txt", "old", "Old feature", BASE_TIME + 100)?;

  checkout_branch(repo, "feat-new")?;
  create_commit(repo, "new.txt", "one", "Start new feature", BASE_TIME + 150)?;
  create_commit(repo, "new.txt", "two", "Finish new | with a pipe", BASE_TIME + 200)?;

  checkout_branch(repo, "main")?;
  Ok(guard)
}

/// Names of a branch list, in order.
pub fn names(branches: &[lopper_core::Branch]) -> Vec<&str> {
  branches.iter().map(|b| b.name.as_str()).collect()
}
