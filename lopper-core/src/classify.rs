//! # Branch Classification
//!
//! Derives merge status and divergence for every listed branch relative to
//! the main branch and orders the result most-recent first.

use tracing::{debug, warn};

use crate::branch::{Branch, RawBranch};
use crate::error::Result;
use crate::git::BranchQueries;

/// A classified listing together with the main branch it was computed
/// against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchListing {
  pub main_branch: String,
  pub branches: Vec<Branch>,
}

/// Classify raw branches against `main_branch`.
///
/// The main branch itself is never merged and never ahead. Other branches
/// take their merge flag from [`BranchQueries::is_ancestor`] (a failed query
/// counts as not merged) and their divergence from
/// [`BranchQueries::count_ahead`]. The result is sorted by last commit time,
/// newest first; ties keep listing order.
pub fn classify<Q: BranchQueries + ?Sized>(raw: Vec<RawBranch>, main_branch: &str, queries: &Q) -> Vec<Branch> {
  let mut branches: Vec<Branch> = raw
    .into_iter()
    .map(|raw| {
      let is_main = raw.name == main_branch;
      let (is_merged, commits_ahead) = if is_main {
        (false, 0)
      } else {
        let is_merged = queries.is_ancestor(&raw.name, main_branch).unwrap_or_else(|err| {
          warn!("Could not determine whether {} is merged: {err}", raw.name);
          false
        });
        (is_merged, queries.count_ahead(&raw.name, main_branch))
      };

      Branch {
        name: raw.name,
        is_main,
        is_merged,
        commits_ahead,
        last_commit_time: raw.last_commit_time,
        last_commit_message: raw.last_commit_message,
        author: raw.author,
        selected: false,
      }
    })
    .collect();

  branches.sort_by(|a, b| b.last_commit_time.cmp(&a.last_commit_time));
  branches
}

/// List, resolve main, and classify in one step.
pub fn load_branches<Q: BranchQueries + ?Sized>(queries: &Q) -> Result<BranchListing> {
  let raw = queries.list_branches()?;
  let main_branch = queries.resolve_main_branch()?;
  let branches = classify(raw, &main_branch, queries);
  debug!("Classified {} branches against {main_branch}", branches.len());

  Ok(BranchListing { main_branch, branches })
}
