//! # Deletion Executor
//!
//! Deletes a batch of branches through [`BranchQueries::delete_branch`],
//! which escalates from `git branch -d` to `git branch -D` per branch.

use tracing::{error, info};

use crate::error::{LopperError, Result};
use crate::git::BranchQueries;

/// How a batch reacts to a failed deletion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeleteMode {
  /// Stop at the first failure. Later names are not attempted.
  #[default]
  FailFast,
  /// Attempt every name and report all failures together.
  ContinueOnError,
}

/// Branches removed by a successful batch, in the order they were deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionReport {
  pub deleted: Vec<String>,
}

/// Delete `names` in order.
///
/// With [`DeleteMode::FailFast`] the first failure is returned as is; any
/// branch before it may already be gone. With
/// [`DeleteMode::ContinueOnError`] every name is attempted and failures are
/// collected into [`LopperError::DeleteManyFailed`].
pub fn delete_many<Q, S>(queries: &Q, names: &[S], mode: DeleteMode) -> Result<DeletionReport>
where
  Q: BranchQueries + ?Sized,
  S: AsRef<str>,
{
  let mut report = DeletionReport::default();
  let mut failures = Vec::new();

  for name in names {
    let name = name.as_ref();
    match queries.delete_branch(name) {
      Ok(()) => {
        info!("Deleted branch {name}");
        report.deleted.push(name.to_string());
      }
      Err(err) => {
        error!("Failed to delete branch {name}: {err}");
        match mode {
          DeleteMode::FailFast => return Err(err),
          DeleteMode::ContinueOnError => failures.push((name.to_string(), failure_detail(err))),
        }
      }
    }
  }

  if failures.is_empty() {
    Ok(report)
  } else {
    Err(LopperError::DeleteManyFailed { failures })
  }
}

fn failure_detail(err: LopperError) -> String {
  match err {
    LopperError::DeleteFailed { diagnostic, .. } | LopperError::ExternalTool { diagnostic, .. } => diagnostic,
    other => other.to_string(),
  }
}
