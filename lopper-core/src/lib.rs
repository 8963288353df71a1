//! # Lopper Core
//!
//! Branch classification and the interactive selection/deletion workflow.
//! Everything here is independent of the terminal: git is reached through the
//! [`BranchQueries`] trait, and the front end drives a [`Session`] with
//! abstract [`Action`]s.

pub mod branch;
pub mod classify;
pub mod config;
pub mod consts;
pub mod delete;
pub mod error;
pub mod git;
pub mod selection;
pub mod session;

pub use branch::{Branch, RawBranch};
pub use classify::{BranchListing, classify, load_branches};
pub use config::{ConfigDirs, LopperConfig};
pub use delete::{DeleteMode, DeletionReport, delete_many};
pub use error::{LopperError, Result};
pub use git::{BranchQueries, GitCli, RepositoryOptions};
pub use selection::SelectionStore;
pub use session::{Action, PendingDeletion, Session, SessionState, Transition};
