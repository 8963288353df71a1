//! Test utilities shared across the lopper workspace
//!
//! Temporary git repositories ([`GitRepoTestGuard`]) plus helpers that shape
//! their branch history with git2 rather than the `git` binary under test.

#![allow(dead_code)]

pub mod git;

pub use git::{GitRepoTestGuard, checkout_branch, create_branch, create_commit, set_remote_head};
