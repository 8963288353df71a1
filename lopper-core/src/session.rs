//! # Interaction Session
//!
//! The browse/confirm protocol. Each state owns its handler: browsing
//! navigates and toggles the [`SelectionStore`], confirming either runs the
//! deletion (followed by a full re-query) or goes back with the selection
//! intact.

use std::mem;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::branch::Branch;
use crate::classify::load_branches;
use crate::consts::DEFAULT_PAGE_SIZE;
use crate::delete::{DeleteMode, delete_many};
use crate::error::{LopperError, Result};
use crate::git::BranchQueries;
use crate::selection::SelectionStore;

/// Abstract user input, already decoded from key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
  Quit,
  MoveUp,
  MoveDown,
  PageUp,
  PageDown,
  Top,
  Bottom,
  ToggleSelect,
  RequestDelete,
  ToggleHelp,
  Confirm,
  Cancel,
}

/// Branches awaiting confirmation, captured when deletion was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeletion {
  branches: Vec<Branch>,
}

impl PendingDeletion {
  pub fn new(branches: Vec<Branch>) -> Self {
    Self { branches }
  }

  /// The branches that will be deleted, in list order.
  pub fn branches(&self) -> &[Branch] {
    &self.branches
  }

  /// Names passed to the deletion executor.
  pub fn names(&self) -> Vec<&str> {
    self.branches.iter().map(|branch| branch.name.as_str()).collect()
  }

  /// Whether any pending branch is not merged into main.
  pub fn has_unmerged(&self) -> bool {
    self.branches.iter().any(|branch| !branch.is_merged)
  }
}

/// Where the session is in the browse/confirm protocol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
  #[default]
  Browsing,
  ConfirmingDeletion(PendingDeletion),
}

/// What the front end should do after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
  Continue,
  Quit,
}

/// One interactive session over one repository.
pub struct Session<Q> {
  queries: Q,
  store: SelectionStore,
  state: SessionState,
  main_branch: String,
  repository_root: Option<PathBuf>,
  delete_mode: DeleteMode,
  page_size: usize,
  last_error: Option<LopperError>,
  show_error: bool,
  show_help: bool,
}

impl<Q: BranchQueries> Session<Q> {
  /// Load and classify the branch list. Any listing or resolution failure is
  /// returned; there is no session without an initial list.
  pub fn start(queries: Q) -> Result<Self> {
    let listing = load_branches(&queries)?;
    let repository_root = queries
      .repository_root()
      .inspect_err(|err| warn!("Could not determine repository root: {err}"))
      .ok();

    Ok(Self {
      queries,
      store: SelectionStore::new(listing.branches),
      state: SessionState::Browsing,
      main_branch: listing.main_branch,
      repository_root,
      delete_mode: DeleteMode::default(),
      page_size: DEFAULT_PAGE_SIZE,
      last_error: None,
      show_error: false,
      show_help: false,
    })
  }

  /// Choose how a deletion batch reacts to failures.
  pub fn with_delete_mode(mut self, delete_mode: DeleteMode) -> Self {
    self.delete_mode = delete_mode;
    self
  }

  /// Rows moved by page navigation (at least one).
  pub fn with_page_size(mut self, page_size: usize) -> Self {
    self.page_size = page_size.max(1);
    self
  }

  pub fn state(&self) -> &SessionState {
    &self.state
  }

  pub fn store(&self) -> &SelectionStore {
    &self.store
  }

  pub fn queries(&self) -> &Q {
    &self.queries
  }

  pub fn main_branch(&self) -> &str {
    &self.main_branch
  }

  pub fn repository_root(&self) -> Option<&Path> {
    self.repository_root.as_deref()
  }

  pub fn delete_mode(&self) -> DeleteMode {
    self.delete_mode
  }

  /// The most recent failure, kept after its banner is dismissed.
  pub fn last_error(&self) -> Option<&LopperError> {
    self.last_error.as_ref()
  }

  /// The error to display, if the banner is showing.
  pub fn visible_error(&self) -> Option<&LopperError> {
    if self.show_error { self.last_error.as_ref() } else { None }
  }

  pub fn show_help(&self) -> bool {
    self.show_help
  }

  /// Process one action to completion.
  ///
  /// Any action dismisses a visible error banner before it is handled.
  pub fn handle(&mut self, action: Action) -> Transition {
    self.show_error = false;

    match mem::take(&mut self.state) {
      SessionState::Browsing => self.handle_browsing(action),
      SessionState::ConfirmingDeletion(pending) => self.handle_confirming(pending, action),
    }
  }

  fn handle_browsing(&mut self, action: Action) -> Transition {
    let page = isize::try_from(self.page_size).unwrap_or(isize::MAX);

    match action {
      Action::Quit => return Transition::Quit,
      Action::MoveUp => self.store.move_cursor(-1),
      Action::MoveDown => self.store.move_cursor(1),
      Action::PageUp => self.store.move_cursor(-page),
      Action::PageDown => self.store.move_cursor(page),
      Action::Top => self.store.move_to_first(),
      Action::Bottom => self.store.move_to_last(),
      Action::ToggleSelect => self.store.toggle_current(),
      Action::ToggleHelp => self.show_help = !self.show_help,
      Action::RequestDelete => {
        let branches: Vec<Branch> = self.store.selected_branches().into_iter().cloned().collect();
        if branches.is_empty() {
          debug!("Delete requested with nothing selected");
        } else {
          debug!("Confirming deletion of {} branch(es)", branches.len());
          self.state = SessionState::ConfirmingDeletion(PendingDeletion::new(branches));
        }
      }
      Action::Confirm | Action::Cancel => {}
    }

    Transition::Continue
  }

  fn handle_confirming(&mut self, pending: PendingDeletion, action: Action) -> Transition {
    match action {
      Action::Confirm => self.delete_pending(&pending),
      Action::Cancel => debug!("Deletion cancelled"),
      _ => self.state = SessionState::ConfirmingDeletion(pending),
    }

    Transition::Continue
  }

  fn delete_pending(&mut self, pending: &PendingDeletion) {
    let names = pending.names();
    info!("Deleting {} branch(es): {}", names.len(), names.join(", "));

    if let Err(err) = delete_many(&self.queries, &names, self.delete_mode) {
      self.record_error(err);
      return;
    }

    match load_branches(&self.queries) {
      Ok(listing) => {
        info!("Reloaded {} branches after deletion", listing.branches.len());
        self.main_branch = listing.main_branch;
        self.store.replace_all(listing.branches);
      }
      Err(err) => self.record_error(err),
    }
  }

  fn record_error(&mut self, err: LopperError) {
    warn!("{err}");
    self.last_error = Some(err);
    self.show_error = true;
  }
}

#[cfg(test)]
mod tests {
  use std::cell::{Cell, RefCell};
  use std::collections::HashMap;

  use chrono::{DateTime, FixedOffset, TimeZone};

  use super::*;
  use crate::branch::RawBranch;

  /// In-memory repository with scripted failures.
  #[derive(Default)]
  struct FakeRepository {
    branches: RefCell<Vec<RawBranch>>,
    merged: HashMap<String, bool>,
    ahead: HashMap<String, usize>,
    /// Branch names whose deletion fails in both phases.
    undeletable: Vec<String>,
    deleted: RefCell<Vec<String>>,
    list_calls: Cell<usize>,
    fail_listing_after: Option<usize>,
  }

  impl BranchQueries for FakeRepository {
    fn list_branches(&self) -> Result<Vec<RawBranch>> {
      let calls = self.list_calls.get() + 1;
      self.list_calls.set(calls);
      if self.fail_listing_after.is_some_and(|limit| calls > limit) {
        return Err(LopperError::external(&["for-each-ref"], "fatal: index locked"));
      }
      Ok(self.branches.borrow().clone())
    }

    fn resolve_main_branch(&self) -> Result<String> {
      Ok("main".to_string())
    }

    fn is_ancestor(&self, branch: &str, of_branch: &str) -> Result<bool> {
      Ok(branch != of_branch && self.merged.get(branch).copied().unwrap_or(false))
    }

    fn count_ahead(&self, branch: &str, _of_branch: &str) -> usize {
      self.ahead.get(branch).copied().unwrap_or(0)
    }

    fn delete_ref(&self, name: &str, force: bool) -> Result<()> {
      let mut branches = self.branches.borrow_mut();
      let known = branches.iter().any(|b| b.name == name);
      if !known || self.undeletable.iter().any(|n| n == name) {
        return Err(LopperError::DeleteFailed {
          branch: name.to_string(),
          diagnostic: format!("error: branch '{name}' not found."),
        });
      }
      if !force && !self.merged.get(name).copied().unwrap_or(false) {
        return Err(LopperError::DeleteFailed {
          branch: name.to_string(),
          diagnostic: format!("error: the branch '{name}' is not fully merged"),
        });
      }
      branches.retain(|b| b.name != name);
      self.deleted.borrow_mut().push(name.to_string());
      Ok(())
    }

    fn repository_root(&self) -> Result<PathBuf> {
      Ok(PathBuf::from("/work/repo"))
    }
  }

  fn at(day: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
      .unwrap()
      .with_ymd_and_hms(2024, 2, day, 8, 30, 0)
      .unwrap()
  }

  fn raw(name: &str, day: u32) -> RawBranch {
    RawBranch {
      name: name.to_string(),
      author: "Tester".to_string(),
      last_commit_time: at(day),
      last_commit_message: format!("commit on {name}"),
    }
  }

  /// `main` newest, then merged `feat-a`, then `feat-b` three commits ahead.
  fn scenario() -> FakeRepository {
    FakeRepository {
      branches: RefCell::new(vec![raw("feat-b", 1), raw("feat-a", 2), raw("main", 3)]),
      merged: HashMap::from([("feat-a".to_string(), true)]),
      ahead: HashMap::from([("feat-b".to_string(), 3)]),
      ..Default::default()
    }
  }

  fn names(session: &Session<FakeRepository>) -> Vec<String> {
    session.store().branches().iter().map(|b| b.name.clone()).collect()
  }

  /// Select every non-main branch by walking the cursor down the list.
  fn select_all(session: &mut Session<FakeRepository>) {
    session.handle(Action::Top);
    for _ in 0..session.store().len() {
      session.handle(Action::ToggleSelect);
      session.handle(Action::MoveDown);
    }
  }

  #[test]
  fn test_start_classifies_and_orders() {
    let session = Session::start(scenario()).unwrap();

    assert_eq!(names(&session), vec!["main", "feat-a", "feat-b"]);
    assert_eq!(session.main_branch(), "main");
    assert_eq!(session.repository_root(), Some(Path::new("/work/repo")));
    assert_eq!(*session.state(), SessionState::Browsing);

    let main = &session.store().branches()[0];
    assert!(main.is_main && !main.is_merged && main.commits_ahead == 0);
    let feat_b = &session.store().branches()[2];
    assert!(!feat_b.is_merged);
    assert_eq!(feat_b.commits_ahead, 3);
  }

  #[test]
  fn test_start_fails_when_listing_fails() {
    let repo = FakeRepository {
      fail_listing_after: Some(0),
      ..scenario()
    };
    assert!(Session::start(repo).is_err());
  }

  #[test]
  fn test_start_with_empty_repository() {
    let mut session = Session::start(FakeRepository::default()).unwrap();

    assert!(session.store().is_empty());
    assert_eq!(session.handle(Action::MoveDown), Transition::Continue);
    session.handle(Action::ToggleSelect);
    session.handle(Action::RequestDelete);
    assert_eq!(*session.state(), SessionState::Browsing);
  }

  #[test]
  fn test_quit_from_browsing() {
    let mut session = Session::start(scenario()).unwrap();
    assert_eq!(session.handle(Action::Quit), Transition::Quit);
  }

  #[test]
  fn test_request_delete_without_selection_stays_browsing() {
    let mut session = Session::start(scenario()).unwrap();

    session.handle(Action::RequestDelete);
    assert_eq!(*session.state(), SessionState::Browsing);
  }

  #[test]
  fn test_main_cannot_be_selected() {
    let mut session = Session::start(scenario()).unwrap();

    session.handle(Action::ToggleSelect);
    assert!(session.store().selected_branches().is_empty());
    session.handle(Action::RequestDelete);
    assert_eq!(*session.state(), SessionState::Browsing);
  }

  #[test]
  fn test_confirm_flow_deletes_in_order_and_reloads() {
    let mut session = Session::start(scenario()).unwrap();
    select_all(&mut session);

    session.handle(Action::RequestDelete);
    let SessionState::ConfirmingDeletion(pending) = session.state() else {
      panic!("expected confirmation state");
    };
    assert_eq!(pending.names(), vec!["feat-a", "feat-b"]);
    assert!(pending.has_unmerged());

    session.handle(Action::Confirm);

    assert_eq!(*session.queries().deleted.borrow(), vec!["feat-a", "feat-b"]);
    assert_eq!(*session.state(), SessionState::Browsing);
    assert_eq!(names(&session), vec!["main"]);
    assert_eq!(session.store().cursor(), 0);
    assert!(session.visible_error().is_none());
    assert_eq!(session.queries().list_calls.get(), 2);
  }

  #[test]
  fn test_confirm_state_ignores_browsing_actions() {
    let mut session = Session::start(scenario()).unwrap();
    session.handle(Action::MoveDown);
    session.handle(Action::ToggleSelect);
    session.handle(Action::RequestDelete);

    for action in [Action::MoveDown, Action::ToggleSelect, Action::Quit, Action::RequestDelete] {
      assert_eq!(session.handle(action), Transition::Continue);
      assert!(matches!(session.state(), SessionState::ConfirmingDeletion(_)));
    }
    assert_eq!(session.store().cursor(), 1);
  }

  #[test]
  fn test_cancel_preserves_selection() {
    let mut session = Session::start(scenario()).unwrap();
    select_all(&mut session);
    let cursor = session.store().cursor();

    session.handle(Action::RequestDelete);
    session.handle(Action::Cancel);

    assert_eq!(*session.state(), SessionState::Browsing);
    assert_eq!(session.store().selected_branches().len(), 2);
    assert_eq!(session.store().cursor(), cursor);
    assert!(session.queries().deleted.borrow().is_empty());
  }

  #[test]
  fn test_failed_deletion_keeps_stale_list() {
    let repo = FakeRepository {
      undeletable: vec!["feat-b".to_string()],
      ..scenario()
    };
    let mut session = Session::start(repo).unwrap();
    select_all(&mut session);

    session.handle(Action::RequestDelete);
    session.handle(Action::Confirm);

    assert_eq!(*session.queries().deleted.borrow(), vec!["feat-a"]);
    assert_eq!(*session.state(), SessionState::Browsing);
    assert_eq!(names(&session), vec!["main", "feat-a", "feat-b"]);
    assert_eq!(session.store().selected_branches().len(), 2);

    let err = session.visible_error().unwrap();
    assert_eq!(err.failed_branches(), vec!["feat-b"]);
    assert_eq!(session.queries().list_calls.get(), 1);
  }

  #[test]
  fn test_continue_on_error_reports_all_failures() {
    let repo = FakeRepository {
      branches: RefCell::new(vec![raw("a", 1), raw("b", 2), raw("c", 3), raw("main", 4)]),
      merged: HashMap::from([("a".to_string(), true), ("b".to_string(), true), ("c".to_string(), true)]),
      undeletable: vec!["a".to_string(), "b".to_string()],
      ..Default::default()
    };
    let mut session = Session::start(repo).unwrap().with_delete_mode(DeleteMode::ContinueOnError);
    select_all(&mut session);

    session.handle(Action::RequestDelete);
    session.handle(Action::Confirm);

    assert_eq!(*session.queries().deleted.borrow(), vec!["c"]);
    let err = session.visible_error().unwrap();
    assert_eq!(err.failed_branches(), vec!["b", "a"]);
  }

  #[test]
  fn test_failed_reload_keeps_prior_list() {
    let repo = FakeRepository {
      fail_listing_after: Some(1),
      ..scenario()
    };
    let mut session = Session::start(repo).unwrap();
    select_all(&mut session);

    session.handle(Action::RequestDelete);
    session.handle(Action::Confirm);

    assert_eq!(*session.queries().deleted.borrow(), vec!["feat-a", "feat-b"]);
    assert_eq!(names(&session), vec!["main", "feat-a", "feat-b"]);
    assert!(matches!(
      session.visible_error(),
      Some(LopperError::ExternalTool { .. })
    ));
  }

  #[test]
  fn test_error_banner_cleared_by_next_action() {
    let repo = FakeRepository {
      undeletable: vec!["feat-a".to_string()],
      ..scenario()
    };
    let mut session = Session::start(repo).unwrap();
    session.handle(Action::MoveDown);
    session.handle(Action::ToggleSelect);
    session.handle(Action::RequestDelete);
    session.handle(Action::Confirm);
    assert!(session.visible_error().is_some());

    session.handle(Action::MoveDown);
    assert!(session.visible_error().is_none());
    assert!(session.last_error().is_some());
  }

  #[test]
  fn test_paging_and_jumps() {
    let branches = (1..=20).map(|day| raw(&format!("b{day:02}"), day)).collect();
    let repo = FakeRepository {
      branches: RefCell::new(branches),
      ..Default::default()
    };
    let mut session = Session::start(repo).unwrap().with_page_size(5);

    session.handle(Action::PageDown);
    assert_eq!(session.store().cursor(), 5);
    session.handle(Action::PageUp);
    session.handle(Action::PageUp);
    assert_eq!(session.store().cursor(), 0);
    session.handle(Action::Bottom);
    assert_eq!(session.store().cursor(), 19);
    session.handle(Action::PageDown);
    assert_eq!(session.store().cursor(), 19);
    session.handle(Action::Top);
    assert_eq!(session.store().cursor(), 0);
  }

  #[test]
  fn test_toggle_help() {
    let mut session = Session::start(scenario()).unwrap();
    assert!(!session.show_help());
    session.handle(Action::ToggleHelp);
    assert!(session.show_help());
    session.handle(Action::ToggleHelp);
    assert!(!session.show_help());
  }
}
