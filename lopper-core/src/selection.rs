//! # Selection Store
//!
//! The branch list, the per-entry selection flags, and the cursor. The
//! `selected` flag on each [`Branch`] is the only record of selection.

use crate::branch::Branch;

/// Branch list plus cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionStore {
  branches: Vec<Branch>,
  cursor: usize,
}

impl SelectionStore {
  /// Create a store over `branches` with the cursor on the first row and
  /// nothing selected.
  pub fn new(branches: Vec<Branch>) -> Self {
    let mut store = Self::default();
    store.replace_all(branches);
    store
  }

  /// All entries in display order.
  pub fn branches(&self) -> &[Branch] {
    &self.branches
  }

  /// Number of entries.
  pub fn len(&self) -> usize {
    self.branches.len()
  }

  /// Whether the list is empty.
  pub fn is_empty(&self) -> bool {
    self.branches.is_empty()
  }

  /// Index of the highlighted row.
  pub fn cursor(&self) -> usize {
    self.cursor
  }

  /// The highlighted entry, if the list is not empty.
  pub fn current(&self) -> Option<&Branch> {
    self.branches.get(self.cursor)
  }

  /// Move the cursor by `delta` rows, clamped to the list. No wraparound.
  pub fn move_cursor(&mut self, delta: isize) {
    if self.branches.is_empty() {
      return;
    }
    let last = self.branches.len() - 1;
    self.cursor = self.cursor.saturating_add_signed(delta).min(last);
  }

  /// Jump to the first row.
  pub fn move_to_first(&mut self) {
    self.cursor = 0;
  }

  /// Jump to the last row.
  pub fn move_to_last(&mut self) {
    self.cursor = self.branches.len().saturating_sub(1);
  }

  /// Flip the selection of the entry at `index`.
  ///
  /// The main branch can never be selected, and out-of-range indices are
  /// ignored.
  pub fn toggle_selection(&mut self, index: usize) {
    if let Some(branch) = self.branches.get_mut(index)
      && !branch.is_main
    {
      branch.selected = !branch.selected;
    }
  }

  /// Flip the selection of the highlighted entry.
  pub fn toggle_current(&mut self) {
    self.toggle_selection(self.cursor);
  }

  /// Selected entries in list order.
  pub fn selected_branches(&self) -> Vec<&Branch> {
    self.branches.iter().filter(|branch| branch.selected).collect()
  }

  /// Indices of the selected entries, derived from the flags.
  pub fn selected_indices(&self) -> Vec<usize> {
    self
      .branches
      .iter()
      .enumerate()
      .filter(|(_, branch)| branch.selected)
      .map(|(index, _)| index)
      .collect()
  }

  /// Swap in a freshly classified list: cursor back to 0, every selection
  /// cleared.
  pub fn replace_all(&mut self, branches: Vec<Branch>) {
    self.branches = branches;
    for branch in &mut self.branches {
      branch.selected = false;
    }
    self.cursor = 0;
  }
}

#[cfg(test)]
mod tests {
  use chrono::{FixedOffset, TimeZone};

  use super::*;

  fn branch(name: &str, is_main: bool) -> Branch {
    Branch {
      name: name.to_string(),
      is_main,
      is_merged: false,
      commits_ahead: 0,
      last_commit_time: FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .unwrap(),
      last_commit_message: String::new(),
      author: String::new(),
      selected: false,
    }
  }

  fn store() -> SelectionStore {
    SelectionStore::new(vec![branch("main", true), branch("feat-a", false), branch("feat-b", false)])
  }

  #[test]
  fn test_move_cursor_clamps_without_wrapping() {
    let mut store = store();

    store.move_cursor(-1);
    assert_eq!(store.cursor(), 0);

    store.move_cursor(1);
    store.move_cursor(1);
    assert_eq!(store.cursor(), 2);

    store.move_cursor(1);
    assert_eq!(store.cursor(), 2);

    store.move_cursor(-10);
    assert_eq!(store.cursor(), 0);

    store.move_cursor(10);
    assert_eq!(store.cursor(), 2);
  }

  #[test]
  fn test_move_on_empty_store() {
    let mut store = SelectionStore::new(Vec::new());
    store.move_cursor(1);
    store.move_to_last();
    assert_eq!(store.cursor(), 0);
    assert!(store.current().is_none());
  }

  #[test]
  fn test_first_and_last() {
    let mut store = store();
    store.move_to_last();
    assert_eq!(store.current().unwrap().name, "feat-b");
    store.move_to_first();
    assert_eq!(store.current().unwrap().name, "main");
  }

  #[test]
  fn test_toggle_twice_restores_state() {
    let mut store = store();
    let before = store.clone();

    store.toggle_selection(1);
    assert!(store.branches()[1].selected);
    store.toggle_selection(1);
    assert_eq!(store, before);
  }

  #[test]
  fn test_toggle_never_selects_main() {
    let mut store = store();

    store.toggle_selection(0);
    assert!(!store.branches()[0].selected);

    store.toggle_current();
    assert!(store.selected_branches().is_empty());
  }

  #[test]
  fn test_toggle_out_of_range_is_ignored() {
    let mut store = store();
    store.toggle_selection(99);
    assert!(store.selected_branches().is_empty());
  }

  #[test]
  fn test_selected_branches_in_list_order() {
    let mut store = store();
    store.toggle_selection(2);
    store.toggle_selection(1);

    let names: Vec<&str> = store.selected_branches().iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["feat-a", "feat-b"]);
    assert_eq!(store.selected_indices(), vec![1, 2]);
  }

  #[test]
  fn test_replace_all_resets_cursor_and_selection() {
    let mut store = store();
    store.toggle_selection(1);
    store.move_cursor(2);

    let mut incoming = branch("feat-c", false);
    incoming.selected = true;
    store.replace_all(vec![branch("main", true), incoming]);

    assert_eq!(store.cursor(), 0);
    assert!(store.selected_branches().is_empty());
    assert_eq!(store.len(), 2);
  }
}
