//! Per-position action permissions.

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

/// Which actions are locked, globally or at specific positions.
///
/// The sets hold positions, not item identities, so a lock stays with its
/// slot when the collection is reordered. Positions beyond the end of the
/// collection are allowed and simply never match.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Constraints {
  /// Disables every action at every position.
  pub disabled: bool,
  /// Positions that may not move, nor be moved across.
  #[serde(rename = "moveDisabledIndexes")]
  pub move_disabled: BTreeSet<usize>,
  /// Positions that may not be edited.
  #[serde(rename = "editDisabledIndexes")]
  pub edit_disabled: BTreeSet<usize>,
  /// Positions that may not be removed.
  #[serde(rename = "removeDisabledIndexes")]
  pub remove_disabled: BTreeSet<usize>,
}

/// The actions currently allowed for one entry.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Permissions {
  /// Whether the entry may swap with its predecessor.
  pub move_up: bool,
  /// Whether the entry may swap with its successor.
  pub move_down: bool,
  /// Whether the entry may be edited.
  pub edit: bool,
  /// Whether the entry may be removed.
  pub remove: bool,
}

impl Constraints {
  /// Returns constraints that allow everything.
  pub fn new() -> Self {
    Self::default()
  }

  /// Sets the global disabled flag.
  pub fn disabled(mut self, flag: bool) -> Self {
    self.disabled = flag;
    self
  }

  /// Locks `indices` against moves.
  pub fn lock_moves(
    mut self,
    indices: impl IntoIterator<Item = usize>,
  ) -> Self {
    self.move_disabled.extend(indices);
    self
  }

  /// Locks `indices` against edits.
  pub fn lock_edits(
    mut self,
    indices: impl IntoIterator<Item = usize>,
  ) -> Self {
    self.edit_disabled.extend(indices);
    self
  }

  /// Locks `indices` against removal.
  pub fn lock_removals(
    mut self,
    indices: impl IntoIterator<Item = usize>,
  ) -> Self {
    self.remove_disabled.extend(indices);
    self
  }

  /// Resolves the permissions of the entry at `index` in a collection of
  /// `total` entries.
  ///
  /// A move-locked position blocks its neighbours from swapping across it, in
  /// both directions.
  pub fn resolve(&self, index: usize, total: usize) -> Permissions {
    if self.disabled {
      return Permissions::default();
    }

    let locked = |i: usize| self.move_disabled.contains(&i);

    let move_up = index != 0 && !locked(index) && !locked(index - 1);

    let is_last = index.saturating_add(1) >= total;
    let move_down = !is_last
      && total > 1
      && !locked(index)
      && !locked(index.saturating_add(1));

    Permissions {
      move_up,
      move_down,
      edit: !self.edit_disabled.contains(&index),
      remove: !self.remove_disabled.contains(&index),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn lock_is_symmetric() {
    let c = Constraints::new().lock_moves([2]);
    let up = (0..5).map(|i| c.resolve(i, 5).move_up).collect::<Vec<_>>();
    let down = (0..5).map(|i| c.resolve(i, 5).move_down).collect::<Vec<_>>();
    assert_eq!(up, vec![false, true, false, false, true]);
    assert_eq!(down, vec![true, false, false, true, false]);
  }

  #[test]
  fn ends_and_singletons() {
    let c = Constraints::new();
    assert!(!c.resolve(0, 3).move_up);
    assert!(c.resolve(0, 3).move_down);
    assert!(!c.resolve(2, 3).move_down);

    let only = c.resolve(0, 1);
    assert!(!only.move_up && !only.move_down);
    assert!(only.edit && only.remove);
  }

  #[test]
  fn global_disable_wins() {
    let c = Constraints::new().disabled(true);
    assert_eq!(c.resolve(1, 3), Permissions::default());
  }

  #[test]
  fn edit_and_remove_are_independent() {
    let c = Constraints::new().lock_edits([0]).lock_removals([1]);
    assert!(!c.resolve(0, 2).edit);
    assert!(c.resolve(0, 2).remove);
    assert!(c.resolve(1, 2).edit);
    assert!(!c.resolve(1, 2).remove);
  }

  #[test]
  fn out_of_bounds_locks_are_inert() {
    let c = Constraints::new().lock_moves([10]).lock_edits([10]);
    let p = c.resolve(1, 3);
    assert!(p.move_up && p.move_down && p.edit && p.remove);
  }

  #[test]
  fn deserializes_camel_case_index_sets() {
    let c: Constraints = serde_json::from_str(
      r#"{ "moveDisabledIndexes": [0, 3], "disabled": false }"#,
    )
    .unwrap();
    assert_eq!(c, Constraints::new().lock_moves([0, 3]));
  }
}
