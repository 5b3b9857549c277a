//! The reorderable collection.
//!
//! [`Reorderable`] is the handle a repeater UI holds on to. It owns (or
//! mirrors, when the caller owns the value) a [`Collection`], and exposes the
//! five operations that change it along with queries for what each entry is
//! currently allowed to do.

use std::fmt;
use std::rc::Rc;

use crate::announce::Announcement;
use crate::announce::Announcer;
use crate::announce::Silent;
use crate::constraint::Constraints;
use crate::constraint::Permissions;
use crate::state::ControllableState;
use crate::state::OnChange;
use crate::state::StateOwner;

mod item;
pub mod ops;

pub use item::Collection;
pub use item::Item;
pub use item::ItemId;
pub use item::Merge;

/// Options for constructing a [`Reorderable`].
pub struct Options<T> {
  /// Which actions are locked, and where.
  pub constraints: Constraints,
  /// The length at which the add affordance is withdrawn.
  pub max: Option<usize>,
  /// Where move and removal narrations go.
  pub announcer: Box<dyn Announcer>,
  /// Called with each proposed or committed collection.
  pub on_change: Option<OnChange<Collection<T>>>,
}

impl<T> Options<T> {
  /// Sets the constraints.
  pub fn constraints(mut self, constraints: Constraints) -> Self {
    self.constraints = constraints;
    self
  }

  /// Sets the maximum length shown to the add affordance.
  pub fn max(mut self, max: usize) -> Self {
    self.max = Some(max);
    self
  }

  /// Sets the announcer.
  pub fn announcer(mut self, announcer: impl Announcer + 'static) -> Self {
    self.announcer = Box::new(announcer);
    self
  }

  /// Sets the change callback.
  pub fn on_change(mut self, f: impl FnMut(&Collection<T>) + 'static) -> Self {
    self.on_change = Some(Box::new(f));
    self
  }
}

impl<T> Default for Options<T> {
  fn default() -> Self {
    Self {
      constraints: Constraints::default(),
      max: None,
      announcer: Box::new(Silent),
      on_change: None,
    }
  }
}

/// Whether an "add" control should be offered.
///
/// This is advisory; [`Reorderable::append()`] works regardless.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AddAffordance {
  /// Adding is allowed.
  Available,
  /// Everything is disabled.
  Hidden,
  /// The collection has reached its maximum length.
  MaxReached {
    /// The configured maximum.
    max: usize,
  },
}

/// An ordered collection of items that can be edited and reordered.
///
/// See the [crate documentation](crate) for an overview.
pub struct Reorderable<T> {
  state: ControllableState<Collection<T>>,
  constraints: Constraints,
  max: Option<usize>,
  announcer: Box<dyn Announcer>,
}

impl<T> Reorderable<T> {
  /// Creates an internally-owned collection from payloads, generating an id
  /// for each.
  pub fn new(
    initial: impl IntoIterator<Item = T>,
    options: Options<T>,
  ) -> Self {
    Self::from_items(initial.into_iter().map(Item::generated), options)
  }

  /// Creates an internally-owned collection from already-identified items.
  pub fn from_items(
    initial: impl IntoIterator<Item = Item<T>>,
    options: Options<T>,
  ) -> Self {
    let items: Collection<T> = initial.into_iter().collect();
    Self::with_state(options, |on_change| {
      ControllableState::uncontrolled(items, on_change)
    })
  }

  /// Creates a collection whose value is owned by the caller.
  ///
  /// Operations propose new collections to `options.on_change`; the value seen
  /// through [`items()`] only changes on [`sync()`].
  ///
  /// [`items()`]: Self::items
  /// [`sync()`]: Self::sync
  pub fn controlled(items: Collection<T>, options: Options<T>) -> Self {
    Self::with_state(options, |on_change| {
      ControllableState::controlled(items, on_change)
    })
  }

  fn with_state(
    options: Options<T>,
    state: impl FnOnce(
      Option<OnChange<Collection<T>>>,
    ) -> ControllableState<Collection<T>>,
  ) -> Self {
    let Options {
      constraints,
      max,
      announcer,
      on_change,
    } = options;
    Self {
      state: state(on_change),
      constraints,
      max,
      announcer,
    }
  }

  /// Returns who owns the collection.
  pub fn owner(&self) -> StateOwner {
    self.state.owner()
  }

  /// Returns the current collection.
  pub fn items(&self) -> &Collection<T> {
    self.state.get()
  }

  /// Returns the number of items.
  pub fn total(&self) -> usize {
    self.items().len()
  }

  /// Returns whether there are no items.
  pub fn is_empty(&self) -> bool {
    self.items().is_empty()
  }

  /// Returns the item at `index`.
  pub fn get(&self, index: usize) -> Option<&Item<T>> {
    self.items().get(index).map(|item| &**item)
  }

  /// Returns the item ids, in order.
  pub fn ids(&self) -> impl Iterator<Item = &ItemId> + '_ {
    self.items().ids()
  }

  /// Adds `data` at the end under a generated id, returning that id.
  ///
  /// This does not check [`max`](Options::max); see [`add_affordance()`].
  ///
  /// [`add_affordance()`]: Self::add_affordance
  pub fn append(&mut self, data: T) -> ItemId {
    let id = ItemId::generate();
    self.append_with_id(id.clone(), data);
    id
  }

  /// Adds `data` at the end under the given id.
  pub fn append_with_id(&mut self, id: impl Into<ItemId>, data: T) {
    let next = ops::append(self.items(), Rc::new(Item::new(id, data)));
    tracing::debug!(total = next.len(), "append");
    self.commit(next);
  }

  /// Adds `data` at the front under a generated id, returning that id.
  pub fn prepend(&mut self, data: T) -> ItemId {
    let id = ItemId::generate();
    self.prepend_with_id(id.clone(), data);
    id
  }

  /// Adds `data` at the front under the given id.
  pub fn prepend_with_id(&mut self, id: impl Into<ItemId>, data: T) {
    let next = ops::prepend(self.items(), Rc::new(Item::new(id, data)));
    tracing::debug!(total = next.len(), "prepend");
    self.commit(next);
  }

  /// Moves the item at `from` to `to`, wrapping `to` around the ends.
  ///
  /// Returns the position the item landed at, or `None` if `from` was stale.
  /// Every in-range move is announced, including one that wraps back onto its
  /// own slot.
  pub fn move_item(&mut self, from: usize, to: isize) -> Option<usize> {
    match ops::move_item(self.items(), from, to) {
      Some((next, landed)) => {
        tracing::debug!(from, to, landed, "move");
        self.commit(next);
        self.announcer.announce(Announcement::moved(from, landed));
        Some(landed)
      }
      None => {
        tracing::debug!(from, total = self.total(), "ignoring stale move");
        None
      }
    }
  }

  /// Removes the item at `index`, returning whether it existed.
  pub fn remove(&mut self, index: usize) -> bool {
    match ops::remove(self.items(), index) {
      Some(next) => {
        tracing::debug!(index, total = next.len(), "remove");
        self.commit(next);
        self.announcer.announce(Announcement::removed(index));
        true
      }
      None => {
        tracing::debug!(index, total = self.total(), "ignoring stale remove");
        false
      }
    }
  }

  /// Shallow-merges `patch` into the payload at `index`, keeping its id.
  ///
  /// Returns whether `index` referred to an item.
  pub fn update(&mut self, index: usize, patch: T::Patch) -> bool
  where
    T: Merge,
  {
    let next = ops::update(self.items(), index, |item| {
      Rc::new(Item {
        id: item.id.clone(),
        data: item.data.merge(patch),
      })
    });
    match next {
      Some(next) => {
        tracing::debug!(index, "update");
        self.commit(next);
        true
      }
      None => {
        tracing::debug!(index, total = self.total(), "ignoring stale update");
        false
      }
    }
  }

  fn commit(&mut self, next: Vec<Rc<Item<T>>>) {
    self.state.set(next.into());
  }

  /// Supplies the caller's latest collection, for caller-owned collections.
  ///
  /// Ignored for internally-owned ones.
  pub fn sync(&mut self, items: Collection<T>) {
    self.state.sync(items);
  }

  /// Delivers pending change notifications; see
  /// [`ControllableState::flush()`].
  pub fn flush(&mut self) -> usize {
    self.state.flush()
  }

  /// Returns the current constraints.
  pub fn constraints(&self) -> &Constraints {
    &self.constraints
  }

  /// Replaces the constraints.
  pub fn set_constraints(&mut self, constraints: Constraints) {
    self.constraints = constraints;
  }

  /// Returns the configured maximum length.
  pub fn max(&self) -> Option<usize> {
    self.max
  }

  /// Resolves what the entry at `index` may currently do.
  pub fn permissions(&self, index: usize) -> Permissions {
    self.constraints.resolve(index, self.total())
  }

  /// Returns whether the entry at `index` may move towards the front.
  pub fn can_move_up(&self, index: usize) -> bool {
    self.permissions(index).move_up
  }

  /// Returns whether the entry at `index` may move towards the back.
  pub fn can_move_down(&self, index: usize) -> bool {
    self.permissions(index).move_down
  }

  /// Returns whether the entry at `index` may be edited.
  pub fn can_edit(&self, index: usize) -> bool {
    self.permissions(index).edit
  }

  /// Returns whether the entry at `index` may be removed.
  pub fn can_remove(&self, index: usize) -> bool {
    self.permissions(index).remove
  }

  /// Returns whether an "add" control should be offered.
  pub fn add_affordance(&self) -> AddAffordance {
    if self.constraints.disabled {
      return AddAffordance::Hidden;
    }
    match self.max {
      Some(max) if self.total() >= max => AddAffordance::MaxReached { max },
      _ => AddAffordance::Available,
    }
  }

  /// Shorthand for `add_affordance() == AddAffordance::Available`.
  pub fn can_add(&self) -> bool {
    self.add_affordance() == AddAffordance::Available
  }
}

impl<T: fmt::Debug> fmt::Debug for Reorderable<T> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("Reorderable")
      .field("state", &self.state)
      .field("constraints", &self.constraints)
      .field("max", &self.max)
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use std::cell::RefCell;

  use serde_json::json;
  use serde_json::Value;

  type Log<T> = Rc<RefCell<Vec<T>>>;

  fn log<T>() -> Log<T> {
    Rc::new(RefCell::new(Vec::new()))
  }

  fn options<T: 'static>(
    heard: &Log<Announcement>,
    changes: &Log<Vec<ItemId>>,
  ) -> Options<T> {
    let heard = Rc::clone(heard);
    let changes = Rc::clone(changes);
    Options::default()
      .announcer(move |a: Announcement| heard.borrow_mut().push(a))
      .on_change(move |c: &Collection<T>| {
        changes.borrow_mut().push(c.ids().cloned().collect())
      })
  }

  fn abcd() -> Vec<Item<char>> {
    vec![
      Item::new("a", 'A'),
      Item::new("b", 'B'),
      Item::new("c", 'C'),
      Item::new("d", 'D'),
    ]
  }

  fn data<T: Copy>(r: &Reorderable<T>) -> Vec<T> {
    r.items().iter().map(|i| i.data).collect()
  }

  #[test]
  fn scenario() {
    let heard = log();
    let changes = log();
    let mut r = Reorderable::from_items(abcd(), options(&heard, &changes));

    assert_eq!(r.move_item(0, 2), Some(2));
    assert_eq!(data(&r), vec!['B', 'C', 'A', 'D']);

    assert_eq!(r.move_item(3, -1), Some(3));
    assert_eq!(data(&r), vec!['B', 'C', 'A', 'D']);

    assert!(r.remove(1));
    assert_eq!(data(&r), vec!['B', 'A', 'D']);

    let heard = heard
      .borrow()
      .iter()
      .map(ToString::to_string)
      .collect::<Vec<_>>();
    assert_eq!(
      heard,
      vec![
        "moved position 1 to position 3",
        "moved position 4 to position 4",
        "removed item at position 2",
      ]
    );

    // The wrapped no-op move did not count as a change.
    assert!(changes.borrow().is_empty());
    assert_eq!(r.flush(), 2);
    assert_eq!(changes.borrow().len(), 2);
  }

  #[test]
  fn internal_append_commits_then_notifies_once() {
    let heard = log();
    let changes = log();
    let mut r = Reorderable::from_items(abcd(), options(&heard, &changes));

    let id = r.append('E');
    assert_eq!(r.total(), 5);
    assert!(changes.borrow().is_empty());

    r.flush();
    let changes = changes.borrow();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].last(), Some(&id));
    assert_eq!(changes[0].len(), 5);
  }

  #[test]
  fn untouched_items_keep_identity() {
    let mut r = Reorderable::from_items(abcd(), Options::default());
    let before = r.items().clone();
    r.move_item(0, 1);
    let after = r.items();
    assert!(Rc::ptr_eq(&before[0], &after[1]));
    assert!(Rc::ptr_eq(&before[1], &after[0]));
    assert!(Rc::ptr_eq(&before[3], &after[3]));
  }

  #[test]
  fn controlled_proposes_without_changing() {
    let heard = log();
    let changes = log();
    let items = abcd().into_iter().collect::<Collection<_>>();
    let mut r = Reorderable::controlled(items, options(&heard, &changes));
    assert_eq!(r.owner(), StateOwner::External);

    r.append_with_id("e", 'E');
    r.move_item(0, 1);
    assert_eq!(data(&r), vec!['A', 'B', 'C', 'D']);
    assert_eq!(
      *changes.borrow(),
      vec![
        vec!["a", "b", "c", "d", "e"]
          .into_iter()
          .map(ItemId::from)
          .collect::<Vec<_>>(),
        vec!["b", "a", "c", "d"]
          .into_iter()
          .map(ItemId::from)
          .collect::<Vec<_>>(),
      ]
    );
    // Moves are narrated even though the owner has yet to accept them.
    assert_eq!(heard.borrow().len(), 1);

    // Moving onto itself proposes nothing.
    r.move_item(2, 2);
    assert_eq!(changes.borrow().len(), 2);
  }

  #[test]
  fn controlled_follows_sync() {
    let proposed = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&proposed);
    let items = abcd().into_iter().collect::<Collection<_>>();
    let mut r = Reorderable::controlled(
      items,
      Options::default().on_change(move |c: &Collection<char>| {
        *sink.borrow_mut() = Some(c.clone())
      }),
    );

    r.remove(0);
    let next = proposed.borrow_mut().take().unwrap();
    r.sync(next);
    assert_eq!(data(&r), vec!['B', 'C', 'D']);
  }

  #[test]
  fn stale_indices_are_quiet() {
    let heard = log();
    let changes = log();
    let mut r = Reorderable::from_items(abcd(), options(&heard, &changes));
    assert_eq!(r.move_item(7, 0), None);
    assert!(!r.remove(4));
    assert_eq!(r.flush(), 0);
    assert!(heard.borrow().is_empty());
    assert_eq!(r.total(), 4);
  }

  #[test]
  fn update_merges_payload_in_place() {
    let mut r = Reorderable::from_items(
      vec![
        Item::new("x", json!({ "title": "one", "done": false })),
        Item::new("y", json!({ "title": "two" })),
      ],
      Options::default(),
    );
    let untouched = Rc::clone(&r.items()[1]);

    assert!(r.update(0, json!({ "done": true })));
    assert_eq!(r.items()[0].id, ItemId::from("x"));
    assert_eq!(r.items()[0].data, json!({ "title": "one", "done": true }));
    assert!(Rc::ptr_eq(&untouched, &r.items()[1]));

    assert!(!r.update(2, Value::Null));
  }

  #[test]
  fn max_only_affects_affordance() {
    let mut r = Reorderable::new(vec![1, 2], Options::default().max(2));
    assert_eq!(r.add_affordance(), AddAffordance::MaxReached { max: 2 });
    assert!(!r.can_add());

    r.append(3);
    assert_eq!(r.total(), 3);

    r.remove(0);
    r.remove(0);
    assert!(r.can_add());
  }

  #[test]
  fn disabled_hides_add_and_locks_entries() {
    let r = Reorderable::new(
      vec![1, 2, 3],
      Options::default().constraints(Constraints::new().disabled(true)),
    );
    assert_eq!(r.add_affordance(), AddAffordance::Hidden);
    assert!(!r.can_move_up(1));
    assert!(!r.can_move_down(1));
    assert!(!r.can_edit(1));
    assert!(!r.can_remove(1));
  }

  #[test]
  fn locks_follow_the_slot() {
    let mut r = Reorderable::from_items(
      abcd(),
      Options::default().constraints(
        Constraints::new().lock_edits([0]).lock_removals([0]),
      ),
    );
    assert!(!r.can_edit(0));
    r.move_item(1, 0);
    assert_eq!(r.get(0).map(|i| i.data), Some('B'));
    assert!(!r.can_edit(0));
    assert!(r.can_edit(1));
    assert!(!r.can_remove(0));
  }
}
