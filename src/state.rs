//! State that is owned either by the caller or by the engine.
//!
//! A [`ControllableState`] decides, once and for all at construction, who
//! holds the source of truth for a value:
//! - If the caller passed a value in, the state is [`StateOwner::External`].
//!   Setting a value only *proposes* it to the caller through the change
//!   callback; the held value changes when the caller [`sync`]s a new one.
//! - Otherwise the state is [`StateOwner::Internal`]. Setting a value commits
//!   it immediately, and the change callback runs later, during [`flush`].
//!
//! [`sync`]: ControllableState::sync
//! [`flush`]: ControllableState::flush

use std::collections::VecDeque;
use std::fmt;

/// A change callback, invoked with the next value.
pub type OnChange<T> = Box<dyn FnMut(&T)>;

/// Who owns the source of truth for a [`ControllableState`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StateOwner {
  /// The caller holds the value; the state only proposes changes.
  External,
  /// The state holds the value; notifications are advisory.
  Internal,
}

/// A value plus the policy for changing it.
pub struct ControllableState<T> {
  owner: StateOwner,
  // For `External`, the value last supplied by the caller.
  value: T,
  on_change: Option<OnChange<T>>,
  // NOTE: Only ever non-empty for `Internal`.
  pending: VecDeque<T>,
}

impl<T: Clone + PartialEq> ControllableState<T> {
  /// Creates a new state.
  ///
  /// The owner is [`StateOwner::External`] iff `controlled` is present, in
  /// which case `default` is discarded.
  pub fn new(
    controlled: Option<T>,
    default: T,
    on_change: Option<OnChange<T>>,
  ) -> Self {
    let (owner, value) = match controlled {
      Some(value) => (StateOwner::External, value),
      None => (StateOwner::Internal, default),
    };
    Self {
      owner,
      value,
      on_change,
      pending: VecDeque::new(),
    }
  }

  /// Creates an externally-owned state holding `value`.
  pub fn controlled(value: T, on_change: Option<OnChange<T>>) -> Self {
    Self::new(Some(value.clone()), value, on_change)
  }

  /// Creates an internally-owned state starting at `default`.
  pub fn uncontrolled(default: T, on_change: Option<OnChange<T>>) -> Self {
    Self::new(None, default, on_change)
  }

  /// Returns who owns this state.
  pub fn owner(&self) -> StateOwner {
    self.owner
  }

  /// Returns the current value.
  ///
  /// For an externally-owned state, this is always the value the caller last
  /// supplied, never a proposed one.
  pub fn get(&self) -> &T {
    &self.value
  }

  /// Sets the value to `next`.
  ///
  /// Returns whether `next` differed from the current value, i.e. whether a
  /// change was proposed (external) or committed (internal).
  pub fn set(&mut self, next: T) -> bool {
    if next == self.value {
      return false;
    }

    match self.owner {
      StateOwner::External => {
        tracing::trace!("proposing change to external owner");
        if let Some(on_change) = &mut self.on_change {
          on_change(&next);
        }
      }
      StateOwner::Internal => {
        if self.on_change.is_some() {
          self.pending.push_back(next.clone());
        }
        self.value = next;
      }
    }
    true
  }

  /// Sets the value to the result of applying `f` to the current value.
  pub fn update(&mut self, f: impl FnOnce(&T) -> T) -> bool {
    let next = f(&self.value);
    self.set(next)
  }

  /// Supplies a new value from the external owner.
  ///
  /// Internally-owned states cannot be taken over after construction; calling
  /// this on one is ignored.
  pub fn sync(&mut self, value: T) {
    match self.owner {
      StateOwner::External => self.value = value,
      StateOwner::Internal => {
        tracing::warn!("ignoring external value for internally-owned state")
      }
    }
  }

  /// Delivers every queued change notification, oldest first.
  ///
  /// This is the "after commit" half of an internal change; hosts call it once
  /// they are done dispatching the event that caused the change. Returns the
  /// number of notifications delivered.
  pub fn flush(&mut self) -> usize {
    let mut delivered = 0;
    while let Some(value) = self.pending.pop_front() {
      if let Some(on_change) = &mut self.on_change {
        on_change(&value);
      }
      delivered += 1;
    }
    if delivered > 0 {
      tracing::trace!(delivered, "flushed change notifications");
    }
    delivered
  }

  /// Returns whether there are notifications waiting for [`flush()`].
  ///
  /// [`flush()`]: Self::flush
  pub fn has_pending(&self) -> bool {
    !self.pending.is_empty()
  }
}

impl<T: fmt::Debug> fmt::Debug for ControllableState<T> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("ControllableState")
      .field("owner", &self.owner)
      .field("value", &self.value)
      .field("pending", &self.pending.len())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use std::cell::RefCell;
  use std::rc::Rc;

  fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, OnChange<T>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    (log, Box::new(move |v: &T| sink.borrow_mut().push(v.clone())))
  }

  #[test]
  fn owner_is_resolved_from_presence() {
    assert_eq!(
      ControllableState::new(Some(1), 0, None).owner(),
      StateOwner::External
    );
    assert_eq!(
      ControllableState::new(None, 0, None).owner(),
      StateOwner::Internal
    );
  }

  #[test]
  fn external_equal_candidate_is_silent() {
    let (log, cb) = recorder();
    let mut state = ControllableState::controlled(5, Some(cb));
    for _ in 0..3 {
      assert!(!state.set(5));
      assert!(!state.update(|v| *v));
    }
    assert!(log.borrow().is_empty());
    assert_eq!(*state.get(), 5);
  }

  #[test]
  fn external_differing_candidate_is_proposed_each_call() {
    let (log, cb) = recorder();
    let mut state = ControllableState::controlled(5, Some(cb));
    assert!(state.set(6));
    assert!(state.set(6));
    assert!(state.update(|v| v + 2));
    assert_eq!(*log.borrow(), vec![6, 6, 7]);
    assert_eq!(*state.get(), 5);
    assert!(!state.has_pending());

    state.sync(6);
    assert_eq!(*state.get(), 6);
    assert!(!state.set(6));
    assert_eq!(log.borrow().len(), 3);
  }

  #[test]
  fn internal_commits_now_and_notifies_on_flush() {
    let (log, cb) = recorder();
    let mut state = ControllableState::uncontrolled(0, Some(cb));
    assert!(state.set(1));
    assert_eq!(*state.get(), 1);
    assert!(log.borrow().is_empty());
    assert!(state.has_pending());

    assert_eq!(state.flush(), 1);
    assert_eq!(*log.borrow(), vec![1]);
    assert_eq!(state.flush(), 0);
    assert_eq!(*log.borrow(), vec![1]);
  }

  #[test]
  fn internal_notifies_once_per_distinct_change() {
    let (log, cb) = recorder();
    let mut state = ControllableState::uncontrolled(0, Some(cb));
    state.set(1);
    state.set(1);
    state.update(|v| v * 10);
    state.flush();
    assert_eq!(*log.borrow(), vec![1, 10]);
  }

  #[test]
  fn internal_ignores_sync() {
    let mut state = ControllableState::uncontrolled(3, None);
    state.sync(9);
    assert_eq!(*state.get(), 3);
  }

  #[test]
  fn missing_callback_is_a_no_op() {
    let mut ext = ControllableState::controlled(1, None);
    assert!(ext.set(2));
    assert_eq!(*ext.get(), 1);

    let mut int = ControllableState::uncontrolled(1, None);
    assert!(int.set(2));
    assert!(!int.has_pending());
    assert_eq!(int.flush(), 0);
    assert_eq!(*int.get(), 2);
  }
}
