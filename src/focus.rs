//! Keyboard focus traversal between entries.
//!
//! Rather than walk a live UI tree, the host keeps a [`Registry`]: the ordered
//! list of nodes that sit side by side in the list container, each marked as
//! an entry or not, plus links from nodes nested inside an entry back to their
//! parent. The registry is rebuilt whenever the collection changes, and
//! traversal is then just a scan over it in either direction.

use std::collections::HashMap;
use std::hash::Hash;

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;

/// A node positioned directly inside the list container.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Node<K> {
  /// A list entry, which can take focus.
  Entry(K),
  /// Anything else, such as a divider or an "add" button.
  Other(K),
}

impl<K> Node<K> {
  /// Returns this node's identifier.
  pub fn id(&self) -> &K {
    match self {
      Self::Entry(id) | Self::Other(id) => id,
    }
  }

  /// Returns whether this is a list entry.
  pub fn is_entry(&self) -> bool {
    matches!(self, Self::Entry(_))
  }
}

/// The ordered nodes of a list container.
#[derive(Clone, Debug)]
pub struct Registry<K> {
  siblings: Vec<Node<K>>,
  parents: HashMap<K, K>,
}

impl<K: Clone + Eq + Hash> Registry<K> {
  /// Creates an empty registry.
  pub fn new() -> Self {
    Self {
      siblings: Vec::new(),
      parents: HashMap::new(),
    }
  }

  /// Creates a registry made up of nothing but entries.
  pub fn entries(ids: impl IntoIterator<Item = K>) -> Self {
    let mut registry = Self::new();
    registry.siblings.extend(ids.into_iter().map(Node::Entry));
    registry
  }

  /// Appends an entry.
  pub fn entry(mut self, id: K) -> Self {
    self.siblings.push(Node::Entry(id));
    self
  }

  /// Appends a node that is not an entry.
  pub fn other(mut self, id: K) -> Self {
    self.siblings.push(Node::Other(id));
    self
  }

  /// Records that `child` is nested inside `parent`.
  pub fn nest(mut self, child: K, parent: K) -> Self {
    self.parents.insert(child, parent);
    self
  }

  /// Returns the nodes, in order.
  pub fn nodes(&self) -> &[Node<K>] {
    &self.siblings
  }

  /// Returns the index of the entry that is, or encloses, `target`.
  pub fn entry_for(&self, target: &K) -> Option<usize> {
    let mut current = target;
    // NOTE: Bounded so that a cyclic `nest()` cannot hang us.
    for _ in 0..=self.parents.len() {
      let found = self
        .siblings
        .iter()
        .position(|node| node.is_entry() && node.id() == current);
      if found.is_some() {
        return found;
      }
      current = self.parents.get(current)?;
    }
    None
  }

  /// Scans from the node at `from` in `direction`, skipping non-entries.
  pub fn scan(&self, from: usize, direction: Direction) -> Option<&K> {
    let found = match direction {
      Direction::Next => {
        self.siblings.get(from + 1..)?.iter().find(|n| n.is_entry())
      }
      Direction::Previous => {
        self.siblings.get(..from)?.iter().rev().find(|n| n.is_entry())
      }
    };
    found.map(Node::id)
  }

  fn contains_entry(&self, id: &K) -> bool {
    self
      .siblings
      .iter()
      .any(|node| node.is_entry() && node.id() == id)
  }
}

impl<K: Clone + Eq + Hash> Default for Registry<K> {
  fn default() -> Self {
    Self::new()
  }
}

/// A direction of traversal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
  /// Towards the front of the list.
  Previous,
  /// Towards the back of the list.
  Next,
}

/// One of the four arrow keys.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Arrow {
  /// ↑
  Up,
  /// ↓
  Down,
  /// ←
  Left,
  /// →
  Right,
}

impl Arrow {
  /// Returns the arrow for `code`, if it is one.
  pub fn from_code(code: KeyCode) -> Option<Self> {
    match code {
      KeyCode::Up => Some(Self::Up),
      KeyCode::Down => Some(Self::Down),
      KeyCode::Left => Some(Self::Left),
      KeyCode::Right => Some(Self::Right),
      _ => None,
    }
  }

  /// Returns the traversal this arrow is bound to.
  ///
  /// Only the vertical arrows traverse a list.
  pub fn direction(self) -> Option<Direction> {
    match self {
      Self::Up => Some(Direction::Previous),
      Self::Down => Some(Direction::Next),
      Self::Left | Self::Right => None,
    }
  }
}

/// The result of [`FocusNavigator::handle_key()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyOutcome<K> {
  /// The entry that should receive input focus, if it moved.
  pub focus: Option<K>,
  /// Whether the key's default action should be suppressed and the key kept
  /// from propagating further.
  pub claimed: bool,
}

impl<K> KeyOutcome<K> {
  fn ignored() -> Self {
    Self {
      focus: None,
      claimed: false,
    }
  }
}

/// Tracks which entry has focus and moves it in response to arrow keys.
#[derive(Clone, Debug)]
pub struct FocusNavigator<K> {
  registry: Registry<K>,
  focused: Option<K>,
}

impl<K: Clone + Eq + Hash> FocusNavigator<K> {
  /// Creates a navigator over an empty registry.
  pub fn new() -> Self {
    Self::with_registry(Registry::new())
  }

  /// Creates a navigator over `registry`.
  pub fn with_registry(registry: Registry<K>) -> Self {
    Self {
      registry,
      focused: None,
    }
  }

  /// Returns the current registry.
  pub fn registry(&self) -> &Registry<K> {
    &self.registry
  }

  /// Replaces the registry.
  ///
  /// Focus is dropped if the focused entry is no longer registered.
  pub fn set_registry(&mut self, registry: Registry<K>) {
    self.registry = registry;
    let stale = match &self.focused {
      Some(focused) => !self.registry.contains_entry(focused),
      None => false,
    };
    if stale {
      self.focused = None;
    }
  }

  /// Replaces the registry with one made of exactly `ids`.
  pub fn rebuild(&mut self, ids: impl IntoIterator<Item = K>) {
    self.set_registry(Registry::entries(ids));
  }

  /// Returns the focused entry.
  pub fn focused(&self) -> Option<&K> {
    self.focused.as_ref()
  }

  /// Focuses `id`, returning whether it is a registered entry.
  pub fn focus(&mut self, id: &K) -> bool {
    if !self.registry.contains_entry(id) {
      return false;
    }
    self.focused = Some(id.clone());
    true
  }

  /// Focuses the first entry, if there is one.
  pub fn focus_first(&mut self) -> Option<&K> {
    self.focused = self
      .registry
      .nodes()
      .iter()
      .find(|n| n.is_entry())
      .map(|n| n.id().clone());
    self.focused.as_ref()
  }

  /// Returns the entry next to `target` in `direction`, without focusing it.
  pub fn neighbor(&self, target: &K, direction: Direction) -> Option<&K> {
    let from = self.registry.entry_for(target)?;
    self.registry.scan(from, direction)
  }

  /// Processes a key pressed while `target` had focus.
  ///
  /// Every arrow key is claimed, whether or not focus actually moves.
  pub fn handle_key(&mut self, key: KeyEvent, target: &K) -> KeyOutcome<K> {
    let arrow = match Arrow::from_code(key.code) {
      Some(arrow) => arrow,
      None => return KeyOutcome::ignored(),
    };

    let focus = arrow
      .direction()
      .and_then(|direction| self.neighbor(target, direction))
      .cloned();
    if let Some(next) = &focus {
      tracing::trace!(?arrow, "moving focus");
      self.focused = Some(next.clone());
    }

    KeyOutcome {
      focus,
      claimed: true,
    }
  }
}

impl<K: Clone + Eq + Hash> Default for FocusNavigator<K> {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use crossterm::event::KeyModifiers;

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
      code,
      modifiers: KeyModifiers::NONE,
    }
  }

  fn mixed() -> FocusNavigator<&'static str> {
    FocusNavigator::with_registry(
      Registry::new()
        .entry("a")
        .other("divider")
        .entry("b")
        .other("add-button")
        .other("hint")
        .entry("c")
        .nest("a-title", "a")
        .nest("a-title-icon", "a-title"),
    )
  }

  #[test]
  fn down_skips_non_entries() {
    let mut nav = mixed();
    let out = nav.handle_key(key(KeyCode::Down), &"a");
    assert_eq!(out, KeyOutcome { focus: Some("b"), claimed: true });
    let out = nav.handle_key(key(KeyCode::Down), &"b");
    assert_eq!(out.focus, Some("c"));
    assert_eq!(nav.focused(), Some(&"c"));
  }

  #[test]
  fn up_scans_backwards() {
    let mut nav = mixed();
    assert_eq!(nav.handle_key(key(KeyCode::Up), &"c").focus, Some("b"));
    assert_eq!(nav.handle_key(key(KeyCode::Up), &"b").focus, Some("a"));
  }

  #[test]
  fn descendants_resolve_to_their_entry() {
    let mut nav = mixed();
    let out = nav.handle_key(key(KeyCode::Down), &"a-title-icon");
    assert_eq!(out.focus, Some("b"));
  }

  #[test]
  fn ends_claim_without_moving() {
    let mut nav = mixed();
    nav.focus(&"a");
    let out = nav.handle_key(key(KeyCode::Up), &"a");
    assert_eq!(out, KeyOutcome { focus: None, claimed: true });
    assert_eq!(nav.focused(), Some(&"a"));
    assert_eq!(nav.handle_key(key(KeyCode::Down), &"c").focus, None);
  }

  #[test]
  fn horizontal_arrows_are_only_claimed() {
    let mut nav = mixed();
    for code in [KeyCode::Left, KeyCode::Right] {
      let out = nav.handle_key(key(code), &"b");
      assert_eq!(out, KeyOutcome { focus: None, claimed: true });
    }
  }

  #[test]
  fn other_keys_pass_through() {
    let mut nav = mixed();
    let out = nav.handle_key(key(KeyCode::Enter), &"a");
    assert!(!out.claimed);
    assert!(!nav.handle_key(key(KeyCode::Char('j')), &"a").claimed);
  }

  #[test]
  fn unknown_targets_still_claim() {
    let mut nav = mixed();
    let out = nav.handle_key(key(KeyCode::Down), &"divider");
    assert_eq!(out, KeyOutcome { focus: None, claimed: true });
    assert!(nav.handle_key(key(KeyCode::Down), &"nowhere").claimed);
  }

  #[test]
  fn rebuild_keeps_surviving_focus() {
    let mut nav = FocusNavigator::new();
    nav.rebuild(vec![1, 2, 3]);
    assert!(nav.focus(&2));
    nav.rebuild(vec![2, 1, 3]);
    assert_eq!(nav.focused(), Some(&2));
    assert_eq!(nav.handle_key(key(KeyCode::Down), &2).focus, Some(1));
    nav.rebuild(vec![2, 3]);
    assert_eq!(nav.focused(), None);
    assert!(!nav.focus(&1));
  }

  #[test]
  fn cyclic_nesting_terminates() {
    let nav = FocusNavigator::with_registry(
      Registry::new().entry("a").nest("x", "y").nest("y", "x"),
    );
    assert_eq!(nav.neighbor(&"x", Direction::Next), None);
  }
}
