//! Identified items and ordered collections of them.

use std::fmt;
use std::iter::FromIterator;
use std::ops::Deref;
use std::rc::Rc;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use uuid::Uuid;

/// A stable identifier for an [`Item`].
///
/// Uniqueness within a collection is up to the caller. Nothing in this crate
/// checks for duplicates, and every operation addresses items by position, so
/// duplicate ids never cause one item's update to land on another.
#[derive(
  Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
  /// Wraps an existing identifier.
  pub fn new(id: impl Into<String>) -> Self {
    Self(id.into())
  }

  /// Generates a fresh random identifier.
  pub fn generate() -> Self {
    Self(Uuid::new_v4().to_string())
  }

  /// Returns the identifier as a string.
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for ItemId {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for ItemId {
  fn from(id: &str) -> Self {
    Self::new(id)
  }
}

impl From<String> for ItemId {
  fn from(id: String) -> Self {
    Self(id)
  }
}

/// A caller-defined record plus its identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item<T> {
  /// This item's identifier.
  pub id: ItemId,
  /// The caller's payload.
  pub data: T,
}

impl<T> Item<T> {
  /// Creates an item with the given id.
  pub fn new(id: impl Into<ItemId>, data: T) -> Self {
    Self {
      id: id.into(),
      data,
    }
  }

  /// Creates an item with a freshly generated id.
  pub fn generated(data: T) -> Self {
    Self::new(ItemId::generate(), data)
  }
}

/// A shallow merge of a partial record into a whole one.
pub trait Merge {
  /// The partial record type.
  type Patch;

  /// Returns a copy of `self` with `patch` applied over it.
  fn merge(&self, patch: Self::Patch) -> Self;
}

impl Merge for Map<String, Value> {
  type Patch = Map<String, Value>;

  /// Keys present in `patch` replace those in `self`; nested objects are not
  /// merged recursively.
  fn merge(&self, patch: Self::Patch) -> Self {
    let mut merged = self.clone();
    merged.extend(patch);
    merged
  }
}

impl Merge for Value {
  type Patch = Value;

  /// Objects merge shallowly into objects; any other patch replaces `self`.
  fn merge(&self, patch: Self::Patch) -> Self {
    match (self, patch) {
      (Value::Object(base), Value::Object(patch)) => {
        Value::Object(base.merge(patch))
      }
      (_, patch) => patch,
    }
  }
}

/// An ordered, immutable sequence of shared items.
///
/// Operations never modify a collection; they build a new one that shares
/// every untouched item with the old one. Equality is by identity: two
/// collections are equal when they hold the same allocations in the same
/// order, regardless of whether `T` is comparable.
#[derive(Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection<T>(Vec<Rc<Item<T>>>);

impl<T> Collection<T> {
  /// Returns an empty collection.
  pub fn new() -> Self {
    Self(Vec::new())
  }

  /// Returns the items as a slice.
  pub fn as_slice(&self) -> &[Rc<Item<T>>] {
    &self.0
  }

  /// Returns the ids of the items, in order.
  pub fn ids(&self) -> impl Iterator<Item = &ItemId> + '_ {
    self.0.iter().map(|item| &item.id)
  }

  /// Returns the position of the first item with the given id.
  pub fn position(&self, id: &ItemId) -> Option<usize> {
    self.0.iter().position(|item| &item.id == id)
  }
}

impl<T> Default for Collection<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> Clone for Collection<T> {
  fn clone(&self) -> Self {
    Self(self.0.clone())
  }
}

impl<T> PartialEq for Collection<T> {
  fn eq(&self, other: &Self) -> bool {
    self.0.len() == other.0.len()
      && self.0.iter().zip(&other.0).all(|(a, b)| Rc::ptr_eq(a, b))
  }
}

impl<T> Eq for Collection<T> {}

impl<T> Deref for Collection<T> {
  type Target = [Rc<Item<T>>];
  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl<T> From<Vec<Rc<Item<T>>>> for Collection<T> {
  fn from(items: Vec<Rc<Item<T>>>) -> Self {
    Self(items)
  }
}

impl<T> FromIterator<Item<T>> for Collection<T> {
  fn from_iter<I: IntoIterator<Item = Item<T>>>(iter: I) -> Self {
    Self(iter.into_iter().map(Rc::new).collect())
  }
}

impl<T> FromIterator<Rc<Item<T>>> for Collection<T> {
  fn from_iter<I: IntoIterator<Item = Rc<Item<T>>>>(iter: I) -> Self {
    Self(iter.into_iter().collect())
  }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
  type Item = &'a Rc<Item<T>>;
  type IntoIter = std::slice::Iter<'a, Rc<Item<T>>>;
  fn into_iter(self) -> Self::IntoIter {
    self.0.iter()
  }
}
