//! Pure sequence transforms.
//!
//! Every function here takes the current sequence by reference and returns a
//! brand new one, cloning elements rather than touching them. For sequences of
//! `Rc`s, that means untouched items keep their identity.
//!
//! Indices that do not refer to an element are never an error: they may come
//! from a view of the sequence that has since been superseded, so the
//! functions that take them return `None` and leave the caller to carry on.

/// Normalizes `to` into `0..len` by wrapping around, rather than clamping.
///
/// `len` must be nonzero.
pub fn wrap(to: isize, len: usize) -> usize {
  to.rem_euclid(len as isize) as usize
}

/// Returns `items` with `item` added at the end.
pub fn append<E: Clone>(items: &[E], item: E) -> Vec<E> {
  let mut next = Vec::with_capacity(items.len() + 1);
  next.extend_from_slice(items);
  next.push(item);
  next
}

/// Returns `items` with `item` added at the front.
pub fn prepend<E: Clone>(items: &[E], item: E) -> Vec<E> {
  let mut next = Vec::with_capacity(items.len() + 1);
  next.push(item);
  next.extend_from_slice(items);
  next
}

/// Moves the element at `from` so that it ends up at `to`.
///
/// `to` wraps around the length of `items`, so `from - 1` on the first element
/// sends it to the back and `from + 1` on the last sends it to the front. The
/// element is removed first and then inserted at the wrapped position of what
/// remains.
///
/// Returns the new sequence and the position the element landed at, or
/// `None` if `from` is out of range.
pub fn move_item<E: Clone>(
  items: &[E],
  from: usize,
  to: isize,
) -> Option<(Vec<E>, usize)> {
  if from >= items.len() {
    return None;
  }

  // NOTE: This is at most `len - 1`, which is exactly the length after
  // removal, so the insertion below cannot go out of bounds.
  let target = wrap(to, items.len());

  let mut next = items.to_vec();
  let moved = next.remove(from);
  next.insert(target, moved);
  Some((next, target))
}

/// Removes the element at `index`.
///
/// Returns `None` if `index` is out of range.
pub fn remove<E: Clone>(items: &[E], index: usize) -> Option<Vec<E>> {
  if index >= items.len() {
    return None;
  }

  let mut next = items.to_vec();
  next.remove(index);
  Some(next)
}

/// Replaces the element at `index` with `f` applied to it.
///
/// Returns `None` if `index` is out of range.
pub fn update<E: Clone>(
  items: &[E],
  index: usize,
  f: impl FnOnce(&E) -> E,
) -> Option<Vec<E>> {
  let replacement = f(items.get(index)?);
  let mut next = items.to_vec();
  next[index] = replacement;
  Some(next)
}
