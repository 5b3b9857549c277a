//! Narration of order changes for assistive technology.

use std::fmt;

/// A description of a committed change, using 1-based positions.
///
/// The [`Display`](fmt::Display) impl is the default English phrasing;
/// announcers that localize should match on the variant instead.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Announcement {
  /// The entry at `from` now lives at `to`.
  Moved {
    /// The position the entry left, starting at 1.
    from: usize,
    /// The position the entry arrived at, starting at 1.
    to: usize,
  },
  /// The entry at `position` was removed.
  Removed {
    /// The position of the removed entry, starting at 1.
    position: usize,
  },
}

impl Announcement {
  /// Builds a move announcement from 0-based indices.
  pub fn moved(from: usize, to: usize) -> Self {
    Self::Moved {
      from: from + 1,
      to: to + 1,
    }
  }

  /// Builds a removal announcement from a 0-based index.
  pub fn removed(index: usize) -> Self {
    Self::Removed {
      position: index + 1,
    }
  }
}

impl fmt::Display for Announcement {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Self::Moved { from, to } => {
        write!(f, "moved position {} to position {}", from, to)
      }
      Self::Removed { position } => {
        write!(f, "removed item at position {}", position)
      }
    }
  }
}

/// A sink for [`Announcement`]s, such as a screen-reader live region.
pub trait Announcer {
  /// Narrates `announcement`.
  fn announce(&mut self, announcement: Announcement);
}

impl<F> Announcer for F
where
  F: FnMut(Announcement),
{
  fn announce(&mut self, announcement: Announcement) {
    self(announcement)
  }
}

/// An [`Announcer`] that drops everything.
#[derive(Copy, Clone, Debug, Default)]
pub struct Silent;

impl Announcer for Silent {
  fn announce(&mut self, _: Announcement) {}
}
