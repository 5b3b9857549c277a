//! Errors.

use std::io;

/// An error produced while loading a [`Config`](crate::Config).
///
/// None of the collection operations can fail; see [`Reorderable`] for how
/// stale indices are handled.
///
/// [`Reorderable`]: crate::Reorderable
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum Error {
  #[error(transparent)]
  Io(#[from] io::Error),

  #[error(transparent)]
  Json(#[from] serde_json::Error),

  #[error("could not find a configuration directory")]
  NoConfigDir,
}
