//! The records held by each card.

use repeater::Merge;

/// One card in the editor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
  pub title: String,
  pub edits: u32,
}

impl Card {
  pub fn new(title: impl Into<String>) -> Self {
    Self {
      title: title.into(),
      edits: 0,
    }
  }
}

/// A partial [`Card`]; `None` fields are left alone.
#[derive(Clone, Debug, Default)]
pub struct CardPatch {
  pub title: Option<String>,
  pub edits: Option<u32>,
}

impl Merge for Card {
  type Patch = CardPatch;

  fn merge(&self, patch: CardPatch) -> Self {
    Self {
      title: patch.title.unwrap_or_else(|| self.title.clone()),
      edits: patch.edits.unwrap_or(self.edits),
    }
  }
}
