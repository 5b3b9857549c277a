//! The card editor's state and key handling.

use std::cell::Cell;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;

use repeater::Announcement;
use repeater::Collection;
use repeater::Config;
use repeater::FocusNavigator;
use repeater::ItemId;
use repeater::Reorderable;

use crate::card::Card;
use crate::card::CardPatch;

/// How many announcements the live region keeps around.
const LIVE_REGION_LEN: usize = 3;

/// What the event loop should do after a key.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Control {
  Continue,
  Quit,
}

/// The most recent announcements, newest last.
#[derive(Clone, Debug, Default)]
pub struct LiveRegion {
  messages: VecDeque<String>,
}

impl LiveRegion {
  pub fn push(&mut self, announcement: Announcement) {
    if self.messages.len() == LIVE_REGION_LEN {
      self.messages.pop_front();
    }
    self.messages.push_back(announcement.to_string());
  }

  pub fn messages(&self) -> impl Iterator<Item = &str> + '_ {
    self.messages.iter().map(String::as_str)
  }

  pub fn latest(&self) -> Option<&str> {
    self.messages.back().map(String::as_str)
  }
}

/// The root editor type.
pub struct App {
  cards: Reorderable<Card>,
  nav: FocusNavigator<ItemId>,
  live: Rc<RefCell<LiveRegion>>,
  commits: Rc<Cell<usize>>,
  // Where focus should land if the focused card disappears.
  fallback_focus: usize,
  // Focus to apply once the next change has settled.
  pending_focus: Option<ItemId>,
  next_number: usize,
}

impl App {
  /// Creates an editor from `config`, seeding it with the configured cards.
  pub fn new(config: &Config) -> Self {
    let live = Rc::new(RefCell::new(LiveRegion::default()));
    let commits = Rc::new(Cell::new(0));

    let options = config
      .options()
      .announcer({
        let live = Rc::clone(&live);
        move |a: Announcement| live.borrow_mut().push(a)
      })
      .on_change({
        let commits = Rc::clone(&commits);
        move |c: &Collection<Card>| {
          tracing::trace!(total = c.len(), "collection committed");
          commits.set(commits.get() + 1)
        }
      });

    let titles = if config.items.is_empty() {
      vec!["First card".to_string(), "Second card".to_string()]
    } else {
      config.items.clone()
    };
    let next_number = titles.len() + 1;
    let cards = Reorderable::new(titles.into_iter().map(Card::new), options);

    let mut app = Self {
      cards,
      nav: FocusNavigator::new(),
      live,
      commits,
      fallback_focus: 0,
      pending_focus: None,
      next_number,
    };
    app.settle();
    app
  }

  pub fn cards(&self) -> &Reorderable<Card> {
    &self.cards
  }

  pub fn live_region(&self) -> LiveRegion {
    self.live.borrow().clone()
  }

  /// Returns how many change notifications the collection has delivered.
  pub fn commits(&self) -> usize {
    self.commits.get()
  }

  /// Returns the position of the focused card.
  pub fn focused_index(&self) -> Option<usize> {
    let id = self.nav.focused()?;
    self.cards.items().position(id)
  }

  /// Processes a key press.
  ///
  /// Editing keys act on the focused card and are ignored when the action is
  /// not currently permitted, the same way a disabled button would be.
  pub fn process_key(&mut self, key: KeyEvent) -> Control {
    let m = key.modifiers;
    let focused = self.focused_index();

    match key.code {
      KeyCode::Char('c') if m == KeyModifiers::CONTROL => return Control::Quit,
      KeyCode::Char('q') => return Control::Quit,

      // Reordering, which takes precedence over focus traversal.
      KeyCode::Up if m == KeyModifiers::CONTROL => self.move_focused(-1),
      KeyCode::Down if m == KeyModifiers::CONTROL => self.move_focused(1),
      KeyCode::Char('K') => self.move_focused(-1),
      KeyCode::Char('J') => self.move_focused(1),

      KeyCode::Char('a') if self.cards.can_add() => {
        let card = self.fresh_card();
        self.pending_focus = Some(self.cards.append(card));
      }
      KeyCode::Char('p') if self.cards.can_add() => {
        let card = self.fresh_card();
        self.pending_focus = Some(self.cards.prepend(card));
      }

      KeyCode::Char('d') => {
        if let Some(i) = focused.filter(|&i| self.cards.can_remove(i)) {
          self.fallback_focus = i;
          self.cards.remove(i);
        }
      }
      KeyCode::Char('e') => {
        if let Some(i) = focused.filter(|&i| self.cards.can_edit(i)) {
          let edits = self.cards.get(i).map_or(0, |card| card.data.edits);
          self.cards.update(
            i,
            CardPatch {
              edits: Some(edits + 1),
              ..CardPatch::default()
            },
          );
        }
      }

      _ => match self.nav.focused().cloned() {
        Some(target) => {
          let outcome = self.nav.handle_key(key, &target);
          if outcome.claimed {
            tracing::trace!(focus = ?outcome.focus, "key claimed");
          }
        }
        None => {
          self.nav.focus_first();
        }
      },
    }

    Control::Continue
  }

  /// Runs the post-event step: delivers change notifications and rebuilds the
  /// focus registry from the new order.
  pub fn settle(&mut self) {
    self.cards.flush();
    self.nav.rebuild(self.cards.ids().cloned());

    if let Some(id) = self.pending_focus.take() {
      self.nav.focus(&id);
    }
    if self.nav.focused().is_none() {
      let index = self.fallback_focus.min(self.cards.total().saturating_sub(1));
      if let Some(id) = self.cards.get(index).map(|card| card.id.clone()) {
        self.nav.focus(&id);
      }
    }
  }

  fn move_focused(&mut self, delta: isize) {
    let i = match self.focused_index() {
      Some(i) => i,
      None => return,
    };
    let allowed = if delta < 0 {
      self.cards.can_move_up(i)
    } else {
      self.cards.can_move_down(i)
    };
    if allowed {
      self.cards.move_item(i, i as isize + delta);
    }
  }

  fn fresh_card(&mut self) -> Card {
    let card = Card::new(format!("Card {}", self.next_number));
    self.next_number += 1;
    card
  }
}
