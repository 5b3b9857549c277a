//! Rendering.

use tui::backend::Backend;
use tui::layout::Constraint;
use tui::layout::Direction;
use tui::layout::Layout;
use tui::layout::Rect;
use tui::style::Color;
use tui::style::Modifier;
use tui::style::Style;
use tui::text::Span;
use tui::text::Spans;
use tui::widgets::Block;
use tui::widgets::Borders;
use tui::widgets::List;
use tui::widgets::ListItem;
use tui::widgets::ListState;
use tui::widgets::Paragraph;
use tui::Frame;

use repeater::AddAffordance;
use repeater::Permissions;

use crate::app::App;

#[derive(Copy, Clone, Debug)]
pub struct StyleSheet {
  pub unfocused: Style,
  pub selected: Style,
  pub allowed: Style,
  pub locked: Style,
}

impl Default for StyleSheet {
  fn default() -> Self {
    StyleSheet {
      unfocused: Style::default().fg(Color::Gray),
      selected: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
      allowed: Style::default().fg(Color::Green),
      locked: Style::default().fg(Color::DarkGray),
    }
  }
}

/// Renders the whole editor onto a frame.
pub fn render<B: Backend>(app: &App, f: &mut Frame<B>) {
  let style_sheet = StyleSheet::default();
  let rects = Layout::default()
    .direction(Direction::Vertical)
    .margin(1)
    .constraints([Constraint::Min(3), Constraint::Length(5)].as_ref())
    .split(f.size());

  render_cards(app, f, rects[0], &style_sheet);
  render_footer(app, f, rects[1], &style_sheet);
}

fn render_cards<B: Backend>(
  app: &App,
  f: &mut Frame<B>,
  rect: Rect,
  style_sheet: &StyleSheet,
) {
  let cards = app.cards();
  let block = Block::default()
    .title(format!(" Cards ({}) ", cards.total()))
    .borders(Borders::ALL);

  if cards.is_empty() {
    let empty = Paragraph::new("No cards yet.")
      .style(style_sheet.unfocused)
      .block(block);
    f.render_widget(empty, rect);
    return;
  }

  let items = cards
    .items()
    .iter()
    .enumerate()
    .map(|(i, card)| {
      let p = cards.permissions(i);
      let mut spans = vec![Span::raw(format!(
        "{:>2}. {:<24}",
        i + 1,
        card.data.title
      ))];
      spans.extend(markers(p, style_sheet));
      if card.data.edits > 0 {
        spans.push(Span::styled(
          format!("  ({} edits)", card.data.edits),
          style_sheet.unfocused,
        ));
      }
      ListItem::new(Spans::from(spans))
    })
    .collect::<Vec<_>>();

  let mut state = ListState::default();
  state.select(app.focused_index());

  let list = List::new(items)
    .block(block)
    .style(style_sheet.unfocused)
    .highlight_style(style_sheet.selected)
    .highlight_symbol("➤ ");
  f.render_stateful_widget(list, rect, &mut state);
}

/// One marker per action; dimmed when the action is locked.
fn markers(p: Permissions, style_sheet: &StyleSheet) -> Vec<Span<'static>> {
  [
    ("↑", p.move_up),
    ("↓", p.move_down),
    ("✎", p.edit),
    ("✖", p.remove),
  ]
  .iter()
  .map(|&(symbol, allowed)| {
    let style = if allowed {
      style_sheet.allowed
    } else {
      style_sheet.locked
    };
    Span::styled(format!(" {}", symbol), style)
  })
  .collect()
}

fn render_footer<B: Backend>(
  app: &App,
  f: &mut Frame<B>,
  rect: Rect,
  style_sheet: &StyleSheet,
) {
  let add = match app.cards().add_affordance() {
    AddAffordance::Available => "a/p: add card".to_string(),
    AddAffordance::Hidden => String::new(),
    AddAffordance::MaxReached { max } => {
      format!("You can have at most {} cards.", max)
    }
  };

  let mut lines = vec![Spans::from(vec![
    Span::styled(
      "↑↓ focus  ^↑^↓/K J move  e edit  d remove  q quit  ",
      style_sheet.unfocused,
    ),
    Span::raw(add),
  ])];
  let live = app.live_region();
  lines.extend(
    live
      .messages()
      .map(|m| Spans::from(Span::styled(m.to_string(), style_sheet.selected))),
  );

  let footer = Paragraph::new(lines)
    .block(Block::default().title(" Announcements ").borders(Borders::TOP));
  f.render_widget(footer, rect);
}
