use std::collections::HashSet;

use frizbee::{Config, match_indices};
use ratatui::buffer::Buffer;
use ratatui::crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols::border;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
	Block, Borders, Clear, HighlightSpacing, List, ListItem, ListState, ScrollbarState,
	StatefulWidget, Widget,
};

use super::scrollbar::{ScrollMetrics, point_in_rect, render_scrollbar};
use crate::item::Item;
use crate::style::Theme;

/// Marker drawn in front of the highlighted row.
pub const HIGHLIGHT_SYMBOL: &str = "▶ ";

/// Rows moved by page up/down.
const PAGE_ROWS: usize = 5;

/// Everything needed to draw one frame of the list.
#[derive(Debug, Clone, Copy)]
pub struct ListView<'a> {
	/// Items to display, already filtered.
	pub items: &'a [&'a Item],
	/// Query used to highlight matched characters.
	pub query: &'a str,
	/// Colours.
	pub theme: &'a Theme,
	/// Interpolated opacity of the panel in `[0, 1]`.
	pub opacity: f64,
}

/// A bordered, scrollable list of suggestions.
///
/// The list keeps a highlighted row for keyboard navigation and remembers
/// where it was last drawn so mouse clicks can be mapped back to items.
/// Activation is reported through a callback receiving the triggering event
/// and the item key.
#[derive(Debug, Default)]
pub struct VerticalList {
	state: ListState,
	panel_area: Option<Rect>,
	rows_area: Option<Rect>,
}

impl VerticalList {
	/// Create a list with no highlighted row.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Index of the highlighted row.
	#[must_use]
	pub fn selected(&self) -> Option<usize> {
		self.state.selected()
	}

	/// Highlight a row, or clear the highlight.
	pub fn select(&mut self, index: Option<usize>) {
		self.state.select(index);
	}

	/// Clear the highlight and scroll back to the top.
	pub fn reset(&mut self) {
		self.state = ListState::default();
	}

	/// Keep the highlight within `len` rows.
	pub fn clamp(&mut self, len: usize) {
		match self.state.selected() {
			Some(_) if len == 0 => self.state.select(None),
			Some(selected) if selected >= len => self.state.select(Some(len - 1)),
			_ => {}
		}
	}

	/// Whether a terminal cell lies within the drawn panel.
	#[must_use]
	pub fn contains(&self, column: u16, row: u16) -> bool {
		self.panel_area
			.is_some_and(|area| point_in_rect(column, row, area))
	}

	/// Forget the drawn areas, e.g. when the panel is hidden.
	pub fn clear_layout(&mut self) {
		self.panel_area = None;
		self.rows_area = None;
	}

	/// Item index drawn at the given terminal cell.
	#[must_use]
	pub fn item_at(&self, column: u16, row: u16, len: usize) -> Option<usize> {
		let rows = self.rows_area?;
		if !point_in_rect(column, row, rows) {
			return None;
		}
		let index = self.state.offset() + usize::from(row - rows.y);
		(index < len).then_some(index)
	}

	/// Move the highlight down, starting from the first row.
	pub fn move_down(&mut self, len: usize, rows: usize) {
		if len == 0 {
			return;
		}
		let next = match self.state.selected() {
			Some(selected) => selected.saturating_add(rows).min(len - 1),
			None => 0,
		};
		self.state.select(Some(next));
	}

	/// Move the highlight up, starting from the last row.
	pub fn move_up(&mut self, len: usize, rows: usize) {
		if len == 0 {
			return;
		}
		let next = match self.state.selected() {
			Some(selected) => selected.saturating_sub(rows),
			None => len - 1,
		};
		self.state.select(Some(next));
	}

	/// React to navigation and activation events.
	///
	/// `on_activate` is called with the event and the item key when a row is
	/// activated by `Enter` or a left click. Returns `true` when the event
	/// was consumed.
	pub fn handle_event<F>(&mut self, items: &[&Item], event: &Event, on_activate: F) -> bool
	where
		F: FnOnce(&Event, &str),
	{
		let len = items.len();
		match event {
			Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
				KeyCode::Down => {
					self.move_down(len, 1);
					len > 0
				}
				KeyCode::Up => {
					self.move_up(len, 1);
					len > 0
				}
				KeyCode::PageDown => {
					self.move_down(len, PAGE_ROWS);
					len > 0
				}
				KeyCode::PageUp => {
					self.move_up(len, PAGE_ROWS);
					len > 0
				}
				KeyCode::Enter => match self.state.selected().and_then(|index| items.get(index)) {
					Some(item) => {
						on_activate(event, &item.key);
						true
					}
					None => false,
				},
				_ => false,
			},
			Event::Mouse(mouse) => match mouse.kind {
				MouseEventKind::Down(MouseButton::Left) => {
					match self.item_at(mouse.column, mouse.row, len) {
						Some(index) => {
							self.state.select(Some(index));
							on_activate(event, &items[index].key);
							true
						}
						None => self.contains(mouse.column, mouse.row),
					}
				}
				MouseEventKind::ScrollDown if self.contains(mouse.column, mouse.row) => {
					self.move_down(len, 1);
					true
				}
				MouseEventKind::ScrollUp if self.contains(mouse.column, mouse.row) => {
					self.move_up(len, 1);
					true
				}
				_ => false,
			},
			_ => false,
		}
	}

	/// Draw the panel into `area`.
	pub fn render(&mut self, area: Rect, buf: &mut Buffer, view: ListView<'_>) {
		self.clear_layout();
		if area.is_empty() {
			return;
		}

		let theme = view.theme;
		let block = Block::default()
			.borders(Borders::ALL)
			.border_set(border::ROUNDED)
			.border_style(Theme::faded(theme.panel, view.opacity));
		let inner = block.inner(area);

		Clear.render(area, buf);
		block.render(area, buf);
		self.panel_area = Some(area);

		if inner.is_empty() {
			return;
		}

		self.clamp(view.items.len());
		let metrics = ScrollMetrics::compute(view.items.len(), usize::from(inner.height));
		let rows_area = if metrics.needs_scrollbar {
			Rect {
				width: inner.width.saturating_sub(1),
				..inner
			}
		} else {
			inner
		};

		let suggestion = Theme::faded(theme.suggestion, view.opacity);
		let matched = Theme::faded(theme.matched, view.opacity);
		let rows: Vec<ListItem<'_>> = view
			.items
			.iter()
			.map(|item| ListItem::new(row_line(&item.value, view.query, suggestion, matched)))
			.collect();
		let list = List::new(rows)
			.highlight_symbol(HIGHLIGHT_SYMBOL)
			.highlight_spacing(HighlightSpacing::Always)
			.highlight_style(Theme::faded(theme.selected, view.opacity));
		StatefulWidget::render(list, rows_area, buf, &mut self.state);
		self.rows_area = Some(rows_area);

		if metrics.needs_scrollbar {
			let mut scrollbar_state = ScrollbarState::new(metrics.content_length)
				.viewport_content_length(metrics.viewport_len)
				.position(metrics.scrollbar_position(self.state.offset()));
			render_scrollbar(buf, inner, &mut scrollbar_state, theme.scrollbar_style());
		}
	}
}

/// Build a row, styling the characters matched by `query`.
fn row_line<'a>(text: &'a str, query: &str, base: Style, matched: Style) -> Line<'a> {
	let positions: HashSet<usize> = matched_positions(text, query).into_iter().collect();
	if positions.is_empty() {
		return Line::from(Span::styled(text, base));
	}

	let mut spans = Vec::new();
	let mut run = String::new();
	let mut run_matched = false;
	for (index, ch) in text.chars().enumerate() {
		let is_matched = positions.contains(&index);
		if is_matched != run_matched && !run.is_empty() {
			let style = if run_matched { matched } else { base };
			spans.push(Span::styled(std::mem::take(&mut run), style));
		}
		run_matched = is_matched;
		run.push(ch);
	}
	if !run.is_empty() {
		let style = if run_matched { matched } else { base };
		spans.push(Span::styled(run, style));
	}
	Line::from(spans)
}

/// Character positions in `text` matched by `query`.
///
/// Uses frizbee's alignment when it finds one and falls back to the first
/// in-order, case-insensitive occurrence of each query character.
#[must_use]
pub fn matched_positions(text: &str, query: &str) -> Vec<usize> {
	if text.is_empty() || query.is_empty() {
		return Vec::new();
	}

	let config = Config {
		sort: false,
		..Config::default()
	};
	if let Some(matched) = match_indices(query, text, &config) {
		let bytes: HashSet<usize> = matched.indices.into_iter().collect();
		let positions: Vec<usize> = text
			.char_indices()
			.enumerate()
			.filter(|(_, (byte, _))| bytes.contains(byte))
			.map(|(index, _)| index)
			.collect();
		if !positions.is_empty() {
			return positions;
		}
	}

	greedy_positions(text, query)
}

fn greedy_positions(text: &str, query: &str) -> Vec<usize> {
	let mut positions = Vec::new();
	let mut candidates = text.chars().enumerate();
	for wanted in query.chars() {
		let found = candidates
			.by_ref()
			.find(|(_, ch)| ch.to_lowercase().eq(wanted.to_lowercase()));
		match found {
			Some((index, _)) => positions.push(index),
			None => return Vec::new(),
		}
	}
	positions
}

#[cfg(test)]
mod tests {
	use ratatui::crossterm::event::{
		KeyEvent, KeyModifiers, MouseEvent, MouseEventKind,
	};
	use ratatui::style::Modifier;

	use super::*;

	fn sample() -> Vec<Item> {
		(0..6)
			.map(|index| Item::new(format!("k{index}"), format!("item {index}")))
			.collect()
	}

	fn key(code: KeyCode) -> Event {
		Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
	}

	fn click(column: u16, row: u16) -> Event {
		Event::Mouse(MouseEvent {
			kind: MouseEventKind::Down(MouseButton::Left),
			column,
			row,
			modifiers: KeyModifiers::NONE,
		})
	}

	fn draw(list: &mut VerticalList, items: &[&Item], area: Rect) -> Buffer {
		let theme = Theme::default();
		let mut buf = Buffer::empty(area);
		list.render(
			area,
			&mut buf,
			ListView {
				items,
				query: "",
				theme: &theme,
				opacity: 1.0,
			},
		);
		buf
	}

	#[test]
	fn keyboard_navigation_is_clamped() {
		let items = sample();
		let refs: Vec<&Item> = items.iter().collect();
		let mut list = VerticalList::new();

		assert!(list.handle_event(&refs, &key(KeyCode::Down), |_, _| {}));
		assert_eq!(list.selected(), Some(0));
		list.handle_event(&refs, &key(KeyCode::PageDown), |_, _| {});
		assert_eq!(list.selected(), Some(5));
		list.handle_event(&refs, &key(KeyCode::Down), |_, _| {});
		assert_eq!(list.selected(), Some(5));
		list.handle_event(&refs, &key(KeyCode::PageUp), |_, _| {});
		assert_eq!(list.selected(), Some(0));
		list.handle_event(&refs, &key(KeyCode::Up), |_, _| {});
		assert_eq!(list.selected(), Some(0));
	}

	#[test]
	fn up_without_selection_starts_from_last_row() {
		let items = sample();
		let refs: Vec<&Item> = items.iter().collect();
		let mut list = VerticalList::new();
		list.handle_event(&refs, &key(KeyCode::Up), |_, _| {});
		assert_eq!(list.selected(), Some(5));
	}

	#[test]
	fn enter_activates_highlighted_key() {
		let items = sample();
		let refs: Vec<&Item> = items.iter().collect();
		let mut list = VerticalList::new();
		let mut activated = None;

		assert!(!list.handle_event(&refs, &key(KeyCode::Enter), |_, key| {
			activated = Some(key.to_string());
		}));
		assert_eq!(activated, None);

		list.select(Some(2));
		assert!(list.handle_event(&refs, &key(KeyCode::Enter), |_, key| {
			activated = Some(key.to_string());
		}));
		assert_eq!(activated.as_deref(), Some("k2"));
	}

	#[test]
	fn click_maps_rows_to_items_after_draw() {
		let items = sample();
		let refs: Vec<&Item> = items.iter().collect();
		let mut list = VerticalList::new();
		draw(&mut list, &refs, Rect::new(0, 0, 20, 8));

		let mut activated = None;
		assert!(list.handle_event(&refs, &click(5, 3), |event, key| {
			assert!(matches!(event, Event::Mouse(_)));
			activated = Some(key.to_string());
		}));
		assert_eq!(activated.as_deref(), Some("k2"));
		assert_eq!(list.selected(), Some(2));

		assert!(list.handle_event(&refs, &click(0, 0), |_, _| panic!("border is not a row")));
		assert!(!list.handle_event(&refs, &click(40, 40), |_, _| panic!("outside")));
	}

	#[test]
	fn overflowing_rows_draw_a_scrollbar() {
		let items = sample();
		let refs: Vec<&Item> = items.iter().collect();
		let mut list = VerticalList::new();
		let buf = draw(&mut list, &refs, Rect::new(0, 0, 20, 5));

		let rows: Vec<String> = (0..buf.area.height)
			.map(|y| (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect())
			.collect();
		assert!(rows[1].contains("item 0"));
		assert!(rows[3].contains("item 2"));
		assert!(!rows.iter().any(|row| row.contains("item 3")));
		let scrollbar_column: String = (1..4).map(|y| buf[(18, y)].symbol()).collect();
		assert!(!scrollbar_column.trim().is_empty());
	}

	#[test]
	fn highlight_symbol_marks_selected_row() {
		let items = sample();
		let refs: Vec<&Item> = items.iter().collect();
		let mut list = VerticalList::new();
		list.select(Some(1));
		let buf = draw(&mut list, &refs, Rect::new(0, 0, 20, 8));
		assert_eq!(buf[(1, 2)].symbol(), "▶");
		assert_eq!(buf[(1, 1)].symbol(), " ");
	}

	#[test]
	fn matched_positions_fall_back_to_in_order_scan() {
		assert_eq!(greedy_positions("Hello World", "hw"), vec![0, 6]);
		assert!(greedy_positions("Hello", "xyz").is_empty());
		assert!(matched_positions("Hello", "").is_empty());
		let positions = matched_positions("Hello World", "hw");
		assert_eq!(positions.len(), 2);
	}

	#[test]
	fn row_line_splits_matched_runs() {
		let line = row_line("abcd", "bc", Style::new(), Style::new().add_modifier(Modifier::BOLD));
		let texts: Vec<&str> = line.spans.iter().map(|span| span.content.as_ref()).collect();
		assert_eq!(texts.concat(), "abcd");
		assert!(texts.len() >= 2);
	}
}
