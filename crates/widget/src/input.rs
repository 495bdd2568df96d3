//! The text input underlying the autocomplete.
//!
//! [`InputElement`] is the platform widget: a single-line
//! [`tui_textarea::TextArea`] that owns the text and the cursor and exposes
//! the narrow [`Focusable`] capability. Drawing goes through an
//! [`InputRenderer`], which callers may replace to customise how the input
//! looks while keeping the same computed [`InputProps`].

use ratatui::buffer::Buffer;
use ratatui::crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Widget};
use tui_textarea::{CursorMove, Input, Key, TextArea};
use unicode_width::UnicodeWidthStr;

use crate::style::Theme;

/// Imperative focus control over an input element.
pub trait Focusable {
	/// Give the element focus. Returns `true` when the focus state changed.
	fn focus(&mut self) -> bool;
	/// Remove focus from the element. Returns `true` when the focus state changed.
	fn blur(&mut self) -> bool;
	/// Whether the element currently holds focus.
	fn is_focused(&self) -> bool;
}

/// Extra properties forwarded unmodified onto the input element.
#[derive(Debug, Clone, Default)]
pub struct InputAttributes {
	/// Base style of the text, replacing the theme's input style.
	pub style: Option<Style>,
	/// Block drawn around the input.
	pub block: Option<Block<'static>>,
	/// Cursor style while focused, replacing the theme's cursor style.
	pub cursor_style: Option<Style>,
	/// Placeholder style, replacing the theme's placeholder style.
	pub placeholder_style: Option<Style>,
	/// Character used to mask the text, e.g. for secrets.
	pub mask_char: Option<char>,
	/// Maximum number of characters accepted.
	pub max_length: Option<usize>,
}

impl InputAttributes {
	/// Rows needed to draw one line of text inside the optional block.
	#[must_use]
	pub fn height(&self) -> u16 {
		match &self.block {
			Some(block) => {
				let probe = Rect::new(0, 0, 16, 16);
				let inner = block.inner(probe);
				probe.height.saturating_sub(inner.height).saturating_add(1)
			}
			None => 1,
		}
	}
}

/// Single-line text input backed by a [`TextArea`].
#[derive(Debug, Clone)]
pub struct InputElement {
	textarea: TextArea<'static>,
	focused: bool,
	attributes: InputAttributes,
	placeholder: String,
	theme: Theme,
}

impl InputElement {
	/// Create an unfocused input holding `value` with the cursor at its end.
	#[must_use]
	pub fn new(value: &str) -> Self {
		let mut element = Self {
			textarea: TextArea::default(),
			focused: false,
			attributes: InputAttributes::default(),
			placeholder: String::new(),
			theme: Theme::default(),
		};
		element.set_value(value);
		element
	}

	/// Current text.
	#[must_use]
	pub fn value(&self) -> &str {
		self.textarea
			.lines()
			.first()
			.map(String::as_str)
			.unwrap_or("")
	}

	/// Replace the text and move the cursor to its end.
	///
	/// The maximum length only limits editing, so a longer value set here is
	/// kept whole.
	pub fn set_value(&mut self, value: &str) {
		self.textarea = TextArea::new(vec![value.replace(['\r', '\n'], " ")]);
		self.textarea.move_cursor(CursorMove::End);
		self.apply_styles();
	}

	/// Cursor position as a character column.
	#[must_use]
	pub fn cursor(&self) -> usize {
		self.textarea.cursor().1
	}

	/// Display column of the cursor, accounting for wide characters.
	#[must_use]
	pub fn cursor_display_column(&self) -> u16 {
		let prefix: String = self.value().chars().take(self.cursor()).collect();
		u16::try_from(prefix.width()).unwrap_or(u16::MAX)
	}

	/// Forward attributes, placeholder text and theme onto the text area.
	pub fn configure(&mut self, attributes: &InputAttributes, placeholder: &str, theme: &Theme) {
		self.attributes = attributes.clone();
		self.placeholder = placeholder.to_string();
		self.theme = *theme;
		self.apply_styles();
	}

	/// Feed a key press to the text area. Returns `true` when the text changed.
	///
	/// Keys that would split the text onto a new line are ignored, as are the
	/// undo and redo shortcuts.
	pub fn handle_key(&mut self, key: KeyEvent) -> bool {
		let input = Input::from(key);
		if inserts_newline(&input) || is_history_shortcut(&input) {
			return false;
		}
		if let Key::Char(_) = input.key
			&& !input.ctrl
			&& !input.alt
			&& self.at_max_length()
		{
			return false;
		}
		self.textarea.input(input)
	}

	/// Insert pasted text at the cursor. Line breaks become spaces.
	pub fn paste(&mut self, text: &str) -> bool {
		let mut text = text.replace(['\r', '\n'], " ");
		if let Some(max) = self.attributes.max_length {
			let room = max.saturating_sub(self.value().chars().count());
			text = text.chars().take(room).collect();
		}
		if text.is_empty() {
			return false;
		}
		self.textarea.insert_str(text)
	}

	/// Draw the text area itself.
	pub fn render_textarea(&self, area: Rect, buf: &mut Buffer) {
		(&self.textarea).render(area, buf);
	}

	/// Draw the placeholder from the first column, without a cursor cell.
	pub fn render_placeholder(&self, area: Rect, buf: &mut Buffer) {
		let inner = match &self.attributes.block {
			Some(block) => {
				let inner = block.inner(area);
				block.clone().render(area, buf);
				inner
			}
			None => area,
		};
		buf.set_style(inner, self.attributes.style.unwrap_or(self.theme.input));
		let style = self
			.attributes
			.placeholder_style
			.unwrap_or(self.theme.placeholder);
		Line::styled(self.placeholder.as_str(), style).render(inner, buf);
	}

	fn at_max_length(&self) -> bool {
		self.attributes
			.max_length
			.is_some_and(|max| self.value().chars().count() >= max)
	}

	fn apply_styles(&mut self) {
		let attributes = &self.attributes;
		self.textarea
			.set_style(attributes.style.unwrap_or(self.theme.input));
		self.textarea.set_cursor_line_style(Style::default());
		self.textarea
			.set_placeholder_style(attributes.placeholder_style.unwrap_or(self.theme.placeholder));
		self.textarea
			.set_placeholder_text(self.placeholder.clone());
		match attributes.mask_char {
			Some(mask) => self.textarea.set_mask_char(mask),
			None => self.textarea.clear_mask_char(),
		}
		match &attributes.block {
			Some(block) => self.textarea.set_block(block.clone()),
			None => self.textarea.remove_block(),
		}
		let cursor_style = if self.focused {
			attributes.cursor_style.unwrap_or(self.theme.cursor)
		} else {
			attributes.style.unwrap_or(self.theme.input)
		};
		self.textarea.set_cursor_style(cursor_style);
	}
}

impl Default for InputElement {
	fn default() -> Self {
		Self::new("")
	}
}

impl Focusable for InputElement {
	fn focus(&mut self) -> bool {
		if self.focused {
			return false;
		}
		self.focused = true;
		self.apply_styles();
		true
	}

	fn blur(&mut self) -> bool {
		if !self.focused {
			return false;
		}
		self.focused = false;
		self.apply_styles();
		true
	}

	fn is_focused(&self) -> bool {
		self.focused
	}
}

fn inserts_newline(input: &Input) -> bool {
	match input.key {
		Key::Enter => true,
		Key::Char('m') | Key::Char('j') => input.ctrl,
		_ => false,
	}
}

// tui-textarea binds undo to Ctrl+U and redo to Ctrl+R.
fn is_history_shortcut(input: &Input) -> bool {
	input.ctrl && !input.alt && matches!(input.key, Key::Char('u') | Key::Char('r'))
}

/// Properties computed by the autocomplete for every render of its input.
#[derive(Debug, Clone, Copy)]
pub struct InputProps<'a> {
	/// Current text value.
	pub value: &'a str,
	/// Placeholder shown while the value is empty.
	pub placeholder: &'a str,
	/// Whether the input has focus.
	pub focused: bool,
	/// Cursor position as a character column.
	pub cursor: usize,
	/// Additional attributes forwarded by the caller.
	pub attributes: &'a InputAttributes,
	/// The underlying element, for renderers that want to draw it directly.
	pub element: &'a InputElement,
}

/// Strategy used to draw the input.
pub trait InputRenderer {
	/// Draw the input into `area`.
	fn render(&self, props: &InputProps<'_>, area: Rect, buf: &mut Buffer);

	/// Rows the input occupies.
	fn height(&self, props: &InputProps<'_>) -> u16 {
		props.attributes.height()
	}
}

impl<F> InputRenderer for F
where
	F: Fn(&InputProps<'_>, Rect, &mut Buffer),
{
	fn render(&self, props: &InputProps<'_>, area: Rect, buf: &mut Buffer) {
		self(props, area, buf);
	}
}

/// Built-in renderer that draws the text area with its forwarded attributes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextInputRenderer;

impl InputRenderer for TextInputRenderer {
	fn render(&self, props: &InputProps<'_>, area: Rect, buf: &mut Buffer) {
		if !props.focused && props.value.is_empty() {
			props.element.render_placeholder(area, buf);
		} else {
			props.element.render_textarea(area, buf);
		}
	}
}

#[cfg(test)]
mod tests {
	use ratatui::crossterm::event::{KeyCode, KeyModifiers};
	use ratatui::widgets::Borders;

	use super::*;

	fn press(code: KeyCode) -> KeyEvent {
		KeyEvent::new(code, KeyModifiers::NONE)
	}

	fn type_text(element: &mut InputElement, text: &str) {
		for ch in text.chars() {
			element.handle_key(press(KeyCode::Char(ch)));
		}
	}

	#[test]
	fn typing_updates_value_and_cursor() {
		let mut element = InputElement::new("ab");
		assert_eq!(element.cursor(), 2);
		assert!(element.handle_key(press(KeyCode::Char('c'))));
		assert_eq!(element.value(), "abc");
		assert!(element.handle_key(press(KeyCode::Backspace)));
		assert_eq!(element.value(), "ab");
		assert!(!element.handle_key(press(KeyCode::Left)));
		assert_eq!(element.cursor(), 1);
	}

	#[test]
	fn enter_never_splits_the_line() {
		let mut element = InputElement::new("one");
		assert!(!element.handle_key(press(KeyCode::Enter)));
		assert!(!element.handle_key(KeyEvent::new(KeyCode::Char('m'), KeyModifiers::CONTROL)));
		assert_eq!(element.value(), "one");
	}

	#[test]
	fn paste_flattens_newlines() {
		let mut element = InputElement::default();
		assert!(element.paste("a\nb"));
		assert_eq!(element.value(), "a b");
		assert!(!element.paste(""));
	}

	#[test]
	fn max_length_limits_typing_and_paste() {
		let mut element = InputElement::default();
		let attributes = InputAttributes {
			max_length: Some(3),
			..InputAttributes::default()
		};
		element.configure(&attributes, "", &Theme::default());
		type_text(&mut element, "abcd");
		assert_eq!(element.value(), "abc");
		assert!(!element.paste("zz"));
		element.set_value("123456");
		assert_eq!(element.value(), "123456");
		assert!(!element.handle_key(press(KeyCode::Char('7'))));
		assert!(element.handle_key(press(KeyCode::Backspace)));
		assert_eq!(element.value(), "12345");
	}

	#[test]
	fn undo_and_redo_shortcuts_are_ignored() {
		let mut element = InputElement::default();
		type_text(&mut element, "ab");
		let ctrl = |ch| KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL);
		assert!(!element.handle_key(ctrl('u')));
		assert_eq!(element.value(), "ab");
		assert!(element.handle_key(press(KeyCode::Backspace)));
		assert!(!element.handle_key(ctrl('u')));
		assert!(!element.handle_key(ctrl('r')));
		assert_eq!(element.value(), "a");
	}

	#[test]
	fn blurred_placeholder_starts_at_first_column() {
		let mut element = InputElement::default();
		let attributes = InputAttributes::default();
		element.configure(&attributes, "Search", &Theme::default());
		let props = InputProps {
			value: element.value(),
			placeholder: "Search",
			focused: false,
			cursor: 0,
			attributes: &attributes,
			element: &element,
		};
		let mut buf = Buffer::empty(Rect::new(0, 0, 10, 1));
		let area = buf.area;
		TextInputRenderer.render(&props, area, &mut buf);

		let row: String = (0..10).map(|x| buf[(x, 0)].symbol()).collect();
		assert_eq!(row, "Search    ");
		assert_eq!(buf[(0, 0)].style().fg, Theme::default().placeholder.fg);
	}

	#[test]
	fn focus_and_blur_report_transitions() {
		let mut element = InputElement::default();
		assert!(element.focus());
		assert!(!element.focus());
		assert!(element.is_focused());
		assert!(element.blur());
		assert!(!element.blur());
		assert!(!element.is_focused());
	}

	#[test]
	fn bordered_block_adds_two_rows() {
		let attributes = InputAttributes {
			block: Some(Block::default().borders(Borders::ALL)),
			..InputAttributes::default()
		};
		assert_eq!(attributes.height(), 3);
		assert_eq!(InputAttributes::default().height(), 1);
	}

	#[test]
	fn cursor_column_counts_wide_characters() {
		let element = InputElement::new("日本");
		assert_eq!(element.cursor(), 2);
		assert_eq!(element.cursor_display_column(), 4);
	}
}
