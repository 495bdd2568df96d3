//! The autocomplete control.
//!
//! An [`Autocomplete`] owns a single-line input and a suggestion panel. The
//! panel lists the caller's items that match the current value and is shown
//! only while the input is focused and at least one item matches. Opening and
//! closing the panel springs its height and opacity toward their targets; the
//! host advances the animation with [`Autocomplete::tick`].

mod props;
mod render;

use std::time::Duration;

use log::debug;
use ratatui::crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::layout::Rect;

pub use props::{
	AutocompleteProps, ChangeHandler, DEFAULT_MAX_SUGGESTIONS_HEIGHT, Origin, SelectHandler,
};
pub use render::{AutocompleteLayout, layout};

use crate::components::VerticalList;
use crate::filter::Filter;
use crate::input::{Focusable, InputElement};
use crate::item::Item;
use crate::motion::{Motion, Target};
use crate::style::Theme;

/// Motion property holding the panel height in rows.
pub const PANEL_HEIGHT: &str = "max_height";
/// Motion property holding the panel opacity in `[0, 1]`.
pub const PANEL_OPACITY: &str = "opacity";

/// Local state of the control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentState {
	/// Text currently in the input.
	pub value: String,
	/// Whether the input holds focus.
	pub is_focused: bool,
}

/// What the control did with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
	/// The event was not meant for the control.
	Ignored,
	/// The event was consumed without changing the value.
	Handled,
	/// The input value changed; `on_change` has been called.
	Changed,
	/// A suggestion was activated; `on_select` has been called.
	Selected(String),
}

/// Text input with a filtered, animated suggestion panel.
pub struct Autocomplete {
	props: AutocompleteProps,
	state: ComponentState,
	input: InputElement,
	list: VerticalList,
	motion: Motion,
	input_area: Option<Rect>,
}

impl Autocomplete {
	/// Mount the control. The value starts as `props.default_value` and the
	/// panel starts collapsed.
	#[must_use]
	pub fn new(props: AutocompleteProps) -> Self {
		let mut input = InputElement::new(&props.default_value);
		input.configure(&props.input_attributes, &props.placeholder, &props.theme);

		let mut motion = Motion::new([(PANEL_HEIGHT, 0.0), (PANEL_OPACITY, 0.0)]);
		motion.set_enabled(props.animate);

		let state = ComponentState {
			value: input.value().to_string(),
			is_focused: false,
		};

		Self {
			props,
			state,
			input,
			list: VerticalList::new(),
			motion,
			input_area: None,
		}
	}

	/// Current local state.
	#[must_use]
	pub fn state(&self) -> &ComponentState {
		&self.state
	}

	/// Text currently in the input.
	#[must_use]
	pub fn value(&self) -> &str {
		&self.state.value
	}

	/// Whether the input holds focus.
	#[must_use]
	pub fn is_focused(&self) -> bool {
		self.state.is_focused
	}

	/// Current configuration.
	#[must_use]
	pub fn props(&self) -> &AutocompleteProps {
		&self.props
	}

	/// The underlying input element.
	#[must_use]
	pub fn input(&self) -> &InputElement {
		&self.input
	}

	/// The panel animation.
	#[must_use]
	pub fn motion(&self) -> &Motion {
		&self.motion
	}

	/// Index of the highlighted suggestion within [`Self::filtered_items`].
	#[must_use]
	pub fn highlighted(&self) -> Option<usize> {
		self.list.selected()
	}

	/// Replace the whole configuration.
	///
	/// The value is reset when the new default differs from the previous
	/// one; an unchanged default leaves the typed text alone.
	pub fn set_props(&mut self, props: AutocompleteProps) {
		let previous_default = std::mem::take(&mut self.props.default_value);
		let reset = previous_default != props.default_value;
		self.props = props;
		self.input.configure(
			&self.props.input_attributes,
			&self.props.placeholder,
			&self.props.theme,
		);
		self.motion.set_enabled(self.props.animate);
		if reset {
			let value = self.props.default_value.clone();
			self.reset_value(&value);
		}
		self.sync_motion();
	}

	/// Update the default value, resetting the input when it changed.
	pub fn set_default_value(&mut self, default_value: impl Into<String>) {
		let default_value = default_value.into();
		if default_value == self.props.default_value {
			return;
		}
		self.props.default_value = default_value.clone();
		self.reset_value(&default_value);
		self.sync_motion();
	}

	/// Replace the candidate items.
	pub fn set_items<I, T>(&mut self, items: I)
	where
		I: IntoIterator<Item = T>,
		T: Into<Item>,
	{
		self.props.items = items.into_iter().map(Into::into).collect();
		self.list.reset();
		self.sync_motion();
	}

	/// Replace the matching predicate.
	pub fn set_filter(&mut self, filter: Filter) {
		self.props.filter = filter;
		self.list.reset();
		self.sync_motion();
	}

	/// Choose where the panel opens.
	pub fn set_origin(&mut self, origin: Origin) {
		self.props.origin = origin;
	}

	/// Change the expanded panel height.
	pub fn set_max_suggestions_height(&mut self, rows: u16) {
		self.props.max_suggestions_height = rows;
		self.sync_motion();
	}

	/// Change the colours.
	pub fn set_theme(&mut self, theme: Theme) {
		self.props.theme = theme;
		self.input.configure(
			&self.props.input_attributes,
			&self.props.placeholder,
			&self.props.theme,
		);
	}

	/// Items matching the current value, in their original order.
	#[must_use]
	pub fn filtered_items(&self) -> Vec<&Item> {
		self.props.filter.apply(&self.props.items, &self.state.value)
	}

	/// Whether the panel should be open: focused with at least one match.
	#[must_use]
	pub fn is_panel_visible(&self) -> bool {
		self.state.is_focused && !self.filtered_items().is_empty()
	}

	/// Focus the input. Emits the focus transition if it was not focused.
	pub fn focus(&mut self) {
		if self.input.focus() {
			self.handle_focus();
		}
	}

	/// Blur the input. Emits the blur transition if it was focused.
	pub fn blur(&mut self) {
		if self.input.blur() {
			self.handle_blur();
		}
	}

	/// React to the input gaining focus.
	pub fn handle_focus(&mut self) {
		self.input.focus();
		if !self.state.is_focused {
			debug!("autocomplete focused");
		}
		self.state.is_focused = true;
		self.sync_motion();
	}

	/// React to the input losing focus.
	pub fn handle_blur(&mut self) {
		self.input.blur();
		if self.state.is_focused {
			debug!("autocomplete blurred");
		}
		self.state.is_focused = false;
		self.sync_motion();
	}

	/// Activate the suggestion with `key`: report it through `on_select`,
	/// then blur the input. The value is left untouched.
	pub fn select(&mut self, event: &Event, key: &str) {
		debug!("suggestion selected: {key}");
		(self.props.on_select)(event, key);
		self.blur();
	}

	/// Route a terminal event to the control.
	pub fn handle_event(&mut self, event: &Event) -> EventOutcome {
		match event {
			Event::FocusLost if self.state.is_focused => {
				self.handle_blur();
				EventOutcome::Handled
			}
			Event::Mouse(mouse) => match mouse.kind {
				MouseEventKind::Down(MouseButton::Left) => {
					if self.input_contains(mouse.column, mouse.row) {
						if !self.state.is_focused {
							self.handle_focus();
						}
						return EventOutcome::Handled;
					}
					if self.is_panel_visible() && self.list.contains(mouse.column, mouse.row) {
						return self.route_to_list(event);
					}
					if self.state.is_focused {
						self.handle_blur();
					}
					EventOutcome::Ignored
				}
				_ if self.is_panel_visible() => self.route_to_list(event),
				_ => EventOutcome::Ignored,
			},
			_ if !self.state.is_focused => EventOutcome::Ignored,
			Event::Key(key) if key.kind == KeyEventKind::Release => EventOutcome::Ignored,
			Event::Key(key) => match key.code {
				KeyCode::Esc => {
					self.blur();
					EventOutcome::Handled
				}
				KeyCode::Tab | KeyCode::BackTab => EventOutcome::Ignored,
				KeyCode::Up | KeyCode::Down | KeyCode::PageUp | KeyCode::PageDown | KeyCode::Enter => {
					if self.is_panel_visible() {
						self.route_to_list(event)
					} else {
						EventOutcome::Ignored
					}
				}
				_ => {
					if self.input.handle_key(*key) {
						self.handle_input_change(event);
						EventOutcome::Changed
					} else {
						EventOutcome::Handled
					}
				}
			},
			Event::Paste(text) => {
				if self.input.paste(text) {
					self.handle_input_change(event);
					EventOutcome::Changed
				} else {
					EventOutcome::Handled
				}
			}
			_ => EventOutcome::Ignored,
		}
	}

	/// Advance the panel animation. Returns `true` while it is still moving.
	pub fn tick(&mut self, elapsed: Duration) -> bool {
		self.sync_motion();
		self.motion.tick(elapsed)
	}

	/// Whether the panel animation has settled.
	#[must_use]
	pub fn is_animating(&self) -> bool {
		!self.motion.is_at_rest()
	}

	fn route_to_list(&mut self, event: &Event) -> EventOutcome {
		let items = self.props.filter.apply(&self.props.items, &self.state.value);
		let mut activated = None;
		let consumed = self.list.handle_event(&items, event, |_, key| {
			activated = Some(key.to_string());
		});
		match activated {
			Some(key) => {
				self.select(event, &key);
				EventOutcome::Selected(key)
			}
			None if consumed => EventOutcome::Handled,
			None => EventOutcome::Ignored,
		}
	}

	fn handle_input_change(&mut self, event: &Event) {
		self.state.value = self.input.value().to_string();
		self.list.reset();
		(self.props.on_change)(event, &self.state.value);
		self.sync_motion();
	}

	fn reset_value(&mut self, value: &str) {
		debug!("default value changed; resetting input");
		self.input.set_value(value);
		self.state.value = self.input.value().to_string();
		self.list.reset();
	}

	fn input_contains(&self, column: u16, row: u16) -> bool {
		self.input_area
			.is_some_and(|area| crate::components::point_in_rect(column, row, area))
	}

	fn sync_motion(&mut self) {
		let spring = self.props.spring;
		let (height, opacity) = if self.is_panel_visible() {
			(f64::from(self.props.max_suggestions_height), 1.0)
		} else {
			(0.0, 0.0)
		};
		self.motion.set_style([
			(PANEL_HEIGHT, Target::spring(height, spring)),
			(PANEL_OPACITY, Target::spring(opacity, spring)),
		]);
	}
}

impl std::fmt::Debug for Autocomplete {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Autocomplete")
			.field("props", &self.props)
			.field("state", &self.state)
			.field("motion", &self.motion)
			.finish_non_exhaustive()
	}
}
