use std::fmt;
use std::str::FromStr;

use ratatui::crossterm::event::Event;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::filter::Filter;
use crate::input::{InputAttributes, InputRenderer};
use crate::item::Item;
use crate::motion::SpringConfig;
use crate::style::Theme;

/// Default target height of the expanded panel, in rows.
pub const DEFAULT_MAX_SUGGESTIONS_HEIGHT: u16 = 320;

/// Callback receiving the triggering event and the new input value.
pub type ChangeHandler = Box<dyn FnMut(&Event, &str)>;

/// Callback receiving the triggering event and the selected item key.
pub type SelectHandler = Box<dyn FnMut(&Event, &str)>;

/// Side of the input the suggestion panel expands toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
	/// Panel opens above the input.
	Top,
	/// Panel opens below the input.
	#[default]
	Bottom,
}

impl Origin {
	/// Lowercase name used in configuration.
	#[must_use]
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Top => "top",
			Self::Bottom => "bottom",
		}
	}
}

impl FromStr for Origin {
	type Err = ConfigError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value.trim().to_ascii_lowercase().as_str() {
			"top" => Ok(Self::Top),
			"bottom" => Ok(Self::Bottom),
			_ => Err(ConfigError::UnknownOrigin {
				value: value.to_string(),
			}),
		}
	}
}

impl fmt::Display for Origin {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Caller-facing configuration of an [`Autocomplete`](super::Autocomplete).
///
/// Every field has a default, so callers only set what they need:
///
/// ```
/// use autosuggest_widget::{AutocompleteProps, Item, Origin};
///
/// let props = AutocompleteProps::default()
/// 	.items(vec![Item::new("rs", "Rust"), Item::new("go", "Go")])
/// 	.placeholder("Language")
/// 	.origin(Origin::Top);
/// assert_eq!(props.items.len(), 2);
/// ```
pub struct AutocompleteProps {
	/// Initial value of the input. Changing it later resets the value.
	pub default_value: String,
	/// Full candidate set.
	pub items: Vec<Item>,
	/// Predicate deciding which items are suggested for the current value.
	pub filter: Filter,
	/// Called after every edit with the new value.
	pub on_change: ChangeHandler,
	/// Called with the item key when a suggestion is activated.
	pub on_select: SelectHandler,
	/// Custom input renderer; the built-in text input is used when absent.
	pub input_element: Option<Box<dyn InputRenderer>>,
	/// Text shown while the input is empty.
	pub placeholder: String,
	/// Side of the input the panel expands toward.
	pub origin: Origin,
	/// Target panel height, in rows, while suggestions are shown.
	pub max_suggestions_height: u16,
	/// Extra properties forwarded onto the input element.
	pub input_attributes: InputAttributes,
	/// Colours.
	pub theme: Theme,
	/// Spring driving the panel height and opacity.
	pub spring: SpringConfig,
	/// When `false` the panel snaps open and closed.
	pub animate: bool,
}

impl Default for AutocompleteProps {
	fn default() -> Self {
		Self {
			default_value: String::new(),
			items: Vec::new(),
			filter: Filter::default(),
			on_change: Box::new(|_, _| {}),
			on_select: Box::new(|_, _| {}),
			input_element: None,
			placeholder: String::new(),
			origin: Origin::default(),
			max_suggestions_height: DEFAULT_MAX_SUGGESTIONS_HEIGHT,
			input_attributes: InputAttributes::default(),
			theme: Theme::default(),
			spring: SpringConfig::STIFF,
			animate: true,
		}
	}
}

impl AutocompleteProps {
	/// Set the initial value.
	#[must_use]
	pub fn default_value(mut self, value: impl Into<String>) -> Self {
		self.default_value = value.into();
		self
	}

	/// Set the candidate items.
	#[must_use]
	pub fn items<I, T>(mut self, items: I) -> Self
	where
		I: IntoIterator<Item = T>,
		T: Into<Item>,
	{
		self.items = items.into_iter().map(Into::into).collect();
		self
	}

	/// Replace the matching predicate.
	#[must_use]
	pub fn filter(mut self, filter: Filter) -> Self {
		self.filter = filter;
		self
	}

	/// Register the change callback.
	#[must_use]
	pub fn on_change<F>(mut self, handler: F) -> Self
	where
		F: FnMut(&Event, &str) + 'static,
	{
		self.on_change = Box::new(handler);
		self
	}

	/// Register the selection callback.
	#[must_use]
	pub fn on_select<F>(mut self, handler: F) -> Self
	where
		F: FnMut(&Event, &str) + 'static,
	{
		self.on_select = Box::new(handler);
		self
	}

	/// Draw the input with a custom renderer.
	#[must_use]
	pub fn input_element<R>(mut self, renderer: R) -> Self
	where
		R: InputRenderer + 'static,
	{
		self.input_element = Some(Box::new(renderer));
		self
	}

	/// Set the placeholder text.
	#[must_use]
	pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
		self.placeholder = placeholder.into();
		self
	}

	/// Choose where the panel opens.
	#[must_use]
	pub fn origin(mut self, origin: Origin) -> Self {
		self.origin = origin;
		self
	}

	/// Set the expanded panel height.
	#[must_use]
	pub fn max_suggestions_height(mut self, rows: u16) -> Self {
		self.max_suggestions_height = rows;
		self
	}

	/// Forward extra attributes onto the input element.
	#[must_use]
	pub fn input_attributes(mut self, attributes: InputAttributes) -> Self {
		self.input_attributes = attributes;
		self
	}

	/// Set the colours.
	#[must_use]
	pub fn theme(mut self, theme: Theme) -> Self {
		self.theme = theme;
		self
	}

	/// Set the spring used for the panel.
	#[must_use]
	pub fn spring(mut self, spring: SpringConfig) -> Self {
		self.spring = spring;
		self
	}

	/// Enable or disable the panel animation.
	#[must_use]
	pub fn animate(mut self, animate: bool) -> Self {
		self.animate = animate;
		self
	}
}

impl fmt::Debug for AutocompleteProps {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AutocompleteProps")
			.field("default_value", &self.default_value)
			.field("items", &self.items)
			.field("placeholder", &self.placeholder)
			.field("origin", &self.origin)
			.field("max_suggestions_height", &self.max_suggestions_height)
			.field("custom_input", &self.input_element.is_some())
			.field("spring", &self.spring)
			.field("animate", &self.animate)
			.finish_non_exhaustive()
	}
}
