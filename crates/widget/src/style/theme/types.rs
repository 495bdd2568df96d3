use ratatui::style::{Color, Modifier, Style};

/// Styles for every visual part of the autocomplete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
	/// Text typed into the input.
	pub input: Style,
	/// Placeholder shown while the input is empty.
	pub placeholder: Style,
	/// Cursor cell while the input is focused.
	pub cursor: Style,
	/// Border of the suggestion panel.
	pub panel: Style,
	/// Unselected suggestion rows.
	pub suggestion: Style,
	/// The highlighted suggestion row.
	pub selected: Style,
	/// Characters matched by the query.
	pub matched: Style,
}

impl Theme {
	/// Scrollbar style derived from the panel border.
	#[must_use]
	pub fn scrollbar_style(&self) -> Style {
		Style::new().fg(self.panel.fg.unwrap_or(Color::Reset))
	}

	/// Fade a style for a partially transparent panel.
	///
	/// Terminals cannot blend colours, so anything below full opacity is drawn
	/// dimmed.
	#[must_use]
	pub fn faded(style: Style, opacity: f64) -> Style {
		if opacity < 1.0 {
			style.add_modifier(Modifier::DIM)
		} else {
			style
		}
	}
}

/// Describes a theme instance that can be looked up by name.
#[derive(Debug, Clone)]
pub struct ThemeRegistration {
	/// The name of the theme.
	pub name: String,
	/// The theme configuration.
	pub theme: Theme,
	/// Alternate names for the theme.
	pub aliases: Vec<String>,
}

impl ThemeRegistration {
	/// Creates a new theme registration with the given name and theme.
	pub fn new(name: impl Into<String>, theme: Theme) -> Self {
		Self {
			name: name.into(),
			theme,
			aliases: Vec::new(),
		}
	}

	/// Adds a single alias to this theme registration.
	pub fn alias(mut self, alias: impl Into<String>) -> Self {
		self.aliases.push(alias.into());
		self
	}
}

/// Snapshot of a registered theme and its metadata.
#[derive(Debug, Clone)]
pub struct ThemeDescriptor {
	/// The name of the theme.
	pub name: String,
	/// Alternate names for the theme.
	pub aliases: Vec<String>,
	/// The theme configuration.
	pub theme: Theme,
}
