use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use super::{Autocomplete, Origin, PANEL_HEIGHT, PANEL_OPACITY};
use crate::components::list::ListView;
use crate::input::{Focusable, InputProps, InputRenderer, TextInputRenderer};

/// Rows taken by the panel border.
const PANEL_CHROME_ROWS: u16 = 2;

/// Where the input and the panel are drawn within the control's area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutocompleteLayout {
	/// Area of the input.
	pub input: Rect,
	/// Area of the suggestion panel; empty when collapsed.
	pub panel: Rect,
}

/// Split `area` between the input and a panel of at most `panel_height`
/// rows.
///
/// With [`Origin::Bottom`] the input sits on the first rows of `area` and
/// the panel opens downward; with [`Origin::Top`] the input sits on the last
/// rows and the panel opens upward.
#[must_use]
pub fn layout(area: Rect, input_height: u16, panel_height: u16, origin: Origin) -> AutocompleteLayout {
	let input_height = input_height.min(area.height);
	let room = area.height - input_height;
	let panel_height = panel_height.min(room);

	match origin {
		Origin::Bottom => {
			let input = Rect {
				height: input_height,
				..area
			};
			let panel = Rect {
				y: area.y + input_height,
				height: panel_height,
				..area
			};
			AutocompleteLayout { input, panel }
		}
		Origin::Top => {
			let input = Rect {
				y: area.y + room,
				height: input_height,
				..area
			};
			let panel = Rect {
				y: input.y - panel_height,
				height: panel_height,
				..area
			};
			AutocompleteLayout { input, panel }
		}
	}
}

impl Autocomplete {
	/// Draw the control into a frame.
	pub fn draw(&mut self, frame: &mut Frame, area: Rect) {
		self.render(area, frame.buffer_mut());
	}

	/// Draw the control into a buffer.
	pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
		self.sync_motion();

		let items = self.props.filter.apply(&self.props.items, &self.state.value);
		let renderer: &dyn InputRenderer = match &self.props.input_element {
			Some(custom) => &**custom,
			None => &TextInputRenderer,
		};
		let input_props = InputProps {
			value: &self.state.value,
			placeholder: &self.props.placeholder,
			focused: self.input.is_focused(),
			cursor: self.input.cursor(),
			attributes: &self.props.input_attributes,
			element: &self.input,
		};

		let animated_height = self.motion.value(PANEL_HEIGHT).unwrap_or(0.0).max(0.0).round();
		let opacity = self.motion.value(PANEL_OPACITY).unwrap_or(0.0).clamp(0.0, 1.0);
		let content_rows = u16::try_from(items.len())
			.unwrap_or(u16::MAX)
			.saturating_add(PANEL_CHROME_ROWS);
		// Float to int casts saturate, so oversized heights clamp to u16::MAX.
		let panel_height = (animated_height as u16).min(content_rows);

		let areas = layout(area, renderer.height(&input_props), panel_height, self.props.origin);
		renderer.render(&input_props, areas.input, buf);
		self.input_area = Some(areas.input);

		if areas.panel.is_empty() || opacity <= 0.0 {
			self.list.clear_layout();
			return;
		}

		self.list.render(
			areas.panel,
			buf,
			ListView {
				items: &items,
				query: &self.state.value,
				theme: &self.props.theme,
				opacity,
			},
		);
	}
}
