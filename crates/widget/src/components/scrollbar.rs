//! Shared scrollbar rendering component.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget};

/// Precomputed scrolling metrics for a scrollable viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollMetrics {
	/// Total number of items in the content.
	pub content_length: usize,
	/// Number of items visible in the viewport.
	pub viewport_len: usize,
	/// Maximum scroll/offset position.
	pub max_scroll: usize,
	/// Whether content overflows and needs a scrollbar.
	pub needs_scrollbar: bool,
}

impl ScrollMetrics {
	/// Compute scroll metrics from content length and viewport height.
	///
	/// Returns default (empty) metrics if either value is zero.
	#[must_use]
	pub fn compute(content_length: usize, viewport_height: usize) -> Self {
		if content_length == 0 || viewport_height == 0 {
			return Self::default();
		}

		let viewport_len = viewport_height.min(content_length).max(1);
		let max_scroll = content_length.saturating_sub(viewport_len);

		Self {
			content_length,
			viewport_len,
			max_scroll,
			needs_scrollbar: content_length > viewport_len,
		}
	}

	/// Convert scroll position to scrollbar position for rendering.
	#[must_use]
	pub fn scrollbar_position(&self, scroll: usize) -> usize {
		if self.max_scroll == 0 || self.content_length == 0 {
			0
		} else {
			scroll.min(self.max_scroll).saturating_mul(self.content_length.saturating_sub(1)) / self.max_scroll
		}
	}
}

/// Check if a point (column, row) is inside a rectangle.
#[must_use]
pub fn point_in_rect(column: u16, row: u16, area: Rect) -> bool {
	if area.width == 0 || area.height == 0 {
		return false;
	}
	let inside_x = column >= area.x && column < area.x.saturating_add(area.width);
	let inside_y = row >= area.y && row < area.y.saturating_add(area.height);
	inside_x && inside_y
}

/// Render a vertical scrollbar on the right edge of `area`.
///
/// Returns the area left for content (one column narrower).
pub fn render_scrollbar(
	buf: &mut Buffer,
	area: Rect,
	scrollbar_state: &mut ScrollbarState,
	style: Style,
) -> Rect {
	if area.width == 0 {
		return area;
	}

	let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
		.begin_symbol(None)
		.end_symbol(None)
		.track_symbol(Some("│"))
		.style(style);

	let sb_area = Rect {
		x: area.x + area.width.saturating_sub(1),
		y: area.y,
		width: 1,
		height: area.height,
	};
	scrollbar.render(sb_area, buf, scrollbar_state);

	Rect {
		width: area.width.saturating_sub(1),
		..area
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn metrics_for_overflowing_content() {
		let metrics = ScrollMetrics::compute(10, 4);
		assert_eq!(metrics.viewport_len, 4);
		assert_eq!(metrics.max_scroll, 6);
		assert!(metrics.needs_scrollbar);
		assert_eq!(metrics.scrollbar_position(0), 0);
		assert_eq!(metrics.scrollbar_position(6), 9);
	}

	#[test]
	fn metrics_for_fitting_content() {
		let metrics = ScrollMetrics::compute(3, 8);
		assert!(!metrics.needs_scrollbar);
		assert_eq!(metrics.scrollbar_position(2), 0);
		assert_eq!(ScrollMetrics::compute(0, 8), ScrollMetrics::default());
	}

	#[test]
	fn point_in_rect_excludes_far_edges() {
		let area = Rect::new(2, 3, 4, 2);
		assert!(point_in_rect(2, 3, area));
		assert!(point_in_rect(5, 4, area));
		assert!(!point_in_rect(6, 4, area));
		assert!(!point_in_rect(5, 5, area));
		assert!(!point_in_rect(0, 0, Rect::default()));
	}
}
