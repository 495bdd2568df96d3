//! Rendering collaborators used by the autocomplete.

/// Vertical list of suggestions with activation callbacks.
pub mod list;
/// Scrollbar for the suggestion viewport.
pub mod scrollbar;

pub use list::{HIGHLIGHT_SYMBOL, VerticalList, matched_positions};
pub use scrollbar::{ScrollMetrics, point_in_rect, render_scrollbar};
