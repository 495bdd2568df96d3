//! Terminal autocomplete widget.
//!
//! [`Autocomplete`] is a single-line text input paired with a suggestion
//! panel. The panel lists the caller's [`Item`]s whose value matches the typed
//! text, opens only while the input is focused and something matches, and
//! springs open and closed through a [`Motion`]. Activating a suggestion
//! reports its key through `on_select` and blurs the input.
//!
//! ```no_run
//! use autosuggest_widget::{Autocomplete, AutocompleteProps, Item};
//!
//! let mut autocomplete = Autocomplete::new(
//! 	AutocompleteProps::default()
//! 		.items(vec![Item::new("rs", "Rust"), Item::new("go", "Go")])
//! 		.on_select(|_, key| println!("picked {key}")),
//! );
//! autocomplete.focus();
//! ```

pub mod autocomplete;
pub mod components;
mod config;
mod error;
mod filter;
pub mod input;
mod item;
pub mod motion;
pub mod style;

pub use autocomplete::{
	Autocomplete, AutocompleteLayout, AutocompleteProps, ComponentState, DEFAULT_MAX_SUGGESTIONS_HEIGHT,
	EventOutcome, Origin, layout,
};
pub use components::VerticalList;
pub use config::AutocompleteConfig;
pub use error::ConfigError;
pub use filter::{Filter, fuzzy_match, is_subsequence};
pub use input::{Focusable, InputAttributes, InputElement, InputProps, InputRenderer, TextInputRenderer};
pub use item::Item;
pub use motion::{Motion, SpringConfig, SpringPreset, Target};
pub use style::Theme;
