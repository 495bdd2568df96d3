mod loader;
mod registry;
mod types;

use std::sync::OnceLock;

use include_dir::{Dir, include_dir};

pub use registry::{by_name, descriptors, names};
pub use types::{Theme, ThemeDescriptor, ThemeRegistration};

use loader::{BuiltinThemes, load_builtin_themes};

const BUILTIN_THEME_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/style/theme/themes");

/// Get the default built-in theme.
#[must_use]
pub fn default_theme() -> Theme {
	builtins().default_theme
}

/// Return the built-in themes bundled with the widget.
#[must_use]
pub fn builtin_themes() -> Vec<ThemeRegistration> {
	builtins().registrations.clone()
}

fn builtins() -> &'static BuiltinThemes {
	static BUILTINS: OnceLock<BuiltinThemes> = OnceLock::new();
	BUILTINS.get_or_init(|| {
		load_builtin_themes(&BUILTIN_THEME_DIR)
			.unwrap_or_else(|error| panic!("failed to load built-in themes: {error:#}"))
	})
}

impl Default for Theme {
	fn default() -> Self {
		default_theme()
	}
}
