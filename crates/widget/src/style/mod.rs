//! Visual styling.
//!
//! Themes play the role of class-name bindings: every visual part of the
//! autocomplete (input, placeholder, panel, rows, matched characters) is
//! styled from a [`Theme`].

pub mod theme;

pub use theme::{Theme, ThemeDescriptor, builtin_themes, by_name, default_theme, names};
