//! Serde-backed widget options.
//!
//! [`AutocompleteConfig`] is the file/env friendly subset of
//! [`AutocompleteProps`]: everything except callbacks, items and custom
//! renderers. Named values (origin, theme, spring preset, filter) are kept
//! as strings and resolved by [`AutocompleteConfig::apply`], so every source
//! reports unknown names the same way.

use serde::{Deserialize, Serialize};

use crate::autocomplete::{AutocompleteProps, Origin};
use crate::error::ConfigError;
use crate::filter::Filter;
use crate::motion::SpringConfig;
use crate::style;

/// Optional overrides for an [`AutocompleteProps`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocompleteConfig {
	pub placeholder: Option<String>,
	pub default_value: Option<String>,
	/// `top` or `bottom`.
	pub origin: Option<String>,
	pub max_suggestions_height: Option<u16>,
	/// Built-in theme name or alias.
	pub theme: Option<String>,
	/// `no-wobble`, `gentle`, `wobbly` or `stiff`.
	pub spring: Option<String>,
	pub animate: Option<bool>,
	/// `fuzzy`, `substring` or `prefix`.
	pub filter: Option<String>,
	pub max_length: Option<usize>,
}

impl AutocompleteConfig {
	/// Resolve the configured origin, if any.
	pub fn origin(&self) -> Result<Option<Origin>, ConfigError> {
		self.origin.as_deref().map(str::parse).transpose()
	}

	/// Resolve the configured theme, if any.
	pub fn theme(&self) -> Result<Option<style::Theme>, ConfigError> {
		self.theme
			.as_deref()
			.map(|name| {
				style::by_name(name).ok_or_else(|| ConfigError::UnknownTheme {
					name: name.to_string(),
				})
			})
			.transpose()
	}

	/// Resolve the configured spring, if any.
	pub fn spring(&self) -> Result<Option<SpringConfig>, ConfigError> {
		self.spring.as_deref().map(SpringConfig::preset).transpose()
	}

	/// Apply every set option onto `props`.
	pub fn apply(&self, mut props: AutocompleteProps) -> Result<AutocompleteProps, ConfigError> {
		if let Some(placeholder) = &self.placeholder {
			props.placeholder = placeholder.clone();
		}
		if let Some(default_value) = &self.default_value {
			props.default_value = default_value.clone();
		}
		if let Some(origin) = self.origin()? {
			props.origin = origin;
		}
		if let Some(rows) = self.max_suggestions_height {
			if rows == 0 {
				return Err(ConfigError::ZeroHeight);
			}
			props.max_suggestions_height = rows;
		}
		if let Some(theme) = self.theme()? {
			props.theme = theme;
		}
		if let Some(spring) = self.spring()? {
			props.spring = spring;
		}
		if let Some(animate) = self.animate {
			props.animate = animate;
		}
		if let Some(filter) = &self.filter {
			props.filter = Filter::named(filter)?;
		}
		if self.max_length.is_some() {
			props.input_attributes.max_length = self.max_length;
		}
		Ok(props)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn toml_options_apply_onto_props() {
		let config: AutocompleteConfig = toml::from_str(
			r#"
placeholder = "Language"
origin = "top"
max_suggestions_height = 8
theme = "solarized-dark"
spring = "gentle"
animate = false
filter = "prefix"
max_length = 12
"#,
		)
		.expect("valid toml");

		let props = config.apply(AutocompleteProps::default()).expect("valid config");
		assert_eq!(props.placeholder, "Language");
		assert_eq!(props.origin, Origin::Top);
		assert_eq!(props.max_suggestions_height, 8);
		assert_eq!(props.theme, style::by_name("solarized").expect("builtin"));
		assert_eq!(props.spring, SpringConfig::GENTLE);
		assert!(!props.animate);
		assert!(props.filter.matches("Rust", "ru"));
		assert!(!props.filter.matches("Rust", "st"));
		assert_eq!(props.input_attributes.max_length, Some(12));
	}

	#[test]
	fn empty_config_keeps_defaults() {
		let config: AutocompleteConfig = toml::from_str("").expect("valid toml");
		let props = config.apply(AutocompleteProps::default()).expect("valid config");
		assert_eq!(props.origin, Origin::Bottom);
		assert_eq!(props.max_suggestions_height, 320);
		assert!(props.animate);
	}

	#[test]
	fn unknown_names_are_reported() {
		let config = AutocompleteConfig {
			origin: Some("left".to_string()),
			..AutocompleteConfig::default()
		};
		assert_eq!(
			config.apply(AutocompleteProps::default()).err(),
			Some(ConfigError::UnknownOrigin {
				value: "left".to_string()
			})
		);

		let config = AutocompleteConfig {
			theme: Some("neon".to_string()),
			..AutocompleteConfig::default()
		};
		assert!(matches!(
			config.apply(AutocompleteProps::default()),
			Err(ConfigError::UnknownTheme { .. })
		));

		let config = AutocompleteConfig {
			max_suggestions_height: Some(0),
			..AutocompleteConfig::default()
		};
		assert!(matches!(
			config.apply(AutocompleteProps::default()),
			Err(ConfigError::ZeroHeight)
		));
	}
}
