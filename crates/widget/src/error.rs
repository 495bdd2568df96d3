use thiserror::Error;

/// Errors raised while interpreting widget configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
	/// The panel origin was neither `top` nor `bottom`.
	#[error("unknown suggestion origin '{value}' (expected 'top' or 'bottom')")]
	UnknownOrigin { value: String },

	/// No built-in theme matched the requested name or alias.
	#[error("unknown theme '{name}'")]
	UnknownTheme { name: String },

	/// The requested spring preset does not exist.
	#[error("unknown spring preset '{name}' (expected no-wobble, gentle, wobbly or stiff)")]
	UnknownSpringPreset { name: String },

	/// The requested filter is not one of the built-in strategies.
	#[error("unknown filter '{name}' (expected fuzzy, substring or prefix)")]
	UnknownFilter { name: String },

	/// The expanded panel height must leave room for at least one row.
	#[error("maximum suggestions height must be greater than zero")]
	ZeroHeight,
}
