//! Damped spring integration.


use crate::error::ConfigError;

/// Default convergence threshold for both position and velocity.
pub const DEFAULT_PRECISION: f64 = 0.01;

/// Physical parameters of a spring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
	/// Spring constant pulling the value toward its target.
	pub stiffness: f64,
	/// Friction opposing the current velocity.
	pub damping: f64,
	/// Distance and speed under which the spring is considered settled.
	pub precision: f64,
}

impl SpringConfig {
	/// Critically damped enough to avoid any overshoot.
	pub const NO_WOBBLE: Self = Self::new(170.0, 26.0);
	/// Slow and soft.
	pub const GENTLE: Self = Self::new(120.0, 14.0);
	/// Bouncy with visible overshoot.
	pub const WOBBLY: Self = Self::new(180.0, 12.0);
	/// Fast with very little overshoot.
	pub const STIFF: Self = Self::new(210.0, 20.0);

	/// Build a spring with the default precision.
	#[must_use]
	pub const fn new(stiffness: f64, damping: f64) -> Self {
		Self {
			stiffness,
			damping,
			precision: DEFAULT_PRECISION,
		}
	}

	/// Override the settle threshold.
	#[must_use]
	pub const fn with_precision(mut self, precision: f64) -> Self {
		self.precision = precision;
		self
	}

	/// Resolve a named preset.
	pub fn preset(name: &str) -> Result<Self, ConfigError> {
		SpringPreset::parse(name).map(SpringPreset::config)
	}
}

impl Default for SpringConfig {
	fn default() -> Self {
		Self::NO_WOBBLE
	}
}

/// Named spring presets accepted in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpringPreset {
	/// See [`SpringConfig::NO_WOBBLE`].
	NoWobble,
	/// See [`SpringConfig::GENTLE`].
	Gentle,
	/// See [`SpringConfig::WOBBLY`].
	Wobbly,
	/// See [`SpringConfig::STIFF`].
	#[default]
	Stiff,
}

impl SpringPreset {
	/// Parse a preset name, ignoring case and accepting `_` or `-` separators.
	pub fn parse(name: &str) -> Result<Self, ConfigError> {
		let normalized = name.trim().to_ascii_lowercase().replace('_', "-");
		match normalized.as_str() {
			"no-wobble" | "nowobble" => Ok(Self::NoWobble),
			"gentle" => Ok(Self::Gentle),
			"wobbly" => Ok(Self::Wobbly),
			"stiff" => Ok(Self::Stiff),
			_ => Err(ConfigError::UnknownSpringPreset {
				name: name.to_string(),
			}),
		}
	}

	/// Physical parameters for this preset.
	#[must_use]
	pub fn config(self) -> SpringConfig {
		match self {
			Self::NoWobble => SpringConfig::NO_WOBBLE,
			Self::Gentle => SpringConfig::GENTLE,
			Self::Wobbly => SpringConfig::WOBBLY,
			Self::Stiff => SpringConfig::STIFF,
		}
	}
}

/// Advance one spring by a single timestep of `dt` seconds.
///
/// Returns the new `(position, velocity)`. Once both the remaining distance
/// and the velocity are below the configured precision the spring snaps to
/// `target` with zero velocity.
#[must_use]
pub fn step(dt: f64, position: f64, velocity: f64, target: f64, spring: SpringConfig) -> (f64, f64) {
	let spring_force = -spring.stiffness * (position - target);
	let damper_force = -spring.damping * velocity;
	let acceleration = spring_force + damper_force;

	let next_velocity = velocity + acceleration * dt;
	let next_position = position + next_velocity * dt;

	if next_velocity.abs() < spring.precision && (next_position - target).abs() < spring.precision {
		return (target, 0.0);
	}

	(next_position, next_velocity)
}
