//! Spring interpolation service.
//!
//! A [`Motion`] drives a set of named numeric properties toward a target
//! style. Each property either jumps straight to a static value or springs
//! toward it. The host advances the motion with [`Motion::tick`] once per
//! frame and reads the interpolated values back when rendering.

mod spring;

use std::time::Duration;

use indexmap::IndexMap;
use log::trace;

pub use spring::{DEFAULT_PRECISION, SpringConfig, SpringPreset, step};

/// Fixed integration timestep.
pub const FRAME: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// Accumulated time beyond this many frames is dropped instead of replayed.
const MAX_BACKLOG_FRAMES: u32 = 10;

/// Destination of a single property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target {
	/// Jump to the value without animating.
	Static(f64),
	/// Animate toward the value using the given spring.
	Spring(f64, SpringConfig),
}

impl Target {
	/// Animate toward `value` with the provided spring parameters.
	#[must_use]
	pub fn spring(value: f64, config: SpringConfig) -> Self {
		Self::Spring(value, config)
	}

	/// The value this target resolves to.
	#[must_use]
	pub fn value(&self) -> f64 {
		match *self {
			Self::Static(value) | Self::Spring(value, _) => value,
		}
	}
}

impl From<f64> for Target {
	fn from(value: f64) -> Self {
		Self::Static(value)
	}
}

#[derive(Debug, Clone, Copy)]
struct Property {
	position: f64,
	velocity: f64,
	target: Target,
}

impl Property {
	fn is_settled(&self) -> bool {
		self.velocity == 0.0 && self.position == self.target.value()
	}

	fn advance(&mut self, dt: f64) {
		match self.target {
			Target::Static(value) => {
				self.position = value;
				self.velocity = 0.0;
			}
			Target::Spring(value, config) => {
				(self.position, self.velocity) = step(dt, self.position, self.velocity, value, config);
			}
		}
	}

	fn snap(&mut self) {
		self.position = self.target.value();
		self.velocity = 0.0;
	}
}

/// Named properties interpolated toward a target style.
#[derive(Debug, Clone)]
pub struct Motion {
	properties: IndexMap<String, Property>,
	accumulated: Duration,
	enabled: bool,
}

impl Motion {
	/// Start a motion at the given default style. Every property starts at
	/// rest with its target equal to its starting value.
	pub fn new<I, S>(default_style: I) -> Self
	where
		I: IntoIterator<Item = (S, f64)>,
		S: Into<String>,
	{
		let properties = default_style
			.into_iter()
			.map(|(name, value)| {
				(
					name.into(),
					Property {
						position: value,
						velocity: 0.0,
						target: Target::Static(value),
					},
				)
			})
			.collect();
		Self {
			properties,
			accumulated: Duration::ZERO,
			enabled: true,
		}
	}

	/// Replace the target for each listed property. Properties that were not
	/// part of the default style are added at their target value.
	pub fn set_style<I, S>(&mut self, style: I)
	where
		I: IntoIterator<Item = (S, Target)>,
		S: Into<String>,
	{
		for (name, target) in style {
			let name = name.into();
			match self.properties.get_mut(&name) {
				Some(property) => {
					property.target = target;
					if let Target::Static(_) = target {
						property.snap();
					}
				}
				None => {
					self.properties.insert(
						name,
						Property {
							position: target.value(),
							velocity: 0.0,
							target,
						},
					);
				}
			}
		}
		if !self.enabled {
			self.snap_all();
		}
	}

	/// Enable or disable animation. A disabled motion always sits on its
	/// targets.
	pub fn set_enabled(&mut self, enabled: bool) {
		self.enabled = enabled;
		if !enabled {
			self.snap_all();
		}
	}

	/// Whether springs are animated.
	#[must_use]
	pub fn is_enabled(&self) -> bool {
		self.enabled
	}

	/// Advance the simulation by `elapsed` wall-clock time.
	///
	/// Returns `true` while any property is still moving.
	pub fn tick(&mut self, elapsed: Duration) -> bool {
		if self.is_at_rest() {
			self.accumulated = Duration::ZERO;
			return false;
		}

		self.accumulated += elapsed;
		let mut frames = self.accumulated.as_nanos() / FRAME.as_nanos();
		if frames > u128::from(MAX_BACKLOG_FRAMES) {
			frames = 1;
			self.accumulated = FRAME;
		}

		let dt = FRAME.as_secs_f64();
		for _ in 0..frames {
			for property in self.properties.values_mut() {
				property.advance(dt);
			}
			self.accumulated = self.accumulated.saturating_sub(FRAME);
		}

		let moving = !self.is_at_rest();
		if !moving {
			trace!("motion settled");
			self.accumulated = Duration::ZERO;
		}
		moving
	}

	/// Whether every property has reached its target.
	#[must_use]
	pub fn is_at_rest(&self) -> bool {
		self.properties.values().all(Property::is_settled)
	}

	/// Current interpolated value of a property.
	#[must_use]
	pub fn value(&self, name: &str) -> Option<f64> {
		self.properties.get(name).map(|property| property.position)
	}

	/// Target value of a property.
	#[must_use]
	pub fn target(&self, name: &str) -> Option<f64> {
		self.properties.get(name).map(|property| property.target.value())
	}

	/// Interpolated values in insertion order.
	pub fn values(&self) -> impl Iterator<Item = (&str, f64)> {
		self.properties
			.iter()
			.map(|(name, property)| (name.as_str(), property.position))
	}

	fn snap_all(&mut self) {
		for property in self.properties.values_mut() {
			property.snap();
		}
		self.accumulated = Duration::ZERO;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn panel_motion() -> Motion {
		Motion::new([("height", 0.0), ("opacity", 0.0)])
	}

	fn run_until_rest(motion: &mut Motion) -> usize {
		for frame in 1..=2_000 {
			if !motion.tick(FRAME) {
				return frame;
			}
		}
		panic!("motion never came to rest");
	}

	#[test]
	fn new_motion_is_at_rest_on_default_style() {
		let mut motion = panel_motion();
		assert!(motion.is_at_rest());
		assert_eq!(motion.value("height"), Some(0.0));
		assert!(!motion.tick(FRAME));
	}

	#[test]
	fn springs_converge_on_target_values() {
		let mut motion = panel_motion();
		motion.set_style([
			("height", Target::spring(320.0, SpringConfig::STIFF)),
			("opacity", Target::spring(1.0, SpringConfig::STIFF)),
		]);

		assert!(motion.tick(FRAME));
		let first = motion.value("height").unwrap();
		assert!(first > 0.0 && first < 320.0, "height after one frame: {first}");

		run_until_rest(&mut motion);
		assert_eq!(motion.value("height"), Some(320.0));
		assert_eq!(motion.value("opacity"), Some(1.0));
	}

	#[test]
	fn retargeting_mid_flight_reverses_direction() {
		let mut motion = panel_motion();
		motion.set_style([("height", Target::spring(100.0, SpringConfig::STIFF))]);
		for _ in 0..5 {
			motion.tick(FRAME);
		}
		let peak = motion.value("height").unwrap();
		motion.set_style([("height", Target::spring(0.0, SpringConfig::STIFF))]);
		run_until_rest(&mut motion);
		assert!(peak > 0.0);
		assert_eq!(motion.value("height"), Some(0.0));
	}

	#[test]
	fn static_targets_jump_immediately() {
		let mut motion = panel_motion();
		motion.set_style([("opacity", Target::Static(0.5))]);
		assert_eq!(motion.value("opacity"), Some(0.5));
		assert!(motion.is_at_rest());
	}

	#[test]
	fn sub_frame_ticks_accumulate() {
		let mut motion = panel_motion();
		motion.set_style([("height", Target::spring(10.0, SpringConfig::STIFF))]);
		motion.tick(FRAME / 2);
		assert_eq!(motion.value("height"), Some(0.0));
		motion.tick(FRAME / 2 + Duration::from_micros(1));
		assert!(motion.value("height").unwrap() > 0.0);
	}

	#[test]
	fn large_backlog_advances_a_single_frame() {
		let mut motion = panel_motion();
		motion.set_style([("height", Target::spring(10.0, SpringConfig::STIFF))]);
		let mut reference = motion.clone();

		motion.tick(Duration::from_secs(5));
		reference.tick(FRAME);
		assert_eq!(motion.value("height"), reference.value("height"));
	}

	#[test]
	fn disabled_motion_snaps_to_targets() {
		let mut motion = panel_motion();
		motion.set_enabled(false);
		motion.set_style([("height", Target::spring(42.0, SpringConfig::WOBBLY))]);
		assert_eq!(motion.value("height"), Some(42.0));
		assert!(motion.is_at_rest());
	}

	#[test]
	fn unknown_properties_are_added_at_target() {
		let mut motion = panel_motion();
		motion.set_style([("width", Target::spring(3.0, SpringConfig::GENTLE))]);
		assert_eq!(motion.value("width"), Some(3.0));
		let names: Vec<&str> = motion.values().map(|(name, _)| name).collect();
		assert_eq!(names, ["height", "opacity", "width"]);
	}
}
