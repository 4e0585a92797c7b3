//! Tunable constants for the ambient background.
//!
//! All values default to the ones the site ships with. The configuration can be
//! deserialized from JSON (camelCase keys, every key optional) so a page can
//! override individual values without restating the rest.

use rand::Rng;
use serde::Deserialize;

use super::error::ConfigError;

/// Closed interval `[min, max]` sampled uniformly.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct ValueRange {
	/// Inclusive lower bound.
	pub min: f64,
	/// Inclusive upper bound.
	pub max: f64,
}

impl ValueRange {
	/// Range from `min` to `max`, both inclusive.
	pub const fn new(min: f64, max: f64) -> Self {
		Self { min, max }
	}

	/// Uniform sample within the range. A zero-width range yields `min`.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
		if self.max <= self.min {
			return self.min;
		}
		rng.gen_range(self.min..=self.max)
	}

	/// Whether `value` lies inside the range.
	pub fn contains(&self, value: f64) -> bool {
		value >= self.min && value <= self.max
	}

	fn check(&self, name: &'static str) -> Result<(), ConfigError> {
		if self.min.is_finite() && self.max.is_finite() && self.min <= self.max {
			Ok(())
		} else {
			Err(ConfigError::InvalidRange {
				name,
				min: self.min,
				max: self.max,
			})
		}
	}
}

/// Attribute ranges for newly generated stars.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct StarRanges {
	/// Dot radius in pixels.
	pub radius: ValueRange,
	/// Upward speed in pixels per frame.
	pub speed: ValueRange,
	/// Horizontal drift in pixels per frame.
	pub drift: ValueRange,
	/// Starting (and base) opacity.
	pub alpha: ValueRange,
	/// Opacity change per frame.
	pub flicker: ValueRange,
}

impl Default for StarRanges {
	fn default() -> Self {
		Self {
			radius: ValueRange::new(0.4, 1.6),
			speed: ValueRange::new(0.15, 0.55),
			drift: ValueRange::new(-0.12, 0.12),
			alpha: ValueRange::new(0.15, 0.5),
			flicker: ValueRange::new(0.003, 0.012),
		}
	}
}

/// Attribute ranges for newly generated sparks.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SparkRanges {
	/// Core radius in pixels; the glow spans four times this.
	pub radius: ValueRange,
	/// Upward speed in pixels per frame.
	pub speed: ValueRange,
	/// Horizontal drift in pixels per frame.
	pub drift: ValueRange,
	/// Peak opacity reached at 30% of the spark's life.
	pub max_alpha: ValueRange,
	/// Lifetime in frames, inclusive on both ends.
	pub max_life: (u32, u32),
}

impl Default for SparkRanges {
	fn default() -> Self {
		Self {
			radius: ValueRange::new(1.0, 3.5),
			speed: ValueRange::new(0.2, 0.7),
			drift: ValueRange::new(-0.3, 0.3),
			max_alpha: ValueRange::new(0.3, 0.75),
			max_life: (180, 420),
		}
	}
}

/// Complete background configuration.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct BackgroundConfig {
	/// Stars per pool build.
	pub star_count: usize,
	/// Spark slots per pool build.
	pub spark_count: usize,
	/// Ranges new stars are drawn from.
	pub stars: StarRanges,
	/// Ranges new sparks are drawn from.
	pub sparks: SparkRanges,
	/// How far (px) a particle may leave the surface before it wraps.
	pub wrap_margin: f64,
	/// Delay before the one-off re-measure that catches late-loading content.
	pub remeasure_delay_ms: i32,
	/// DOM id given to the canvas element.
	pub canvas_id: String,
	/// Pin orbs onto the bound they cross instead of only reversing direction.
	pub clamp_orbs: bool,
}

impl Default for BackgroundConfig {
	fn default() -> Self {
		Self {
			star_count: 140,
			spark_count: 18,
			stars: StarRanges::default(),
			sparks: SparkRanges::default(),
			wrap_margin: 4.0,
			remeasure_delay_ms: 2000,
			canvas_id: "site-bg-canvas".to_string(),
			clamp_orbs: false,
		}
	}
}

impl BackgroundConfig {
	/// Check that every range can be sampled and every limit makes sense.
	pub fn validate(&self) -> Result<(), ConfigError> {
		self.stars.radius.check("stars.radius")?;
		self.stars.speed.check("stars.speed")?;
		self.stars.drift.check("stars.drift")?;
		self.stars.alpha.check("stars.alpha")?;
		self.stars.flicker.check("stars.flicker")?;
		self.sparks.radius.check("sparks.radius")?;
		self.sparks.speed.check("sparks.speed")?;
		self.sparks.drift.check("sparks.drift")?;
		self.sparks.max_alpha.check("sparks.maxAlpha")?;
		upward(self.stars.speed, "stars.speed")?;
		upward(self.sparks.speed, "sparks.speed")?;

		let (min_life, max_life) = self.sparks.max_life;
		if min_life == 0 || min_life > max_life {
			return Err(ConfigError::InvalidLife {
				min: min_life,
				max: max_life,
			});
		}
		if !self.wrap_margin.is_finite() || self.wrap_margin < 0.0 {
			return Err(ConfigError::InvalidMargin(self.wrap_margin));
		}
		Ok(())
	}
}

/// Particles only wrap when they leave through the top, so speeds must not
/// point downward.
fn upward(speed: ValueRange, name: &'static str) -> Result<(), ConfigError> {
	if speed.min < 0.0 {
		return Err(ConfigError::DownwardSpeed {
			name,
			min: speed.min,
		});
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	#[test]
	fn defaults_match_shipped_constants() {
		let config = BackgroundConfig::default();
		assert_eq!(config.star_count, 140);
		assert_eq!(config.spark_count, 18);
		assert_eq!(config.wrap_margin, 4.0);
		assert_eq!(config.remeasure_delay_ms, 2000);
		assert_eq!(config.sparks.max_life, (180, 420));
		assert_eq!(config.stars.flicker, ValueRange::new(0.003, 0.012));
		assert!(!config.clamp_orbs);
		assert!(config.validate().is_ok());
	}

	#[test]
	fn sample_stays_in_range() {
		let mut rng = SmallRng::seed_from_u64(7);
		let range = ValueRange::new(-0.3, 0.3);
		for _ in 0..1000 {
			assert!(range.contains(range.sample(&mut rng)));
		}
	}

	#[test]
	fn zero_width_range_samples_min() {
		let mut rng = SmallRng::seed_from_u64(1);
		assert_eq!(ValueRange::new(2.0, 2.0).sample(&mut rng), 2.0);
	}

	#[test]
	fn inverted_range_is_rejected() {
		let mut config = BackgroundConfig::default();
		config.stars.speed = ValueRange::new(0.5, 0.1);
		assert_eq!(
			config.validate(),
			Err(ConfigError::InvalidRange {
				name: "stars.speed",
				min: 0.5,
				max: 0.1,
			})
		);
	}

	#[test]
	fn downward_speed_is_rejected() {
		let mut config = BackgroundConfig::default();
		config.stars.speed = ValueRange::new(-0.5, -0.1);
		assert_eq!(
			config.validate(),
			Err(ConfigError::DownwardSpeed {
				name: "stars.speed",
				min: -0.5,
			})
		);

		let mut config = BackgroundConfig::default();
		config.sparks.speed = ValueRange::new(-0.1, 0.4);
		assert!(matches!(
			config.validate(),
			Err(ConfigError::DownwardSpeed {
				name: "sparks.speed",
				..
			})
		));

		config.sparks.speed = ValueRange::new(0.0, 0.4);
		assert!(config.validate().is_ok());
	}

	#[test]
	fn zero_life_is_rejected() {
		let mut config = BackgroundConfig::default();
		config.sparks.max_life = (0, 10);
		assert!(matches!(
			config.validate(),
			Err(ConfigError::InvalidLife { min: 0, max: 10 })
		));
	}

	#[test]
	fn negative_margin_is_rejected() {
		let config = BackgroundConfig {
			wrap_margin: -1.0,
			..Default::default()
		};
		assert_eq!(config.validate(), Err(ConfigError::InvalidMargin(-1.0)));
	}

	#[test]
	fn partial_json_overrides_keep_defaults() {
		let json = r#"{
			"starCount": 60,
			"sparks": { "maxLife": [100, 200] },
			"clampOrbs": true
		}"#;
		let config: BackgroundConfig = serde_json::from_str(json).unwrap();
		assert_eq!(config.star_count, 60);
		assert_eq!(config.spark_count, 18);
		assert_eq!(config.sparks.max_life, (100, 200));
		assert_eq!(config.sparks.radius, ValueRange::new(1.0, 3.5));
		assert_eq!(config.canvas_id, "site-bg-canvas");
		assert!(config.clamp_orbs);
	}
}
