//! Star and spark particle pools.
//!
//! Both pools are fixed-size arenas. Stars are recycled by wrapping around the
//! surface edges; sparks are recycled by regenerating the expired slot in place.
//! Nothing is allocated after [`ParticlePools::build`].

use rand::Rng;

use super::config::{BackgroundConfig, SparkRanges, StarRanges, ValueRange};
use super::theme::SparkColor;

/// Lower bound of a star's flicker band, relative to its base alpha.
pub const FLICKER_LOW: f64 = 0.3;
/// Upper bound of a star's flicker band, relative to its base alpha.
pub const FLICKER_HIGH: f64 = 1.6;

/// Fraction of a spark's life spent fading in.
pub const SPARK_PEAK: f64 = 0.3;

/// Moves a particle up by `speed` and sideways by `drift`, wrapping it around when
/// it leaves the surface by more than `margin`. A particle that leaves through the
/// top re-enters at the bottom at a fresh random column.
#[allow(clippy::too_many_arguments)]
fn drift_and_wrap<R: Rng + ?Sized>(
	x: &mut f64,
	y: &mut f64,
	speed: f64,
	drift: f64,
	width: f64,
	height: f64,
	margin: f64,
	rng: &mut R,
) {
	*y -= speed;
	*x += drift;

	if *y < -margin {
		*y = height + margin;
		*x = ValueRange::new(0.0, width).sample(rng);
	}
	if *x < -margin {
		*x = width + margin;
	} else if *x > width + margin {
		*x = -margin;
	}
}

/// A tiny, slow background dot.
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
	/// Horizontal position in surface pixels.
	pub x: f64,
	/// Vertical position in surface pixels.
	pub y: f64,
	/// Dot radius in pixels.
	pub radius: f64,
	/// Upward movement per frame.
	pub speed: f64,
	/// Sideways movement per frame.
	pub drift: f64,
	/// Current opacity.
	pub alpha: f64,
	/// Opacity the star was born with; the flicker band scales from it.
	pub base_alpha: f64,
	/// Opacity change per frame.
	pub flicker: f64,
	/// +1.0 while brightening, -1.0 while dimming.
	pub flicker_dir: f64,
}

impl Star {
	/// Star at a random position on a `width` x `height` surface.
	pub fn random<R: Rng + ?Sized>(
		ranges: &StarRanges,
		width: f64,
		height: f64,
		rng: &mut R,
	) -> Self {
		let alpha = ranges.alpha.sample(rng);
		Self {
			x: ValueRange::new(0.0, width).sample(rng),
			y: ValueRange::new(0.0, height).sample(rng),
			radius: ranges.radius.sample(rng),
			speed: ranges.speed.sample(rng),
			drift: ranges.drift.sample(rng),
			alpha,
			base_alpha: alpha,
			flicker: ranges.flicker.sample(rng),
			flicker_dir: if rng.gen_bool(0.5) { 1.0 } else { -1.0 },
		}
	}

	/// Range the alpha oscillates within.
	pub fn alpha_band(&self) -> (f64, f64) {
		(self.base_alpha * FLICKER_LOW, self.base_alpha * FLICKER_HIGH)
	}

	/// Move, wrap and flicker for one frame.
	pub fn update<R: Rng + ?Sized>(&mut self, width: f64, height: f64, margin: f64, rng: &mut R) {
		drift_and_wrap(
			&mut self.x,
			&mut self.y,
			self.speed,
			self.drift,
			width,
			height,
			margin,
			rng,
		);

		self.alpha += self.flicker * self.flicker_dir;
		let (low, high) = self.alpha_band();
		if self.alpha >= high {
			self.alpha = high;
			self.flicker_dir = -1.0;
		} else if self.alpha <= low {
			self.alpha = low;
			self.flicker_dir = 1.0;
		}
	}
}

/// Triangular opacity envelope: linear rise to `max_alpha` over the first 30% of
/// life, linear fall to zero over the rest.
pub fn spark_envelope(life: u32, max_life: u32, max_alpha: f64) -> f64 {
	if max_life == 0 {
		return 0.0;
	}
	let progress = life as f64 / max_life as f64;
	let alpha = if progress < SPARK_PEAK {
		max_alpha * (progress / SPARK_PEAK)
	} else {
		max_alpha * (1.0 - (progress - SPARK_PEAK) / (1.0 - SPARK_PEAK))
	};
	alpha.clamp(0.0, max_alpha)
}

/// A brief colored flare.
#[derive(Clone, Debug, PartialEq)]
pub struct Spark {
	/// Horizontal position in surface pixels.
	pub x: f64,
	/// Vertical position in surface pixels.
	pub y: f64,
	/// Core radius in pixels.
	pub radius: f64,
	/// Upward movement per frame.
	pub speed: f64,
	/// Sideways movement per frame.
	pub drift: f64,
	/// Current opacity, from [`spark_envelope`].
	pub alpha: f64,
	/// Opacity at the envelope peak.
	pub max_alpha: f64,
	/// Frames lived so far.
	pub life: u32,
	/// Frames until the slot is regenerated.
	pub max_life: u32,
	/// Palette entry.
	pub color: SparkColor,
}

impl Spark {
	/// Newborn spark (`life == 0`, invisible) at a random position.
	pub fn random<R: Rng + ?Sized>(
		ranges: &SparkRanges,
		width: f64,
		height: f64,
		rng: &mut R,
	) -> Self {
		let (min_life, max_life) = ranges.max_life;
		Self {
			x: ValueRange::new(0.0, width).sample(rng),
			y: ValueRange::new(0.0, height).sample(rng),
			radius: ranges.radius.sample(rng),
			speed: ranges.speed.sample(rng),
			drift: ranges.drift.sample(rng),
			alpha: 0.0,
			max_alpha: ranges.max_alpha.sample(rng),
			life: 0,
			max_life: rng.gen_range(min_life..=max_life.max(min_life)),
			color: SparkColor::random(rng),
		}
	}

	/// True for a spark that has not lived a frame yet. After a tick this only
	/// holds for slots that were just regenerated, which are not painted.
	pub fn is_fresh(&self) -> bool {
		self.life == 0
	}

	/// Advance one frame. Returns `true` when the spark reached the end of its life.
	fn advance<R: Rng + ?Sized>(&mut self, width: f64, height: f64, margin: f64, rng: &mut R) -> bool {
		self.life += 1;
		drift_and_wrap(
			&mut self.x,
			&mut self.y,
			self.speed,
			self.drift,
			width,
			height,
			margin,
			rng,
		);
		self.alpha = spark_envelope(self.life, self.max_life, self.max_alpha);
		self.life >= self.max_life
	}
}

/// Stars and sparks sized for one surface.
#[derive(Clone, Debug)]
pub struct ParticlePools {
	/// Star pool, recycled by wrapping.
	pub stars: Vec<Star>,
	/// Spark slots, recycled by regeneration.
	pub sparks: Vec<Spark>,
	width: f64,
	height: f64,
}

impl ParticlePools {
	/// Generate a fresh pool for a `width` x `height` surface.
	pub fn build<R: Rng + ?Sized>(
		config: &BackgroundConfig,
		width: f64,
		height: f64,
		rng: &mut R,
	) -> Self {
		let stars = (0..config.star_count)
			.map(|_| Star::random(&config.stars, width, height, rng))
			.collect();
		let sparks = (0..config.spark_count)
			.map(|_| Spark::random(&config.sparks, width, height, rng))
			.collect();

		Self {
			stars,
			sparks,
			width,
			height,
		}
	}

	/// Advance every particle one frame. Expired sparks are regenerated in their
	/// slot; the number of regenerated slots is returned.
	pub fn update<R: Rng + ?Sized>(&mut self, config: &BackgroundConfig, rng: &mut R) -> usize {
		let (width, height, margin) = (self.width, self.height, config.wrap_margin);

		for star in &mut self.stars {
			star.update(width, height, margin, rng);
		}

		let mut respawned = 0;
		for spark in &mut self.sparks {
			if spark.advance(width, height, margin, rng) {
				*spark = Spark::random(&config.sparks, width, height, rng);
				respawned += 1;
			}
		}
		respawned
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	const EPS: f64 = 1e-9;

	fn seeded_pools(seed: u64, width: f64, height: f64) -> (BackgroundConfig, ParticlePools, SmallRng) {
		let config = BackgroundConfig::default();
		let mut rng = SmallRng::seed_from_u64(seed);
		let pools = ParticlePools::build(&config, width, height, &mut rng);
		(config, pools, rng)
	}

	fn spark_with_life(max_life: u32, max_alpha: f64) -> Spark {
		Spark {
			x: 50.0,
			y: 50.0,
			radius: 2.0,
			speed: 0.0,
			drift: 0.0,
			alpha: 0.0,
			max_alpha,
			life: 0,
			max_life,
			color: SparkColor::Teal,
		}
	}

	#[test]
	fn build_produces_configured_counts_within_bounds() {
		for &(w, h) in &[(1000.0, 2000.0), (320.0, 5000.0), (1920.0, 1080.0)] {
			let (_, pools, _) = seeded_pools(11, w, h);
			assert_eq!(pools.stars.len(), 140);
			assert_eq!(pools.sparks.len(), 18);
			for s in &pools.stars {
				assert!((0.0..=w).contains(&s.x) && (0.0..=h).contains(&s.y));
			}
			for s in &pools.sparks {
				assert!((0.0..=w).contains(&s.x) && (0.0..=h).contains(&s.y));
				assert_eq!(s.life, 0);
				assert_eq!(s.alpha, 0.0);
			}
		}
	}

	#[test]
	fn generated_attributes_respect_ranges() {
		let (config, pools, _) = seeded_pools(5, 800.0, 600.0);
		for s in &pools.stars {
			assert!(config.stars.radius.contains(s.radius));
			assert!(config.stars.speed.contains(s.speed));
			assert!(config.stars.drift.contains(s.drift));
			assert!(config.stars.alpha.contains(s.alpha));
			assert!(config.stars.flicker.contains(s.flicker));
			assert_eq!(s.alpha, s.base_alpha);
			assert!(s.flicker_dir == 1.0 || s.flicker_dir == -1.0);
		}
		for s in &pools.sparks {
			assert!(config.sparks.radius.contains(s.radius));
			assert!(config.sparks.speed.contains(s.speed));
			assert!(config.sparks.drift.contains(s.drift));
			assert!(config.sparks.max_alpha.contains(s.max_alpha));
			assert!((180..=420).contains(&s.max_life));
		}
	}

	#[test]
	fn star_alpha_never_leaves_flicker_band() {
		for seed in 0..8 {
			let (config, mut pools, mut rng) = seeded_pools(seed, 600.0, 900.0);
			for _ in 0..3000 {
				pools.update(&config, &mut rng);
				for s in &pools.stars {
					let (low, high) = s.alpha_band();
					assert!(s.alpha >= low && s.alpha <= high, "alpha {} outside [{low}, {high}]", s.alpha);
				}
			}
		}
	}

	#[test]
	fn star_flicker_turns_around_at_band_edges() {
		let mut rng = SmallRng::seed_from_u64(0);
		let mut star = Star {
			x: 10.0,
			y: 10.0,
			radius: 1.0,
			speed: 0.0,
			drift: 0.0,
			alpha: 0.475,
			base_alpha: 0.3,
			flicker: 0.01,
			flicker_dir: 1.0,
		};
		let (low, high) = star.alpha_band();

		star.update(100.0, 100.0, 4.0, &mut rng);
		assert_eq!(star.alpha, high);
		assert_eq!(star.flicker_dir, -1.0);

		star.update(100.0, 100.0, 4.0, &mut rng);
		assert!((star.alpha - (high - 0.01)).abs() < EPS);
		assert_eq!(star.flicker_dir, -1.0);

		star.alpha = 0.095;
		star.update(100.0, 100.0, 4.0, &mut rng);
		assert_eq!(star.alpha, low);
		assert_eq!(star.flicker_dir, 1.0);
	}

	#[test]
	fn particles_stay_within_wrap_margin() {
		let (w, h) = (400.0, 300.0);
		for seed in 0..4 {
			let (config, mut pools, mut rng) = seeded_pools(seed, w, h);
			for _ in 0..4000 {
				pools.update(&config, &mut rng);
				for s in &pools.stars {
					assert!(s.y >= -4.0 && s.y <= h + 4.0, "star y {}", s.y);
					assert!(s.x >= -4.0 && s.x <= w + 4.0, "star x {}", s.x);
				}
				for s in &pools.sparks {
					assert!(s.y >= -4.0 && s.y <= h + 4.0, "spark y {}", s.y);
					assert!(s.x >= -4.0 && s.x <= w + 4.0, "spark x {}", s.x);
				}
			}
		}
	}

	#[test]
	fn star_leaving_top_reenters_at_bottom() {
		let mut rng = SmallRng::seed_from_u64(9);
		let mut star = Star::random(&StarRanges::default(), 500.0, 500.0, &mut rng);
		star.y = -3.9;
		star.speed = 0.5;
		star.update(500.0, 500.0, 4.0, &mut rng);
		assert_eq!(star.y, 504.0);
		assert!((0.0..=500.0).contains(&star.x));
	}

	#[test]
	fn star_leaving_sideways_wraps_to_opposite_edge() {
		let mut rng = SmallRng::seed_from_u64(9);
		let mut star = Star::random(&StarRanges::default(), 500.0, 500.0, &mut rng);
		star.y = 250.0;
		star.x = -3.95;
		star.drift = -0.1;
		star.update(500.0, 500.0, 4.0, &mut rng);
		assert_eq!(star.x, 504.0);

		star.x = 503.95;
		star.drift = 0.1;
		star.update(500.0, 500.0, 4.0, &mut rng);
		assert_eq!(star.x, -4.0);
	}

	#[test]
	fn one_frame_moves_each_star_by_its_velocity() {
		let (config, mut pools, mut rng) = seeded_pools(42, 1000.0, 2000.0);
		let before = pools.stars.clone();
		pools.update(&config, &mut rng);
		for (old, new) in before.iter().zip(&pools.stars) {
			assert!((new.x - old.x).abs() <= old.drift.abs() + EPS);
			assert!((old.y - new.y).abs() <= old.speed + EPS);
			assert!((old.y - new.y - old.speed).abs() < EPS);
		}
	}

	#[test]
	fn envelope_peaks_at_thirty_percent() {
		assert_eq!(spark_envelope(0, 200, 0.6), 0.0);
		assert!((spark_envelope(30, 200, 0.6) - 0.3).abs() < EPS);
		assert!((spark_envelope(60, 200, 0.6) - 0.6).abs() < EPS);
		assert!((spark_envelope(130, 200, 0.6) - 0.3).abs() < EPS);
		assert_eq!(spark_envelope(200, 200, 0.6), 0.0);
	}

	#[test]
	fn spark_alpha_follows_envelope_over_its_life() {
		let mut rng = SmallRng::seed_from_u64(2);
		let mut spark = spark_with_life(200, 0.5);
		let mut last = 0.0;
		for frame in 1..200 {
			let expired = spark.advance(1000.0, 2000.0, 4.0, &mut rng);
			assert!(!expired);
			assert!(spark.alpha >= 0.0 && spark.alpha <= spark.max_alpha);
			if frame <= 60 {
				assert!(spark.alpha >= last);
			} else {
				assert!(spark.alpha <= last);
			}
			last = spark.alpha;
			if frame == 60 {
				assert_eq!(spark.life * 10, spark.max_life * 3);
				assert!((spark.alpha - 0.5).abs() < EPS);
			}
		}
		assert!(spark.alpha < 0.01);
		assert!(spark.advance(1000.0, 2000.0, 4.0, &mut rng));
		assert_eq!(spark.life, 200);
		assert_eq!(spark.alpha, 0.0);
	}

	#[test]
	fn expired_spark_is_regenerated_in_its_slot() {
		let (config, mut pools, mut rng) = seeded_pools(13, 800.0, 800.0);
		pools.sparks[3] = Spark {
			life: 199,
			..spark_with_life(200, 0.4)
		};
		let others: Vec<u32> = pools.sparks.iter().map(|s| s.life).collect();

		let respawned = pools.update(&config, &mut rng);

		assert!(respawned >= 1);
		assert_eq!(pools.sparks.len(), 18);
		assert!(pools.sparks[3].is_fresh());
		assert_eq!(pools.sparks[3].alpha, 0.0);
		for (i, s) in pools.sparks.iter().enumerate() {
			if i != 3 && others[i] + 1 < s.max_life {
				assert_eq!(s.life, others[i] + 1);
			}
		}
	}

	#[test]
	fn pool_sizes_are_invariant_over_time() {
		let (config, mut pools, mut rng) = seeded_pools(21, 640.0, 480.0);
		let mut total_respawns = 0;
		for _ in 0..1000 {
			total_respawns += pools.update(&config, &mut rng);
			assert_eq!(pools.stars.len(), 140);
			assert_eq!(pools.sparks.len(), 18);
		}
		// Every spark lives at most 420 frames.
		assert!(total_respawns >= 18);
	}
}
