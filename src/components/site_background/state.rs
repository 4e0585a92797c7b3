//! Background simulation state.
//!
//! Owns everything that changes from frame to frame: the surface dimensions, the
//! particle pools, the orbs and the random source. Created once when the
//! background mounts, then advanced by the animation loop with [`BackgroundState::tick`].
//! Nothing here touches the DOM, so the whole simulation runs in host tests.

use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::config::BackgroundConfig;
use super::orbs::OrbSet;
use super::particles::ParticlePools;
use super::surface::SurfaceSize;
use super::theme::Theme;

/// Simulation state for one mounted background.
pub struct BackgroundState {
	config: BackgroundConfig,
	surface: SurfaceSize,
	/// Stars and sparks, rebuilt on every resize.
	pub pools: ParticlePools,
	/// The three orbs, kept across resizes.
	pub orbs: OrbSet,
	rng: SmallRng,
	frames: u64,
}

impl BackgroundState {
	/// Fresh state with pools built for `surface` from a seeded rng.
	pub fn new(config: BackgroundConfig, theme: &Theme, surface: SurfaceSize, seed: u64) -> Self {
		let mut rng = SmallRng::seed_from_u64(seed);
		let pools = ParticlePools::build(&config, surface.width, surface.height, &mut rng);

		Self {
			config,
			surface,
			pools,
			orbs: OrbSet::new(theme),
			rng,
			frames: 0,
		}
	}

	/// Adopt new surface dimensions. The particle pools are regenerated wholesale;
	/// orbs are normalized and carry on where they were.
	pub fn resize(&mut self, surface: SurfaceSize) {
		self.surface = surface;
		self.pools = ParticlePools::build(&self.config, surface.width, surface.height, &mut self.rng);
	}

	/// Advance the simulation one frame.
	pub fn tick(&mut self) {
		self.orbs.drift(self.config.clamp_orbs);
		self.pools.update(&self.config, &mut self.rng);
		self.frames += 1;
	}

	/// Current surface dimensions.
	pub fn surface(&self) -> SurfaceSize {
		self.surface
	}

	/// Frames simulated since the background mounted.
	pub fn frames(&self) -> u64 {
		self.frames
	}
}
