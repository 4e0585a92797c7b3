//! Large, slow, very faint light orbs.
//!
//! Orbs live in normalized page coordinates (`0..=1` on both axes) so they need no
//! adjustment when the surface is resized. They bounce off the page edges.

use super::theme::{Color, Theme};

/// A large radial light source.
#[derive(Clone, Debug, PartialEq)]
pub struct Orb {
	/// Normalized horizontal position (fraction of surface width).
	pub x: f64,
	/// Normalized vertical position (fraction of surface height).
	pub y: f64,
	/// Radius in pixels.
	pub radius: f64,
	/// Tint at the center, fading to transparent at the rim.
	pub color: Color,
	/// Opacity at the orb's center.
	pub opacity: f64,
	/// Horizontal velocity in normalized units per frame.
	pub dx: f64,
	/// Vertical velocity in normalized units per frame.
	pub dy: f64,
}

impl Orb {
	/// Advance one frame. Crossing a bound reverses that axis; with `clamp` the
	/// orb is also pinned onto the bound it crossed.
	pub fn drift(&mut self, clamp: bool) {
		self.x += self.dx;
		self.y += self.dy;

		if self.x < 0.0 || self.x > 1.0 {
			self.dx = -self.dx;
			if clamp {
				self.x = self.x.clamp(0.0, 1.0);
			}
		}
		if self.y < 0.0 || self.y > 1.0 {
			self.dy = -self.dy;
			if clamp {
				self.y = self.y.clamp(0.0, 1.0);
			}
		}
	}

	/// Pixel center on a `width` x `height` surface.
	pub fn center(&self, width: f64, height: f64) -> (f64, f64) {
		(self.x * width, self.y * height)
	}
}

/// The fixed trio of ambient orbs.
#[derive(Clone, Debug)]
pub struct OrbSet {
	/// Orbs in theme tint order.
	pub orbs: [Orb; 3],
}

impl OrbSet {
	/// Starting layout, tinted from `theme`.
	pub fn new(theme: &Theme) -> Self {
		let [teal, copper, indigo] = theme.orbs;
		Self {
			orbs: [
				Orb {
					x: 0.15,
					y: 0.10,
					radius: 340.0,
					color: teal,
					opacity: 0.04,
					dx: 0.00012,
					dy: 0.00008,
				},
				Orb {
					x: 0.80,
					y: 0.55,
					radius: 400.0,
					color: copper,
					opacity: 0.05,
					dx: -0.00009,
					dy: 0.00011,
				},
				Orb {
					x: 0.50,
					y: 0.85,
					radius: 300.0,
					color: indigo,
					opacity: 0.045,
					dx: 0.00010,
					dy: -0.00007,
				},
			],
		}
	}

	/// Advance every orb one frame.
	pub fn drift(&mut self, clamp: bool) {
		for orb in &mut self.orbs {
			orb.drift(clamp);
		}
	}

	/// Orbs in paint order.
	pub fn iter(&self) -> impl Iterator<Item = &Orb> {
		self.orbs.iter()
	}
}

impl Default for OrbSet {
	fn default() -> Self {
		Self::new(&Theme::default())
	}
}
