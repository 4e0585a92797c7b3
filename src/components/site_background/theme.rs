//! Colors for the ambient background.
//!
//! The backdrop is a near-black navy; every light source on top of it is
//! tinted from a small fixed set so the page reads as one coherent sky.

use rand::Rng;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Same hue with a different opacity.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Fully transparent version of this color, used as the outer gradient stop
	/// so the fade keeps its hue instead of going through grey.
	pub fn transparent(self) -> Self {
		self.with_alpha(0.0)
	}

	/// CSS `rgba()` string for canvas fill styles.
	pub fn to_css(self) -> String {
		format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}

}

/// Tint of a spark. Sparks pick one of these uniformly when they are born.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SparkColor {
	/// Cool blue-green.
	Teal,
	/// Warm yellow.
	Gold,
	/// Deep orange.
	Amber,
	/// Faintly warm white.
	OffWhite,
}

impl SparkColor {
	/// Every palette entry, in draw order.
	pub const ALL: [SparkColor; 4] = [
		SparkColor::Teal,
		SparkColor::Gold,
		SparkColor::Amber,
		SparkColor::OffWhite,
	];

	/// Uniform pick from [`SparkColor::ALL`].
	pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
		Self::ALL[rng.gen_range(0..Self::ALL.len())]
	}

	/// Opaque RGB value of this tint.
	pub const fn color(self) -> Color {
		match self {
			SparkColor::Teal => Color::rgb(62, 201, 192),
			SparkColor::Gold => Color::rgb(212, 168, 75),
			SparkColor::Amber => Color::rgb(200, 100, 50),
			SparkColor::OffWhite => Color::rgb(255, 255, 230),
		}
	}
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Solid fill painted under everything else.
	pub background: Color,
	/// Star dots; alpha comes from each star.
	pub star: Color,
	/// One tint per orb, in orb order.
	pub orbs: [Color; 3],
}

impl Theme {
	/// Deep night sky with teal, copper and indigo glows (default)
	pub fn night() -> Self {
		Self {
			background: Color::rgb(7, 8, 15),
			star: Color::rgb(220, 215, 255),
			orbs: [
				Color::rgb(62, 201, 192),
				Color::rgb(180, 100, 40),
				Color::rgb(62, 60, 140),
			],
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::night()
	}
}
