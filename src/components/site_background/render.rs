//! Frame painting for the ambient background.
//!
//! Paint order is fixed, back to front:
//! 1. Clear and solid backdrop
//! 2. Orbs (dimmest, furthest back)
//! 3. Stars
//! 4. Sparks: a soft glow, then a bright core on top
//!
//! Drawing goes through the [`Painter`] trait so the pass can be checked
//! without a browser; the canvas implementation is below.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::particles::Spark;
use super::state::BackgroundState;
use super::theme::{Color, Theme};

/// Glow radius relative to the spark radius.
const SPARK_GLOW_SCALE: f64 = 4.0;
/// Core dot radius relative to the spark radius.
const SPARK_CORE_SCALE: f64 = 0.6;

/// Minimal set of 2D drawing operations the background needs.
pub trait Painter {
	/// Erase the whole surface.
	fn clear(&mut self, width: f64, height: f64);
	/// Fill the whole surface with a solid color.
	fn fill_rect(&mut self, width: f64, height: f64, color: Color);
	/// Fill a solid disc.
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color);
	/// Fill a disc with a radial gradient centered on it. Stops are `(offset, color)`.
	fn fill_radial(&mut self, x: f64, y: f64, radius: f64, stops: &[(f64, Color)]);
}

impl Painter for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_rect(&mut self, width: f64, height: f64, color: Color) {
		self.set_fill_style_str(&color.to_css());
		CanvasRenderingContext2d::fill_rect(self, 0.0, 0.0, width, height);
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		self.set_fill_style_str(&color.to_css());
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.fill();
	}

	fn fill_radial(&mut self, x: f64, y: f64, radius: f64, stops: &[(f64, Color)]) {
		let Ok(gradient) = self.create_radial_gradient(x, y, 0.0, x, y, radius) else {
			return;
		};
		for (offset, color) in stops {
			let _ = gradient.add_color_stop(*offset as f32, &color.to_css());
		}

		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		#[allow(deprecated)]
		self.set_fill_style(&gradient);
		self.fill();
	}
}

/// Paints one complete frame of the current state.
pub fn render<P: Painter + ?Sized>(state: &BackgroundState, theme: &Theme, painter: &mut P) {
	let surface = state.surface();
	let (width, height) = (surface.width, surface.height);

	painter.clear(width, height);
	painter.fill_rect(width, height, theme.background);

	for orb in state.orbs.iter() {
		let (cx, cy) = orb.center(width, height);
		painter.fill_radial(
			cx,
			cy,
			orb.radius,
			&[
				(0.0, orb.color.with_alpha(orb.opacity)),
				(1.0, orb.color.transparent()),
			],
		);
	}

	for star in &state.pools.stars {
		painter.fill_circle(star.x, star.y, star.radius, theme.star.with_alpha(star.alpha));
	}

	for spark in state.pools.sparks.iter().filter(|s| !s.is_fresh()) {
		draw_spark(painter, spark);
	}
}

fn draw_spark<P: Painter + ?Sized>(painter: &mut P, spark: &Spark) {
	let color = spark.color.color();

	painter.fill_radial(
		spark.x,
		spark.y,
		spark.radius * SPARK_GLOW_SCALE,
		&[
			(0.0, color.with_alpha(spark.alpha)),
			(0.4, color.with_alpha(spark.alpha * 0.4)),
			(1.0, color.transparent()),
		],
	);

	painter.fill_circle(
		spark.x,
		spark.y,
		spark.radius * SPARK_CORE_SCALE,
		color.with_alpha((spark.alpha * 2.0).min(1.0)),
	);
}
