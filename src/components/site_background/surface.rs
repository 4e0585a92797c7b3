//! Surface management: the full-page canvas and its dimensions.
//!
//! The canvas spans the viewport width and the full scroll height of the
//! document, so the background scrolls with the page instead of staying fixed.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

use super::error::{BackgroundError, Result};

/// Inline style pinning the canvas behind all page content.
const CANVAS_STYLE: [(&str, &str); 6] = [
	("position", "absolute"),
	("top", "0"),
	("left", "0"),
	("z-index", "-1"),
	("pointer-events", "none"),
	("display", "block"),
];

/// Pixel dimensions of the drawing surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceSize {
	/// Viewport width in pixels.
	pub width: f64,
	/// Document scroll height in pixels.
	pub height: f64,
}

impl SurfaceSize {
	/// Size from already clean pixel values.
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// Size from raw page measurements, truncated to whole non-negative pixels.
	pub fn from_page(viewport_width: f64, scroll_height: f64) -> Self {
		let clean = |v: f64| if v.is_finite() { v.max(0.0).floor() } else { 0.0 };
		Self {
			width: clean(viewport_width),
			height: clean(scroll_height),
		}
	}

	/// Canvas attribute values.
	pub fn pixels(&self) -> (u32, u32) {
		(self.width as u32, self.height as u32)
	}
}

/// Owns the background canvas element.
pub struct Surface {
	window: Window,
	canvas: HtmlCanvasElement,
}

impl Surface {
	/// Create the canvas and insert it as the first child of `<body>`.
	pub fn create(window: Window, document: &Document, canvas_id: &str) -> Result<Self> {
		let body = document.body().ok_or(BackgroundError::NoBody)?;
		let canvas: HtmlCanvasElement = document
			.create_element("canvas")?
			.dyn_into()
			.map_err(|_| BackgroundError::Dom("created element is not a canvas".into()))?;

		canvas.set_id(canvas_id);
		canvas.set_attribute("aria-hidden", "true")?;
		let style = canvas.style();
		for (name, value) in CANVAS_STYLE {
			style.set_property(name, value)?;
		}
		body.prepend_with_node_1(&canvas)?;

		Ok(Self { window, canvas })
	}

	/// Read the current viewport width and document scroll height.
	pub fn measure(&self) -> Result<SurfaceSize> {
		let viewport_width = self.window.inner_width()?.as_f64().unwrap_or(0.0);
		let scroll_height = self
			.window
			.document()
			.and_then(|d| d.document_element())
			.map(|root| root.scroll_height() as f64)
			.ok_or(BackgroundError::NoDocument)?;
		Ok(SurfaceSize::from_page(viewport_width, scroll_height))
	}

	/// Re-measure the page and resize the canvas to match.
	///
	/// The canvas is collapsed first: it is part of the document, so at its old
	/// height it would hold the scroll height up and the page could never shrink.
	pub fn resize(&mut self) -> Result<SurfaceSize> {
		self.canvas.set_height(0);
		let size = self.measure()?;
		let (width, height) = size.pixels();
		self.canvas.set_width(width);
		self.canvas.set_height(height);
		Ok(size)
	}

	/// 2D drawing context of the canvas.
	pub fn context_2d(&self) -> Result<CanvasRenderingContext2d> {
		self.canvas
			.get_context("2d")?
			.ok_or(BackgroundError::ContextUnavailable)?
			.dyn_into()
			.map_err(|_| BackgroundError::ContextUnavailable)
	}

	/// Detach the canvas from the page.
	pub fn remove(&self) {
		self.canvas.remove();
	}
}
