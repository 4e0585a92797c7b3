//! Failure modes of background initialization.
//!
//! The background is decorative: none of these errors ever reach the page. The
//! public initializer logs them and degrades to drawing nothing.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Rejected configuration values.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
	/// A range is inverted or not finite.
	#[error("range `{name}` is invalid: min {min} > max {max} or not finite")]
	InvalidRange {
		/// Config path of the range.
		name: &'static str,
		/// Lower bound as given.
		min: f64,
		/// Upper bound as given.
		max: f64,
	},

	/// A speed range allows downward motion.
	#[error("`{name}` must be an upward speed (>= 0), got min {min}")]
	DownwardSpeed {
		/// Config path of the speed range.
		name: &'static str,
		/// Lower bound as given.
		min: f64,
	},

	/// Wrap margin is negative or not finite.
	#[error("wrap margin must be finite and non-negative, got {0}")]
	InvalidMargin(f64),

	/// Spark lifetime range is empty or starts at zero.
	#[error("spark max life must be at least one frame, got {min}..={max}")]
	InvalidLife {
		/// Shortest life in frames.
		min: u32,
		/// Longest life in frames.
		max: u32,
	},
}

/// Reasons the background could not be mounted.
#[derive(Debug, Error)]
pub enum BackgroundError {
	/// Not running in a browser window.
	#[error("no global window")]
	NoWindow,

	/// The window has no document.
	#[error("no document")]
	NoDocument,

	/// The document has no `<body>` yet.
	#[error("document has no body")]
	NoBody,

	/// The canvas refused a 2D context.
	#[error("2d drawing context unavailable")]
	ContextUnavailable,

	/// Configuration failed validation.
	#[error("invalid configuration: {0}")]
	Config(#[from] ConfigError),

	/// A DOM call threw.
	#[error("DOM call failed: {0}")]
	Dom(String),
}

impl From<JsValue> for BackgroundError {
	fn from(value: JsValue) -> Self {
		Self::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}

/// Shorthand for results produced while mounting the background.
pub type Result<T> = std::result::Result<T, BackgroundError>;
