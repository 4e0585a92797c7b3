//! Site-wide ambient background.
//!
//! Paints a continuously animated sky behind all page content on a single
//! full-document canvas:
//! - Drifting star dots that flicker gently
//! - Short-lived colored sparks with a fade-in/fade-out envelope
//! - Three huge, faint light orbs that bounce slowly across the page
//!
//! # Example
//!
//! ```ignore
//! use skyrend_bg::init_site_bg;
//!
//! // Call before mounting other content so the canvas is the first body child.
//! let background = init_site_bg();
//!
//! // Later, after content changed the page height:
//! if let Some(bg) = &background {
//!     bg.resize();
//! }
//! ```

mod component;
pub mod config;
pub mod error;
pub mod orbs;
pub mod particles;
pub mod render;
pub mod state;
pub mod surface;
pub mod theme;

pub use component::{SiteBackground, init_site_bg, init_site_bg_with};
pub use config::BackgroundConfig;
pub use error::{BackgroundError, ConfigError};
pub use theme::Theme;
