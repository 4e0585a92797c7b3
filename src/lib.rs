//! skyrend-bg: site-wide ambient particle background.
//!
//! This crate paints an animated night sky (drifting stars, colored sparks and
//! slow light orbs) on a full-document canvas behind all page content, and ships
//! a small demo page that shows it off.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::site_background::{
	BackgroundConfig, BackgroundError, ConfigError, SiteBackground, Theme, init_site_bg,
	init_site_bg_with,
};

/// Id of the optional `<script type="application/json">` element holding
/// configuration overrides.
pub const CONFIG_ELEMENT_ID: &str = "site-bg-config";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("site-bg: logging initialized");
}

/// Parse and validate a JSON configuration override.
/// Keys are camelCase and all optional; missing keys keep their defaults.
fn parse_config(json: &str) -> Result<BackgroundConfig, String> {
	let config: BackgroundConfig = serde_json::from_str(json).map_err(|e| e.to_string())?;
	config.validate().map_err(|e| e.to_string())?;
	Ok(config)
}

/// Load background configuration from a script element with id="site-bg-config".
/// Falls back to the defaults when the element is missing or unusable.
pub fn load_config() -> BackgroundConfig {
	let Some(json_text) = config_element_text() else {
		return BackgroundConfig::default();
	};

	match parse_config(&json_text) {
		Ok(config) => {
			info!("site-bg: loaded configuration overrides");
			config
		}
		Err(e) => {
			warn!("site-bg: ignoring configuration overrides: {}", e);
			BackgroundConfig::default()
		}
	}
}

fn config_element_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

const DEMO_SECTIONS: [(&str, &str); 4] = [
	(
		"Skyrend",
		"Scroll down: the sky behind this page spans the whole document, not just the window.",
	),
	(
		"Stars",
		"Tiny dots rise slowly and flicker; when one drifts off an edge it comes back on the other side.",
	),
	(
		"Sparks",
		"Colored flares fade in, peak, and fade out again before a new one is born in their place.",
	),
	(
		"Orbs",
		"Three huge, faint lights wander the page and bounce softly off its edges.",
	),
];

/// Demo page: a few tall sections of content sitting on top of the background.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Skyrend Background" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<main class="demo-page">
			{DEMO_SECTIONS
				.iter()
				.map(|(title, body)| {
					view! {
						<section class="demo-section" style="min-height: 90vh; color: #e8e6f5;">
							<h2>{*title}</h2>
							<p>{*body}</p>
						</section>
					}
				})
				.collect_view()}
		</main>
	}
}
