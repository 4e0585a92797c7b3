//! Client entrypoint for the CSR demo build.

// Bin target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use leptos::prelude::*;
use skyrend_bg::{App, Theme, init_logging, init_site_bg_with, load_config};

fn main() {
	init_logging();

	// Started before mounting so the canvas lands as the first child of <body>.
	// The animation keeps itself alive; the handle is not needed here.
	let _background = init_site_bg_with(load_config(), Theme::default());

	mount_to_body(|| {
		view! { <App /> }
	})
}
