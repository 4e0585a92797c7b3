//! Browser lifecycle of the background.
//!
//! Mounting creates the canvas, sizes it, builds the particle pools and starts an
//! animation loop driven by `requestAnimationFrame`. A window `resize` listener and
//! a one-off delayed re-measure keep the canvas matched to the page. Every callback
//! shares one [`Runtime`]; the loop closure keeps the runtime alive on its own, so
//! the returned handle is only needed to resize on demand or to tear down.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Window};

use super::config::BackgroundConfig;
use super::error::{BackgroundError, Result};
use super::render;
use super::state::BackgroundState;
use super::surface::Surface;
use super::theme::Theme;

type Callback = RefCell<Option<Closure<dyn FnMut()>>>;

/// Everything the page callbacks share.
struct Runtime {
	window: Window,
	surface: RefCell<Surface>,
	ctx: RefCell<CanvasRenderingContext2d>,
	state: RefCell<BackgroundState>,
	theme: Theme,
	running: Cell<bool>,
	frame_request: Cell<Option<i32>>,
	remeasure_timer: Cell<Option<i32>>,
	animate: Callback,
	on_resize: Callback,
	remeasure: Callback,
}

impl Runtime {
	/// Match the canvas to the page again and regenerate the pools for it.
	fn resize(&self) {
		let size = match self.surface.borrow_mut().resize() {
			Ok(size) => size,
			Err(err) => {
				warn!("site-bg: resize failed: {err}");
				return;
			}
		};
		self.state.borrow_mut().resize(size);
		debug!("site-bg: surface resized to {}x{}", size.width, size.height);
	}

	/// One tick: simulate, paint, and ask for the next frame.
	fn frame(&self) {
		if !self.running.get() {
			return;
		}
		{
			let mut state = self.state.borrow_mut();
			state.tick();
			render::render(&state, &self.theme, &mut *self.ctx.borrow_mut());
		}
		self.schedule_frame();
	}

	fn schedule_frame(&self) {
		let animate = self.animate.borrow();
		let Some(cb) = animate.as_ref() else {
			return;
		};
		match self.window.request_animation_frame(cb.as_ref().unchecked_ref()) {
			Ok(id) => self.frame_request.set(Some(id)),
			Err(_) => {
				warn!("site-bg: requestAnimationFrame rejected, animation halted");
				self.running.set(false);
			}
		}
	}

	fn start(self: &Rc<Self>, remeasure_delay_ms: i32) -> Result<()> {
		let rt = Rc::clone(self);
		*self.animate.borrow_mut() = Some(Closure::new(move || rt.frame()));
		self.running.set(true);
		self.frame();

		let rt = Rc::clone(self);
		*self.on_resize.borrow_mut() = Some(Closure::new(move || rt.resize()));
		if let Some(ref cb) = *self.on_resize.borrow() {
			self.window
				.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())?;
		}

		let rt = Rc::clone(self);
		*self.remeasure.borrow_mut() = Some(Closure::new(move || {
			rt.remeasure_timer.set(None);
			if rt.running.get() {
				rt.resize();
			}
		}));
		if let Some(ref cb) = *self.remeasure.borrow() {
			let id = self
				.window
				.set_timeout_with_callback_and_timeout_and_arguments_0(
					cb.as_ref().unchecked_ref(),
					remeasure_delay_ms,
				)?;
			self.remeasure_timer.set(Some(id));
		}
		Ok(())
	}

	/// Cancel every pending callback, detach the canvas and break the
	/// runtime/closure reference cycle. Safe to call more than once.
	fn teardown(&self) {
		self.running.set(false);
		if let Some(id) = self.frame_request.take() {
			let _ = self.window.cancel_animation_frame(id);
		}
		if let Some(id) = self.remeasure_timer.take() {
			self.window.clear_timeout_with_handle(id);
		}
		if let Some(cb) = self.on_resize.borrow_mut().take() {
			let _ = self
				.window
				.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
		self.animate.borrow_mut().take();
		self.remeasure.borrow_mut().take();
		self.surface.borrow().remove();
	}
}

/// Handle to a mounted background.
///
/// Dropping the handle leaves the background running for the lifetime of the
/// page; call [`SiteBackground::stop`] to remove it.
#[wasm_bindgen]
pub struct SiteBackground {
	runtime: Rc<Runtime>,
}

#[wasm_bindgen]
impl SiteBackground {
	/// Re-measure the page and rebuild the particles. Other page code calls this
	/// after it changes the document height.
	pub fn resize(&self) {
		if self.runtime.running.get() {
			self.runtime.resize();
		}
	}

	/// Stop the animation, drop all listeners and remove the canvas.
	pub fn stop(&self) {
		let was_running = self.runtime.running.get();
		self.runtime.teardown();
		if was_running {
			info!(
				"site-bg: stopped after {} frames",
				self.runtime.state.borrow().frames()
			);
		}
	}

	/// Whether the animation loop is still scheduled.
	#[wasm_bindgen(js_name = isRunning)]
	pub fn is_running(&self) -> bool {
		self.runtime.running.get()
	}

	/// Frames painted since mounting.
	#[wasm_bindgen(js_name = frameCount)]
	pub fn frame_count(&self) -> u64 {
		self.runtime.state.borrow().frames()
	}
}

impl SiteBackground {
	/// Create the canvas, size it, build the pools and start animating.
	pub fn mount(config: BackgroundConfig, theme: Theme) -> Result<Self> {
		config.validate()?;

		let window = web_sys::window().ok_or(BackgroundError::NoWindow)?;
		let document = window.document().ok_or(BackgroundError::NoDocument)?;
		let mut surface = Surface::create(window.clone(), &document, &config.canvas_id)?;

		let prepared = surface.context_2d().and_then(|ctx| Ok((ctx, surface.resize()?)));
		let (ctx, size) = match prepared {
			Ok(ready) => ready,
			Err(err) => {
				surface.remove();
				return Err(err);
			}
		};

		let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
		let remeasure_delay_ms = config.remeasure_delay_ms;
		let state = BackgroundState::new(config, &theme, size, seed);
		let (stars, sparks) = (state.pools.stars.len(), state.pools.sparks.len());

		let runtime = Rc::new(Runtime {
			window,
			surface: RefCell::new(surface),
			ctx: RefCell::new(ctx),
			state: RefCell::new(state),
			theme,
			running: Cell::new(false),
			frame_request: Cell::new(None),
			remeasure_timer: Cell::new(None),
			animate: RefCell::new(None),
			on_resize: RefCell::new(None),
			remeasure: RefCell::new(None),
		});

		if let Err(err) = runtime.start(remeasure_delay_ms) {
			runtime.teardown();
			return Err(err);
		}

		info!(
			"site-bg: started on {}x{} surface with {stars} stars, {sparks} sparks",
			size.width, size.height
		);
		Ok(Self { runtime })
	}
}

/// Start the site background with the shipped settings.
///
/// Never fails loudly: when the page cannot host a 2D canvas the reason is logged
/// and `None` is returned, leaving the page without a background.
#[wasm_bindgen(js_name = initSiteBg)]
pub fn init_site_bg() -> Option<SiteBackground> {
	init_site_bg_with(BackgroundConfig::default(), Theme::default())
}

/// Start the site background with explicit settings.
pub fn init_site_bg_with(config: BackgroundConfig, theme: Theme) -> Option<SiteBackground> {
	match SiteBackground::mount(config, theme) {
		Ok(background) => Some(background),
		Err(err) => {
			warn!("site-bg: background disabled: {err}");
			None
		}
	}
}
