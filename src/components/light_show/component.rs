//! Leptos component wrapping the firefly canvas.
//!
//! The component sizes the canvas to the space left above the control bar and
//! keeps it fitted on window resize. An animation loop runs via
//! `requestAnimationFrame`, ticking the shared field once per frame.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::particles::FireflyField;
use super::surface::SurfaceConfig;

/// Renders the firefly field on a canvas element.
///
/// The field is shared: the sequence player writes color and alpha into it
/// while this component's frame loop moves and draws the fireflies.
#[component]
pub fn FireflyCanvas(field: Rc<RefCell<FireflyField>>, surface: SurfaceConfig) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let animate: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let ctx: CanvasRenderingContext2d = match canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into().ok())
		{
			Some(ctx) => ctx,
			None => {
				warn!("firefly-show: canvas has no 2d context");
				return;
			}
		};

		let fit = {
			let (field, canvas, surface) = (field.clone(), canvas.clone(), surface.clone());
			move |window: &Window| {
				let bounds = surface.measure(window);
				canvas.set_width(bounds.width as u32);
				canvas.set_height(bounds.height as u32);
				field.borrow_mut().on_resize(bounds);
			}
		};
		fit(&window);

		*resize_cb.borrow_mut() = Some(Closure::new(move || {
			if let Some(win) = web_sys::window() {
				fit(&win);
			}
		}));
		if let Some(ref cb) = *resize_cb.borrow() {
			for event in ["resize", "orientationchange"] {
				let _ = window.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref());
			}
		}

		let (field_anim, animate_inner) = (field.clone(), animate.clone());
		let mut last_frame: Option<f64> = None;
		*animate.borrow_mut() = Some(Closure::new(move |now: f64| {
			let elapsed = last_frame.map_or(0.0, |last| now - last);
			last_frame = Some(now);
			field_anim.borrow_mut().tick(elapsed, &ctx);

			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="firefly-canvas"
			style="display: block; margin: 0 auto;"
		/>
	}
}
