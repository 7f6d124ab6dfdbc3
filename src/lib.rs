//! firefly-show: a canvas of fireflies that flashes out light sequences.
//!
//! This crate provides a WASM app that turns a line of text into a light
//! sequence (via an HTTP endpoint) and plays it on a field of wandering,
//! glowing particles.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
pub mod error;

pub use components::light_show::{
	Bounds, Color, ControlBar, Delay, FetchSequenceSource, FireflyCanvas, FireflyField, FlashStyle,
	GlowCanvas, GlowStyle, LightSequence, Phase, Playback, PlaybackState, RadialGlow, SequencePlayer,
	SequenceSource, ShowConfig, SurfaceConfig, TimeoutDelay, outcome_message, request_show,
	resolve_color,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("firefly-show: logging initialized");
}

/// Load overrides from a script element with id="show-config".
/// Expected format: JSON matching [`ShowConfig`], any subset of keys.
fn load_show_config() -> Option<ShowConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("show-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<ShowConfig>(&json_text) {
		Ok(config) => {
			info!("firefly-show: loaded config, endpoint {}", config.endpoint);
			Some(config)
		}
		Err(e) => {
			warn!("firefly-show: failed to parse show config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Wires the shared firefly field to the canvas and to the sequence player.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_show_config().unwrap_or_default();
	let bounds = web_sys::window()
		.map(|w| config.surface.measure(&w))
		.unwrap_or_else(|| config.surface.fit(0.0, 0.0, None));

	let field = Rc::new(RefCell::new(FireflyField::new(config.glow.clone(), bounds)));
	let player = Rc::new(SequencePlayer::new(
		field.clone(),
		PlaybackState::default(),
		Rc::new(TimeoutDelay),
		config.flash.clone(),
	));
	let source = Rc::new(FetchSequenceSource::new(config.endpoint.clone()));

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Fireflies" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="firefly-show">
			<FireflyCanvas field=field surface=config.surface.clone() />
			<ControlBar player=player source=source messages=config.messages.clone() />
		</div>
	}
}
