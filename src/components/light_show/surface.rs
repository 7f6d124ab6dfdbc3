//! Drawable-area sizing.
//!
//! The canvas takes most of the window but leaves room for the control bar
//! underneath it. Both dimensions have a floor so the field never collapses
//! on tiny or oddly shaped windows.

use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, Window};

/// Size of the drawable area in canvas pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
	pub width: f64,
	pub height: f64,
}

impl Bounds {
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// Clamp a point into `[0, width] x [0, height]`.
	pub fn clamp(&self, x: f64, y: f64) -> (f64, f64) {
		(x.clamp(0.0, self.width), y.clamp(0.0, self.height))
	}
}

/// Layout rules for fitting the canvas into the window.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
	/// Share of the window width given to the canvas.
	pub width_fraction: f64,
	/// Upper bound on the canvas height as a share of the window height.
	pub height_fraction: f64,
	/// Vertical margin as a share of the window height.
	pub margin_fraction: f64,
	/// Smallest allowed width and height.
	pub min_size: f64,
	/// Height assumed for the control bar when it is not in the document.
	pub control_bar_fallback: f64,
	/// CSS selector of the control bar element.
	pub control_bar_selector: String,
}

impl Default for SurfaceConfig {
	fn default() -> Self {
		Self {
			width_fraction: 0.9,
			height_fraction: 0.8,
			margin_fraction: 0.04,
			min_size: 100.0,
			control_bar_fallback: 100.0,
			control_bar_selector: ".input-container".to_string(),
		}
	}
}

impl SurfaceConfig {
	/// Compute the drawable area for a window of the given size.
	///
	/// `control_bar` is the measured height of the control bar, if present.
	pub fn fit(&self, window_width: f64, window_height: f64, control_bar: Option<f64>) -> Bounds {
		let bar = control_bar.unwrap_or(self.control_bar_fallback);
		let available = window_height - bar - window_height * self.margin_fraction;
		let height = (window_height * self.height_fraction).min(available);
		let width = window_width * self.width_fraction;

		Bounds {
			width: width.max(self.min_size).floor(),
			height: height.max(self.min_size).floor(),
		}
	}

	/// Measure the window and control bar and fit the drawable area to them.
	pub fn measure(&self, window: &Window) -> Bounds {
		let inner = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
			v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
		};
		let (w, h) = (inner(window.inner_width()), inner(window.inner_height()));
		let bar = window
			.document()
			.and_then(|doc| doc.query_selector(&self.control_bar_selector).ok().flatten())
			.and_then(|el| el.dyn_into::<HtmlElement>().ok())
			.map(|el| el.offset_height() as f64);

		self.fit(w, h, bar)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn fits_below_the_control_bar() {
		let config = SurfaceConfig::default();
		// 1000 - 120 - 40 = 840 is above the 80% cap.
		assert_eq!(config.fit(1200.0, 1000.0, Some(120.0)), Bounds::new(1080.0, 800.0));
		// 1000 - 300 - 40 = 660 is below it.
		assert_eq!(config.fit(1200.0, 1000.0, Some(300.0)), Bounds::new(1080.0, 660.0));
	}

	#[test]
	fn missing_control_bar_uses_fallback_height() {
		let config = SurfaceConfig::default();
		assert_eq!(config.fit(1000.0, 500.0, None), Bounds::new(900.0, 380.0));
	}

	#[test]
	fn tiny_windows_hit_the_floor() {
		let config = SurfaceConfig::default();
		assert_eq!(config.fit(50.0, 80.0, Some(100.0)), Bounds::new(100.0, 100.0));
	}

	#[test]
	fn clamp_keeps_points_inside() {
		let bounds = Bounds::new(200.0, 100.0);
		assert_eq!(bounds.clamp(-5.0, 150.0), (0.0, 100.0));
		assert_eq!(bounds.clamp(50.0, 50.0), (50.0, 50.0));
	}
}
