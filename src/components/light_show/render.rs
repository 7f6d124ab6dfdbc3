//! Canvas drawing for the firefly field.
//!
//! The field only knows how to describe a frame as a series of radial glows;
//! [`GlowCanvas`] turns those into actual draw calls. The browser canvas is
//! the production implementation.

use std::f64::consts::PI;

use log::warn;
use web_sys::CanvasRenderingContext2d;

use super::surface::Bounds;
use super::theme::Color;

/// One color stop of a radial gradient.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowStop {
	/// Position along the gradient, 0.0 at the inner circle and 1.0 at the outer one.
	pub offset: f64,
	pub color: Color,
}

/// A disc filled with a radial gradient fading outwards.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGlow {
	pub x: f64,
	pub y: f64,
	pub inner_radius: f64,
	pub outer_radius: f64,
	pub stops: [GlowStop; 3],
}

/// Something the field can draw a frame onto.
pub trait GlowCanvas {
	/// Wipe the whole drawable area.
	fn clear(&self, bounds: Bounds);

	/// Fill a glow disc.
	fn radial_glow(&self, glow: &RadialGlow);
}

impl GlowCanvas for CanvasRenderingContext2d {
	fn clear(&self, bounds: Bounds) {
		self.clear_rect(0.0, 0.0, bounds.width, bounds.height);
	}

	fn radial_glow(&self, glow: &RadialGlow) {
		let gradient = match self.create_radial_gradient(
			glow.x,
			glow.y,
			glow.inner_radius,
			glow.x,
			glow.y,
			glow.outer_radius,
		) {
			Ok(gradient) => gradient,
			Err(e) => {
				warn!("firefly-show: failed to create glow gradient: {:?}", e);
				return;
			}
		};

		for stop in &glow.stops {
			let _ = gradient.add_color_stop(stop.offset as f32, &stop.color.to_css());
		}

		self.begin_path();
		let _ = self.arc(glow.x, glow.y, glow.outer_radius, 0.0, PI * 2.0);
		#[allow(deprecated)]
		self.set_fill_style(&gradient);
		self.fill();
	}
}
