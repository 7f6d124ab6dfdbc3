//! Colors, the named light palette and the glow/flash styles.

use log::info;
use serde::Deserialize;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	#[serde(default = "opaque")]
	pub a: f64,
}

fn opaque() -> f64 {
	1.0
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// RGB triple, ignoring alpha.
	pub fn rgb_triple(self) -> (u8, u8, u8) {
		(self.r, self.g, self.b)
	}

	/// CSS `rgba(...)` form.
	pub fn to_css(self) -> String {
		format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

/// Warm yellow glow used whenever no sequence is playing, and for unknown color names.
pub const DEFAULT_GLOW: Color = Color::rgb(255, 255, 150);

/// The named colors a light sequence may ask for.
const PALETTE: [(&str, Color); 8] = [
	("red", Color::rgb(255, 0, 0)),
	("green", Color::rgb(0, 255, 0)),
	("blue", Color::rgb(0, 0, 255)),
	("yellow", Color::rgb(255, 255, 0)),
	("pink", Color::rgb(255, 192, 203)),
	("purple", Color::rgb(128, 0, 128)),
	("orange", Color::rgb(255, 165, 0)),
	("white", Color::rgb(255, 255, 255)),
];

/// Resolve a color name from a sequence phase (case-insensitive).
///
/// Unknown names are not an error: they fall back to [`DEFAULT_GLOW`].
pub fn resolve_color(token: &str) -> Color {
	let name = token.trim().to_lowercase();
	match PALETTE.iter().find(|(known, _)| *known == name) {
		Some((_, color)) => *color,
		None => {
			info!("firefly-show: unknown light colour {token:?}, using default glow");
			DEFAULT_GLOW
		}
	}
}

/// Look and motion of the fireflies.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GlowStyle {
	/// Number of fireflies in the field
	pub count: usize,
	/// Minimum core radius
	pub radius_min: f64,
	/// Maximum core radius
	pub radius_max: f64,
	/// Lower bound of the speed band (pixels per frame)
	pub speed_min: f64,
	/// Upper bound of the speed band (pixels per frame)
	pub speed_max: f64,
	/// Half-width of the per-frame velocity perturbation
	pub jitter: f64,
	/// Glow radius as a multiple of the core radius
	pub glow_factor: f64,
	/// Resting alpha
	pub base_alpha: f64,
	/// Resting color
	pub color: Color,
}

impl GlowStyle {
	/// Radius of the visible glow for a firefly of the given core radius.
	pub fn glow_radius(&self, radius: f64) -> f64 {
		radius * self.glow_factor
	}
}

impl Default for GlowStyle {
	fn default() -> Self {
		Self {
			count: 50,
			radius_min: 1.0,
			radius_max: 2.5,
			speed_min: 0.1,
			speed_max: 0.6,
			jitter: 0.05,
			glow_factor: 10.0,
			base_alpha: 0.8,
			color: DEFAULT_GLOW,
		}
	}
}

/// Alpha levels used while a phase flashes.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct FlashStyle {
	/// Intensity while a flash is on.
	pub on_alpha: f64,
	/// Kept above zero so the swarm stays faintly visible between flashes.
	pub off_alpha: f64,
}

impl Default for FlashStyle {
	fn default() -> Self {
		Self {
			on_alpha: 1.0,
			off_alpha: 0.2,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn resolves_names_case_insensitively() {
		assert_eq!(resolve_color("PINK").rgb_triple(), (255, 192, 203));
		assert_eq!(resolve_color("Green").rgb_triple(), (0, 255, 0));
		assert_eq!(resolve_color("purple").rgb_triple(), (128, 0, 128));
		assert_eq!(resolve_color(" Orange ").rgb_triple(), (255, 165, 0));
	}

	#[test]
	fn unknown_names_fall_back_to_default_glow() {
		assert_eq!(resolve_color("chartreuse").rgb_triple(), (255, 255, 150));
		assert_eq!(resolve_color("").rgb_triple(), (255, 255, 150));
	}

	#[test]
	fn css_output_carries_alpha() {
		assert_eq!(
			Color::rgb(0, 255, 0).with_alpha(0.5).to_css(),
			"rgba(0, 255, 0, 0.5)"
		);
	}

	#[test]
	fn style_parses_partial_json() {
		let style: GlowStyle = serde_json::from_str(r#"{"count": 12, "color": {"r": 1, "g": 2, "b": 3}}"#).unwrap();
		assert_eq!(style.count, 12);
		assert_eq!(style.color, Color::rgb(1, 2, 3));
		assert_eq!(style.glow_factor, 10.0);
	}
}
