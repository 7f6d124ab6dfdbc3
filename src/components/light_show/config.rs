//! Tunables for the whole show, loadable from JSON.

use serde::Deserialize;

use super::controls::MessageStyle;
use super::surface::SurfaceConfig;
use super::theme::{FlashStyle, GlowStyle};

/// Everything the page can override. Missing keys keep their defaults.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ShowConfig {
	/// Swarm size, motion and resting glow.
	pub glow: GlowStyle,
	/// Alpha levels while flashing.
	pub flash: FlashStyle,
	/// Canvas sizing.
	pub surface: SurfaceConfig,
	/// Message box timing.
	pub messages: MessageStyle,
	/// URL the user's text is posted to.
	pub endpoint: String,
}

impl Default for ShowConfig {
	fn default() -> Self {
		Self {
			glow: GlowStyle::default(),
			flash: FlashStyle::default(),
			surface: SurfaceConfig::default(),
			messages: MessageStyle::default(),
			endpoint: "/generateSequence".to_string(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_object_is_all_defaults() {
		let config: ShowConfig = serde_json::from_str("{}").unwrap();
		assert_eq!(config.endpoint, "/generateSequence");
		assert_eq!(config.glow.count, 50);
		assert_eq!(config.flash.off_alpha, 0.2);
		assert_eq!(config.surface.min_size, 100.0);
		assert_eq!(config.messages.dismiss_ms, 3000);
	}

	#[test]
	fn nested_overrides_keep_sibling_defaults() {
		let config: ShowConfig = serde_json::from_str(
			r#"{"endpoint": "/api/lights", "glow": {"count": 80}, "flash": {"off_alpha": 0.1}}"#,
		)
		.unwrap();
		assert_eq!(config.endpoint, "/api/lights");
		assert_eq!(config.glow.count, 80);
		assert_eq!(config.glow.base_alpha, 0.8);
		assert_eq!(config.flash.off_alpha, 0.1);
		assert_eq!(config.flash.on_alpha, 1.0);
	}
}
