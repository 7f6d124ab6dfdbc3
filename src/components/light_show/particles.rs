//! Wandering fireflies and the field that owns them.

use std::f64::consts::TAU;

use fastrand::Rng;
use log::{debug, info};

use super::render::{GlowCanvas, GlowStop, RadialGlow};
use super::surface::Bounds;
use super::theme::{Color, GlowStyle};

/// A single glowing firefly.
#[derive(Clone, Debug)]
pub struct Firefly {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	radius: f64,
	alpha: f64,
	pub color: Color,
}

fn uniform(rng: &mut Rng, min: f64, max: f64) -> f64 {
	min + rng.f64() * (max - min)
}

impl Firefly {
	/// Spawn a firefly somewhere inside `bounds`, heading in a random direction.
	pub fn new(bounds: Bounds, style: &GlowStyle, rng: &mut Rng) -> Self {
		let angle = uniform(rng, 0.0, TAU);
		let speed = uniform(rng, style.speed_min, style.speed_max);

		Self {
			x: uniform(rng, 0.0, bounds.width),
			y: uniform(rng, 0.0, bounds.height),
			vx: angle.cos() * speed,
			vy: angle.sin() * speed,
			radius: uniform(rng, style.radius_min, style.radius_max),
			alpha: style.base_alpha.clamp(0.0, 1.0),
			color: style.color,
		}
	}

	/// Core radius before the glow is applied.
	pub fn radius(&self) -> f64 {
		self.radius
	}

	/// Current intensity in `[0, 1]`.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// Magnitude of the velocity.
	pub fn speed(&self) -> f64 {
		(self.vx * self.vx + self.vy * self.vy).sqrt()
	}

	/// Set the glow color.
	pub fn set_color(&mut self, color: Color) {
		self.color = color;
	}

	/// Set the intensity, clamped to `[0, 1]`.
	pub fn set_alpha(&mut self, alpha: f64) {
		self.alpha = alpha.clamp(0.0, 1.0);
	}

	/// Advance one frame.
	///
	/// The wander step is per frame, not per unit of time: the jitter and the
	/// position update ignore how long the frame took.
	pub fn advance(&mut self, bounds: Bounds, style: &GlowStyle, rng: &mut Rng) {
		self.vx += uniform(rng, -style.jitter, style.jitter);
		self.vy += uniform(rng, -style.jitter, style.jitter);
		self.constrain_speed(style, rng);

		self.x += self.vx;
		self.y += self.vy;
		self.wrap(bounds, style.glow_radius(self.radius));
	}

	fn constrain_speed(&mut self, style: &GlowStyle, rng: &mut Rng) {
		let speed = self.speed();
		let target = if speed > style.speed_max {
			style.speed_max
		} else if speed < style.speed_min && speed > 0.0 {
			style.speed_min
		} else if speed == 0.0 {
			// A stalled firefly gets a fresh heading instead of sitting still.
			let angle = uniform(rng, 0.0, TAU);
			self.vx = angle.cos() * style.speed_min;
			self.vy = angle.sin() * style.speed_min;
			return;
		} else {
			return;
		};

		self.vx = self.vx / speed * target;
		self.vy = self.vy / speed * target;
	}

	/// Teleport to the opposite edge once the whole glow has left the area.
	fn wrap(&mut self, bounds: Bounds, offset: f64) {
		if self.x < -offset {
			self.x = bounds.width + offset;
		} else if self.x > bounds.width + offset {
			self.x = -offset;
		}
		if self.y < -offset {
			self.y = bounds.height + offset;
		} else if self.y > bounds.height + offset {
			self.y = -offset;
		}
	}

	/// The glow this firefly currently shows.
	pub fn glow(&self, style: &GlowStyle) -> RadialGlow {
		RadialGlow {
			x: self.x,
			y: self.y,
			inner_radius: self.radius * 0.5,
			outer_radius: style.glow_radius(self.radius),
			stops: [
				GlowStop {
					offset: 0.0,
					color: self.color.with_alpha(self.alpha),
				},
				GlowStop {
					offset: 0.3,
					color: self.color.with_alpha(self.alpha * 0.5),
				},
				GlowStop {
					offset: 1.0,
					color: self.color.with_alpha(0.0),
				},
			],
		}
	}

	/// Draw this firefly's glow.
	pub fn render(&self, canvas: &impl GlowCanvas, style: &GlowStyle) {
		canvas.radial_glow(&self.glow(style));
	}
}

/// Owns every firefly on screen.
///
/// Motion is written only by [`FireflyField::tick`]; color and alpha are
/// written only through the broadcast setters, which the sequence player uses.
pub struct FireflyField {
	fireflies: Vec<Firefly>,
	bounds: Bounds,
	style: GlowStyle,
	rng: Rng,
	/// Interval of the most recent frame, in milliseconds.
	frame_interval_ms: f64,
}

impl FireflyField {
	/// Build a field of `style.count` fireflies with an entropy-seeded random source.
	pub fn new(style: GlowStyle, bounds: Bounds) -> Self {
		Self::with_rng(style, bounds, Rng::new())
	}

	/// Build a field driven by a specific random source.
	pub fn with_rng(style: GlowStyle, bounds: Bounds, rng: Rng) -> Self {
		let mut field = Self {
			fireflies: Vec::new(),
			bounds,
			style,
			rng,
			frame_interval_ms: 0.0,
		};
		field.initialize(field.style.count);
		field
	}

	/// Throw away every firefly and spawn `count` new ones.
	pub fn initialize(&mut self, count: usize) {
		let (bounds, style) = (self.bounds, &self.style);
		let rng = &mut self.rng;
		self.fireflies = (0..count).map(|_| Firefly::new(bounds, style, rng)).collect();
		info!(
			"firefly-show: seeded {} fireflies in {}x{}",
			count, bounds.width, bounds.height
		);
	}

	/// Adopt new bounds, keeping existing fireflies where possible.
	pub fn on_resize(&mut self, bounds: Bounds) {
		debug!("firefly-show: resize to {}x{}", bounds.width, bounds.height);
		self.bounds = bounds;

		if self.fireflies.is_empty() {
			self.initialize(self.style.count);
			return;
		}
		for f in &mut self.fireflies {
			(f.x, f.y) = bounds.clamp(f.x, f.y);
		}
	}

	/// Advance and draw one frame.
	pub fn tick(&mut self, elapsed_ms: f64, canvas: &impl GlowCanvas) {
		self.frame_interval_ms = elapsed_ms;
		canvas.clear(self.bounds);

		for f in &mut self.fireflies {
			f.advance(self.bounds, &self.style, &mut self.rng);
			f.render(canvas, &self.style);
		}
	}

	/// Recolor every firefly.
	pub fn set_all_color(&mut self, color: Color) {
		for f in &mut self.fireflies {
			f.set_color(color);
		}
	}

	/// Set every firefly's intensity, clamped to `[0, 1]`.
	pub fn set_all_alpha(&mut self, alpha: f64) {
		for f in &mut self.fireflies {
			f.set_alpha(alpha);
		}
	}

	/// Return every firefly to its resting color and intensity.
	pub fn reset_glow(&mut self) {
		let (color, alpha) = (self.style.color, self.style.base_alpha);
		self.set_all_color(color);
		self.set_all_alpha(alpha);
	}

	/// Fireflies in spawn order.
	pub fn fireflies(&self) -> &[Firefly] {
		&self.fireflies
	}

	/// Current drawing area.
	pub fn bounds(&self) -> Bounds {
		self.bounds
	}

	/// Resting glow style.
	pub fn style(&self) -> &GlowStyle {
		&self.style
	}

	/// Interval of the most recent frame, in milliseconds.
	pub fn frame_interval_ms(&self) -> f64 {
		self.frame_interval_ms
	}
}

#[cfg(test)]
mod tests {
	use super::super::render::recording::{DrawCall, RecordingCanvas};
	use super::super::theme::DEFAULT_GLOW;
	use super::*;

	const EPS: f64 = 1e-9;

	fn field(count: usize) -> FireflyField {
		let style = GlowStyle {
			count,
			..GlowStyle::default()
		};
		FireflyField::with_rng(style, Bounds::new(400.0, 300.0), Rng::with_seed(7))
	}

	#[test]
	fn spawns_inside_bounds_with_resting_glow() {
		let field = field(50);
		let style = field.style().clone();

		assert_eq!(field.fireflies().len(), 50);
		for f in field.fireflies() {
			assert!((0.0..=400.0).contains(&f.x) && (0.0..=300.0).contains(&f.y));
			assert!(f.radius() >= style.radius_min && f.radius() <= style.radius_max);
			assert!(f.speed() >= style.speed_min - EPS && f.speed() <= style.speed_max + EPS);
			assert_eq!(f.alpha(), 0.8);
			assert_eq!(f.color, DEFAULT_GLOW);
		}
	}

	#[test]
	fn speed_stays_in_band() {
		let mut field = field(50);
		let canvas = RecordingCanvas::default();
		let style = field.style().clone();

		for _ in 0..500 {
			field.tick(16.0, &canvas);
			for f in field.fireflies() {
				let speed = f.speed();
				assert!(speed >= style.speed_min - EPS, "too slow: {speed}");
				assert!(speed <= style.speed_max + EPS, "too fast: {speed}");
			}
		}
	}

	#[test]
	fn stalled_firefly_is_reseeded_at_min_speed() {
		let style = GlowStyle {
			jitter: 0.0,
			..GlowStyle::default()
		};
		let mut rng = Rng::with_seed(3);
		let mut f = Firefly::new(Bounds::new(100.0, 100.0), &style, &mut rng);
		(f.vx, f.vy) = (0.0, 0.0);

		f.advance(Bounds::new(100.0, 100.0), &style, &mut rng);
		assert!((f.speed() - style.speed_min).abs() < EPS);
	}

	#[test]
	fn slow_firefly_is_pushed_up_to_min_speed() {
		let style = GlowStyle {
			jitter: 0.0,
			..GlowStyle::default()
		};
		let mut rng = Rng::with_seed(3);
		let mut f = Firefly::new(Bounds::new(100.0, 100.0), &style, &mut rng);
		(f.vx, f.vy) = (0.03, -0.04);

		f.advance(Bounds::new(100.0, 100.0), &style, &mut rng);
		assert!((f.speed() - style.speed_min).abs() < EPS);
		// Direction is kept.
		assert!((f.vx - 0.06).abs() < EPS && (f.vy + 0.08).abs() < EPS);
	}

	#[test]
	fn wraps_to_opposite_edge_past_the_glow_footprint() {
		let style = GlowStyle {
			jitter: 0.0,
			..GlowStyle::default()
		};
		let bounds = Bounds::new(200.0, 100.0);
		let mut rng = Rng::with_seed(11);
		let mut f = Firefly::new(bounds, &style, &mut rng);
		let offset = f.radius() * style.glow_factor;

		(f.x, f.y, f.vx, f.vy) = (bounds.width + offset - 0.1, 50.0, 0.5, 0.0);
		f.advance(bounds, &style, &mut rng);
		assert_eq!(f.x, -offset);
		assert_eq!(f.y, 50.0);
		assert_eq!((f.vx, f.vy), (0.5, 0.0));

		(f.x, f.y, f.vx, f.vy) = (50.0, -offset + 0.1, 0.0, -0.5);
		f.advance(bounds, &style, &mut rng);
		assert_eq!(f.y, bounds.height + offset);
	}

	#[test]
	fn does_not_wrap_while_glow_is_still_visible() {
		let style = GlowStyle {
			jitter: 0.0,
			..GlowStyle::default()
		};
		let bounds = Bounds::new(200.0, 100.0);
		let mut rng = Rng::with_seed(11);
		let mut f = Firefly::new(bounds, &style, &mut rng);

		(f.x, f.y, f.vx, f.vy) = (bounds.width + 1.0, 50.0, 0.5, 0.0);
		f.advance(bounds, &style, &mut rng);
		assert_eq!(f.x, bounds.width + 1.5);
	}

	#[test]
	fn glow_has_three_fading_stops() {
		let field = field(1);
		let f = &field.fireflies()[0];
		let glow = f.glow(field.style());

		assert_eq!(glow.inner_radius, f.radius() * 0.5);
		assert_eq!(glow.outer_radius, f.radius() * 10.0);
		let offsets: Vec<f64> = glow.stops.iter().map(|s| s.offset).collect();
		assert_eq!(offsets, vec![0.0, 0.3, 1.0]);
		assert_eq!(glow.stops[0].color.a, 0.8);
		assert_eq!(glow.stops[1].color.a, 0.4);
		assert_eq!(glow.stops[2].color.a, 0.0);
	}

	#[test]
	fn tick_clears_then_draws_every_firefly() {
		let mut field = field(5);
		let canvas = RecordingCanvas::default();
		field.tick(20.0, &canvas);

		let calls = canvas.calls.borrow();
		assert_eq!(calls.len(), 6);
		assert_eq!(calls[0], DrawCall::Clear(Bounds::new(400.0, 300.0)));
		assert_eq!(canvas.glows().len(), 5);
		assert_eq!(field.frame_interval_ms(), 20.0);
	}

	#[test]
	fn resize_clamps_without_reseeding() {
		let mut field = field(20);
		let before: Vec<(f64, f64, f64)> =
			field.fireflies().iter().map(|f| (f.vx, f.vy, f.radius())).collect();

		field.on_resize(Bounds::new(50.0, 40.0));

		assert_eq!(field.fireflies().len(), 20);
		for (f, (vx, vy, r)) in field.fireflies().iter().zip(before) {
			assert!(f.x <= 50.0 && f.y <= 40.0);
			assert_eq!((f.vx, f.vy, f.radius()), (vx, vy, r));
		}
	}

	#[test]
	fn resize_of_empty_field_seeds_it() {
		let mut field = field(0);
		field.style.count = 8;
		field.on_resize(Bounds::new(120.0, 90.0));

		assert_eq!(field.fireflies().len(), 8);
		assert!(field.fireflies().iter().all(|f| f.x <= 120.0 && f.y <= 90.0));
	}

	#[test]
	fn broadcasts_reach_every_firefly() {
		let mut field = field(10);
		field.set_all_color(Color::rgb(0, 0, 255));
		field.set_all_alpha(1.7);
		assert!(
			field
				.fireflies()
				.iter()
				.all(|f| f.color == Color::rgb(0, 0, 255) && f.alpha() == 1.0)
		);

		field.reset_glow();
		assert!(
			field
				.fireflies()
				.iter()
				.all(|f| f.color == DEFAULT_GLOW && f.alpha() == 0.8)
		);
	}
}
