//! Sequence playback.
//!
//! A [`SequencePlayer`] walks a [`LightSequence`] phase by phase, broadcasting
//! color and alpha to the shared [`FireflyField`] and waiting between flashes.
//! The render loop keeps moving the fireflies meanwhile; the player never
//! touches position or velocity and never holds the field across a wait.
//!
//! At most one playback runs at a time. The slot is claimed synchronously when
//! [`SequencePlayer::play`] is called, and released (with the glow reset) when
//! the playback future finishes, fails, or is dropped.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use log::{debug, info, warn};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

use super::particles::FireflyField;
use super::theme::{FlashStyle, resolve_color};
use super::types::LightSequence;
use crate::error::{PlaybackError, js_error_message};

/// Waits between flash steps.
pub trait Delay {
	/// Resolve after roughly `ms` milliseconds without blocking the event loop.
	fn sleep(&self, ms: u32) -> impl Future<Output = Result<(), PlaybackError>>;
}

/// Browser timer backed by `setTimeout`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimeoutDelay;

impl Delay for TimeoutDelay {
	fn sleep(&self, ms: u32) -> impl Future<Output = Result<(), PlaybackError>> {
		let timeout = i32::try_from(ms).unwrap_or(i32::MAX);
		let promise = js_sys::Promise::new(&mut |resolve, reject| {
			let scheduled = web_sys::window()
				.ok_or_else(|| JsValue::from_str("no window"))
				.and_then(|w| {
					w.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout)
				});
			if let Err(e) = scheduled {
				let _ = reject.call1(&JsValue::NULL, &e);
			}
		});

		async move {
			JsFuture::from(promise)
				.await
				.map(|_| ())
				.map_err(|e| PlaybackError::Timer(js_error_message(&e)))
		}
	}
}

/// Process-wide "a sequence is playing" flag.
#[derive(Clone, Debug, Default)]
pub struct PlaybackState(Rc<Cell<bool>>);

impl PlaybackState {
	/// Whether a playback currently holds the slot.
	pub fn is_playing(&self) -> bool {
		self.0.get()
	}
}

/// What became of a [`SequencePlayer::play`] request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Playback {
	/// Every phase ran; `flashes` on/off cycles were shown.
	Completed { flashes: u64 },
	/// Another sequence was already playing, so this one was dropped.
	Ignored,
}

/// Holds the playback slot. Dropping it restores the resting glow and frees the slot.
struct PlaybackGuard {
	state: PlaybackState,
	field: Rc<RefCell<FireflyField>>,
}

impl PlaybackGuard {
	fn acquire(state: &PlaybackState, field: &Rc<RefCell<FireflyField>>) -> Option<Self> {
		if state.0.replace(true) {
			return None;
		}
		Some(Self {
			state: state.clone(),
			field: field.clone(),
		})
	}
}

impl Drop for PlaybackGuard {
	fn drop(&mut self) {
		match self.field.try_borrow_mut() {
			Ok(mut field) => field.reset_glow(),
			Err(_) => warn!("firefly-show: field busy, glow not reset after playback"),
		}
		self.state.0.set(false);
	}
}

/// Plays light sequences onto a shared firefly field.
pub struct SequencePlayer<D> {
	field: Rc<RefCell<FireflyField>>,
	state: PlaybackState,
	delay: Rc<D>,
	flash: FlashStyle,
}

impl<D: Delay + 'static> SequencePlayer<D> {
	/// Build a player that flashes `field`, waiting with `delay`.
	pub fn new(
		field: Rc<RefCell<FireflyField>>,
		state: PlaybackState,
		delay: Rc<D>,
		flash: FlashStyle,
	) -> Self {
		Self {
			field,
			state,
			delay,
			flash,
		}
	}

	/// Shared playing flag.
	pub fn state(&self) -> &PlaybackState {
		&self.state
	}

	/// Start playing `sequence`.
	///
	/// The sequence must already be validated. If another playback holds the
	/// slot the returned future resolves to [`Playback::Ignored`] without
	/// touching the field.
	pub fn play(
		&self,
		sequence: LightSequence,
	) -> impl Future<Output = Result<Playback, PlaybackError>> + use<D> {
		let guard = PlaybackGuard::acquire(&self.state, &self.field);
		let (field, delay, flash) = (self.field.clone(), self.delay.clone(), self.flash.clone());

		async move {
			let Some(_guard) = guard else {
				debug!("firefly-show: sequence already playing, request dropped");
				return Ok(Playback::Ignored);
			};

			let mut flashes = 0;
			for phase in &sequence.phases {
				let color = resolve_color(&phase.color_token);
				field.borrow_mut().set_all_color(color);

				for _ in 0..phase.flash_count {
					field.borrow_mut().set_all_alpha(flash.on_alpha);
					delay.sleep(phase.duration_on_ms).await?;
					field.borrow_mut().set_all_alpha(flash.off_alpha);
					delay.sleep(phase.duration_off_ms).await?;
					flashes += 1;
				}
			}

			info!(
				"firefly-show: played {} phases, {} flashes",
				sequence.phases.len(),
				flashes
			);
			Ok(Playback::Completed { flashes })
		}
	}
}
