//! Text input, send button and the transient message box.

use std::rc::Rc;
use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, info, warn};
use serde::Deserialize;
use web_sys::KeyboardEvent;

use super::player::{Delay, Playback, SequencePlayer};
use super::source::SequenceSource;
use crate::error::ShowError;

/// Timing of the message box.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct MessageStyle {
	/// How long a message stays up before fading out.
	pub dismiss_ms: u64,
	/// Length of the fade-out.
	pub fade_ms: u64,
}

impl Default for MessageStyle {
	fn default() -> Self {
		Self {
			dismiss_ms: 3000,
			fade_ms: 300,
		}
	}
}

/// Fetch a sequence for `text` and play it to the end.
///
/// Validation happens inside the source, so an invalid reply never reaches
/// the player and leaves the field untouched.
pub async fn request_show<S, D>(
	text: &str,
	source: &S,
	player: &SequencePlayer<D>,
) -> Result<Playback, ShowError>
where
	S: SequenceSource,
	D: Delay + 'static,
{
	let sequence = source.generate(text).await.inspect_err(|e| {
		warn!("firefly-show: failed to get a sequence: {}", e);
	})?;
	info!(
		"firefly-show: got {} phases, {} flashes",
		sequence.phases.len(),
		sequence.flash_count()
	);
	if let Ok(json) = serde_json::to_string(&sequence) {
		debug!("firefly-show: sequence {}", json);
	}

	Ok(player.play(sequence).await?)
}

/// Text shown to the user once a request has finished.
pub fn outcome_message(result: &Result<Playback, ShowError>) -> String {
	match result {
		Ok(_) => "Sequence completed!".to_string(),
		Err(e) => format!("Error: {}", e),
	}
}

/// Something worth telling the user in the message box.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Notice {
	EmptyInput,
	Generating,
	Outcome(String),
}

impl Notice {
	fn text(&self) -> String {
		match self {
			Notice::EmptyInput => "Please enter some text.".to_string(),
			Notice::Generating => "Generating sequence...".to_string(),
			Notice::Outcome(text) => text.clone(),
		}
	}

	/// Progress notices stay up until something replaces them.
	fn auto_dismiss(&self) -> bool {
		!matches!(self, Notice::Generating)
	}
}

/// What pressing send does with the current input.
#[derive(Clone, Debug, PartialEq, Eq)]
enum SendAction {
	/// Nothing to send; ask for text.
	Prompt,
	/// A request is already running.
	Wait,
	/// Fetch and play a sequence for this text.
	Request(String),
}

/// Input text and the busy flag behind the send button.
#[derive(Clone, Debug, Default, PartialEq)]
struct ComposerState {
	input: String,
	busy: bool,
}

impl ComposerState {
	/// Decide what a send does, marking the composer busy when a request starts.
	fn begin_send(&mut self) -> SendAction {
		let text = self.input.trim();
		if text.is_empty() {
			return SendAction::Prompt;
		}
		if self.busy {
			return SendAction::Wait;
		}
		self.busy = true;
		SendAction::Request(text.to_string())
	}

	/// A request finished, whatever its outcome.
	fn finish_send(&mut self) {
		self.busy = false;
		self.input.clear();
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Visibility {
	Shown,
	Fading,
	#[default]
	Hidden,
}

/// Message box contents. Every message bumps the generation, and timers only
/// act on the generation they were started for.
#[derive(Clone, Debug, Default, PartialEq)]
struct MessageBox {
	text: String,
	visibility: Visibility,
	generation: u64,
}

impl MessageBox {
	/// Show `text` and return the generation its timers must carry.
	fn show(&mut self, text: String) -> u64 {
		self.generation += 1;
		self.text = text;
		self.visibility = Visibility::Shown;
		self.generation
	}

	/// Start fading out, unless a newer message took over.
	fn begin_fade(&mut self, generation: u64) -> bool {
		if generation != self.generation || self.visibility != Visibility::Shown {
			return false;
		}
		self.visibility = Visibility::Fading;
		true
	}

	/// Take the faded box out of the layout.
	fn finish_fade(&mut self, generation: u64) -> bool {
		if generation != self.generation || self.visibility != Visibility::Fading {
			return false;
		}
		self.visibility = Visibility::Hidden;
		true
	}

	fn opacity(&self) -> &'static str {
		match self.visibility {
			Visibility::Shown => "1",
			Visibility::Fading | Visibility::Hidden => "0",
		}
	}

	fn display(&self) -> &'static str {
		match self.visibility {
			Visibility::Hidden => "none",
			Visibility::Shown | Visibility::Fading => "block",
		}
	}
}

/// Reactive handle on a [`MessageBox`] that runs its dismiss timers.
#[derive(Clone, Copy)]
struct Toast {
	state: RwSignal<MessageBox>,
	dismiss: Duration,
	fade: Duration,
}

impl Toast {
	fn new(style: &MessageStyle) -> Self {
		Self {
			state: RwSignal::new(MessageBox::default()),
			dismiss: Duration::from_millis(style.dismiss_ms),
			fade: Duration::from_millis(style.fade_ms),
		}
	}

	fn notify(&self, notice: Notice) {
		let mut generation = 0;
		self.state.update(|m| generation = m.show(notice.text()));
		if !notice.auto_dismiss() {
			return;
		}

		let toast = *self;
		set_timeout(
			move || {
				let mut fading = false;
				toast.state.update(|m| fading = m.begin_fade(generation));
				if fading {
					set_timeout(
						move || {
							toast.state.update(|m| {
								m.finish_fade(generation);
							})
						},
						toast.fade,
					);
				}
			},
			self.dismiss,
		);
	}
}

/// Control bar: text input plus send button, with the message box above it.
#[component]
pub fn ControlBar<S: SequenceSource + 'static, D: Delay + 'static>(
	player: Rc<SequencePlayer<D>>,
	source: Rc<S>,
	messages: MessageStyle,
) -> impl IntoView {
	let composer = RwSignal::new(ComposerState::default());
	let toast = Toast::new(&messages);
	let fade = format!("opacity {}ms ease", messages.fade_ms);

	let send = Rc::new(move || {
		let mut action = SendAction::Wait;
		composer.update(|c| action = c.begin_send());

		let text = match action {
			SendAction::Prompt => {
				toast.notify(Notice::EmptyInput);
				return;
			}
			SendAction::Wait => return,
			SendAction::Request(text) => text,
		};

		toast.notify(Notice::Generating);
		let (player, source) = (player.clone(), source.clone());
		spawn_local(async move {
			let result = request_show(&text, source.as_ref(), &player).await;
			toast.notify(Notice::Outcome(outcome_message(&result)));
			composer.update(ComposerState::finish_send);
		});
	});

	let send_click = send.clone();
	let on_keydown = move |ev: KeyboardEvent| {
		if ev.key() == "Enter" {
			send();
		}
	};

	view! {
		<div
			class="message-box"
			style:opacity=move || toast.state.with(MessageBox::opacity)
			style:display=move || toast.state.with(MessageBox::display)
			style:transition=fade
		>
			{move || toast.state.with(|m| m.text.clone())}
		</div>
		<div class="input-container">
			<input
				type="text"
				placeholder="Describe a feeling, a moment, a mood..."
				prop:value=move || composer.with(|c| c.input.clone())
				on:input=move |ev| {
					let value = event_target_value(&ev);
					composer.update(|c| c.input = value);
				}
				on:keydown=on_keydown
			/>
			<button disabled=move || composer.with(|c| c.busy) on:click=move |_| send_click()>
				"Send"
			</button>
		</div>
	}
}
