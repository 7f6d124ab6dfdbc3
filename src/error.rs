//! Error types for sequence validation, fetching and playback.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// A light sequence that failed validation.
#[derive(Debug, Error)]
pub enum SequenceError {
	#[error("Invalid response type from API")]
	NotAnObject,
	#[error("Invalid response from API")]
	MissingInstructions,
	#[error("Invalid instruction format")]
	InvalidInstruction { index: usize },
	#[error("Error parsing light sequence: {0}")]
	Json(#[from] serde_json::Error),
}

/// Failure to obtain a sequence from the sequence source.
#[derive(Debug, Error)]
pub enum SourceError {
	#[error("HTTP error! status: {0}")]
	Status(u16),
	#[error("{0}")]
	Transport(String),
	#[error(transparent)]
	Sequence(#[from] SequenceError),
}

/// Failure while a sequence is playing.
#[derive(Debug, Error)]
pub enum PlaybackError {
	#[error("timer failed: {0}")]
	Timer(String),
}

/// Anything that can end a show request early.
#[derive(Debug, Error)]
pub enum ShowError {
	#[error(transparent)]
	Source(#[from] SourceError),
	#[error(transparent)]
	Playback(#[from] PlaybackError),
}

/// Render a JS exception as text, preferring its `message` when it has one.
pub(crate) fn js_error_message(value: &JsValue) -> String {
	value
		.as_string()
		.or_else(|| {
			js_sys::Reflect::get(value, &JsValue::from_str("message"))
				.ok()
				.and_then(|m| m.as_string())
		})
		.unwrap_or_else(|| format!("{:?}", value))
}
