//! Where light sequences come from.
//!
//! The sequence generator lives behind an HTTP endpoint; this side only posts
//! the user's text and validates what comes back.

use std::future::Future;

use log::warn;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use super::types::LightSequence;
use crate::error::{SourceError, js_error_message};

/// Turns free text into a validated light sequence.
pub trait SequenceSource {
	/// Produce a validated sequence for `text`.
	fn generate(&self, text: &str) -> impl Future<Output = Result<LightSequence, SourceError>>;
}

/// Posts `{"text": ...}` to an endpoint with `fetch` and validates the JSON reply.
#[derive(Clone, Debug)]
pub struct FetchSequenceSource {
	endpoint: String,
}

impl FetchSequenceSource {
	/// Post to `endpoint`, relative to the page or absolute.
	pub fn new(endpoint: impl Into<String>) -> Self {
		Self {
			endpoint: endpoint.into(),
		}
	}
}

fn transport(e: JsValue) -> SourceError {
	SourceError::Transport(js_error_message(&e))
}

impl SequenceSource for FetchSequenceSource {
	fn generate(&self, text: &str) -> impl Future<Output = Result<LightSequence, SourceError>> {
		let endpoint = self.endpoint.clone();
		let body = serde_json::json!({ "text": text }).to_string();

		async move {
			let window =
				web_sys::window().ok_or_else(|| SourceError::Transport("no window".to_string()))?;

			let init = RequestInit::new();
			init.set_method("POST");
			init.set_body(&JsValue::from_str(&body));
			let request = Request::new_with_str_and_init(&endpoint, &init).map_err(transport)?;
			request
				.headers()
				.set("Content-Type", "application/json")
				.map_err(transport)?;

			let response: Response = JsFuture::from(window.fetch_with_request(&request))
				.await
				.map_err(transport)?
				.dyn_into()
				.map_err(transport)?;
			if !response.ok() {
				warn!(
					"firefly-show: {} answered with status {}",
					endpoint,
					response.status()
				);
				return Err(SourceError::Status(response.status()));
			}

			let text = JsFuture::from(response.text().map_err(transport)?)
				.await
				.map_err(transport)?
				.as_string()
				.unwrap_or_default();

			Ok(LightSequence::from_json(&text)?)
		}
	}
}
