//! Light sequence data and its validation.
//!
//! A sequence arrives as JSON of the form
//! `{"instructions": [{"phase": 1, "flashes": 4, "durationOn": 300, "durationOff": 150, "lightColour": "Green"}]}`.
//! Every field of every phase must be present and truthy (no zeros, no empty
//! strings) or the whole sequence is rejected before anything lights up.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::SequenceError;

/// One block of a light sequence: a color flashed a number of times.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Phase {
	/// Informational ordinal; not required to be contiguous.
	#[serde(rename = "phase")]
	pub phase_index: u32,
	#[serde(rename = "flashes")]
	pub flash_count: u32,
	#[serde(rename = "durationOn")]
	pub duration_on_ms: u32,
	#[serde(rename = "durationOff")]
	pub duration_off_ms: u32,
	/// Palette color name.
	#[serde(rename = "lightColour")]
	pub color_token: String,
}

impl Phase {
	/// Time this phase spends waiting, in milliseconds.
	pub fn total_ms(&self) -> u64 {
		self.flash_count as u64 * (self.duration_on_ms as u64 + self.duration_off_ms as u64)
	}
}

/// A validated, ordered list of phases.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LightSequence {
	#[serde(rename = "instructions")]
	pub phases: Vec<Phase>,
}

impl LightSequence {
	/// Parse and validate a sequence from JSON text.
	pub fn from_json(text: &str) -> Result<Self, SequenceError> {
		let value: Value = serde_json::from_str(text)?;
		Self::from_value(&value)
	}

	/// Validate an already-parsed JSON value.
	pub fn from_value(value: &Value) -> Result<Self, SequenceError> {
		let object = value.as_object().ok_or(SequenceError::NotAnObject)?;
		let instructions = object
			.get("instructions")
			.and_then(Value::as_array)
			.ok_or(SequenceError::MissingInstructions)?;

		let phases = instructions
			.iter()
			.enumerate()
			.map(|(index, instruction)| {
				instruction
					.as_object()
					.and_then(parse_phase)
					.ok_or(SequenceError::InvalidInstruction { index })
			})
			.collect::<Result<Vec<_>, _>>()?;

		Ok(Self { phases })
	}

	/// Number of flashes across every phase.
	pub fn flash_count(&self) -> u64 {
		self.phases.iter().map(|p| p.flash_count as u64).sum()
	}

	/// Time the whole playback spends waiting, in milliseconds.
	pub fn total_ms(&self) -> u64 {
		self.phases.iter().map(Phase::total_ms).sum()
	}
}

fn parse_phase(fields: &Map<String, Value>) -> Option<Phase> {
	let color_token = fields.get("lightColour")?.as_str().filter(|s| !s.is_empty())?;

	Some(Phase {
		phase_index: positive(fields.get("phase")?)?,
		flash_count: positive(fields.get("flashes")?)?,
		duration_on_ms: positive(fields.get("durationOn")?)?,
		duration_off_ms: positive(fields.get("durationOff")?)?,
		color_token: color_token.to_string(),
	})
}

/// A strictly positive, finite number; fractional values round up.
fn positive(value: &Value) -> Option<u32> {
	let n = value.as_f64().filter(|n| n.is_finite() && *n > 0.0)?;
	u32::try_from(n.ceil() as u64).ok()
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn parses_a_well_formed_sequence() {
		let seq = LightSequence::from_json(
			r#"{"instructions": [
				{"phase": 1, "flashes": 4, "durationOn": 300, "durationOff": 150, "lightColour": "Green"},
				{"phase": 3, "flashes": 6, "durationOn": 300, "durationOff": 100, "lightColour": "Pink"}
			]}"#,
		)
		.unwrap();

		assert_eq!(seq.phases.len(), 2);
		assert_eq!(
			seq.phases[1],
			Phase {
				phase_index: 3,
				flash_count: 6,
				duration_on_ms: 300,
				duration_off_ms: 100,
				color_token: "Pink".to_string(),
			}
		);
		assert_eq!(seq.flash_count(), 10);
		assert_eq!(seq.total_ms(), 4 * 450 + 6 * 400);
	}

	#[test]
	fn rejects_non_objects() {
		assert!(matches!(
			LightSequence::from_value(&json!([1, 2])),
			Err(SequenceError::NotAnObject)
		));
	}

	#[test]
	fn rejects_missing_or_non_array_instructions() {
		for value in [json!({}), json!({"instructions": "flash"})] {
			assert!(matches!(
				LightSequence::from_value(&value),
				Err(SequenceError::MissingInstructions)
			));
		}
	}

	#[test]
	fn rejects_falsy_fields() {
		let good = json!({"phase": 1, "flashes": 2, "durationOn": 100, "durationOff": 50, "lightColour": "Red"});
		let broken = [
			("phase", json!(0)),
			("flashes", json!(0)),
			("durationOn", json!(null)),
			("durationOff", json!(0)),
			("lightColour", json!("")),
			("flashes", json!("two")),
		];

		for (field, bad) in broken {
			let mut phase = good.clone();
			phase[field] = bad;
			let value = json!({"instructions": [good.clone(), phase]});
			assert!(
				matches!(
					LightSequence::from_value(&value),
					Err(SequenceError::InvalidInstruction { index: 1 })
				),
				"{field} should be rejected"
			);
		}
	}

	#[test]
	fn rejects_missing_fields() {
		let value = json!({"instructions": [{"phase": 1, "flashes": 2, "durationOn": 100, "lightColour": "Red"}]});
		assert!(LightSequence::from_value(&value).is_err());
	}

	#[test]
	fn rejects_invalid_json() {
		assert!(matches!(
			LightSequence::from_json("{not json"),
			Err(SequenceError::Json(_))
		));
	}

	#[test]
	fn empty_instruction_list_is_valid() {
		let seq = LightSequence::from_value(&json!({"instructions": []})).unwrap();
		assert!(seq.phases.is_empty());
	}

	#[test]
	fn serializes_back_to_wire_names() {
		let seq = LightSequence {
			phases: vec![Phase {
				phase_index: 1,
				flash_count: 2,
				duration_on_ms: 100,
				duration_off_ms: 50,
				color_token: "Green".to_string(),
			}],
		};
		assert_eq!(
			serde_json::to_value(&seq).unwrap(),
			json!({"instructions": [{"phase": 1, "flashes": 2, "durationOn": 100, "durationOff": 50, "lightColour": "Green"}]})
		);
	}
}
