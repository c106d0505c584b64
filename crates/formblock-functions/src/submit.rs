// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Form submission with array fields flattened to comma-separated strings.

use async_trait::async_trait;
use serde_json::{Map, Number, Value};
use tracing::debug;

use crate::error::SubmitError;

pub const APPLICATION_JSON: &str = "application/json";

/// Exported form data: field name to value.
pub type FormData = Map<String, Value>;

/// The form runtime's export and submit hooks.
#[async_trait]
pub trait FormGlobals: Send + Sync {
	/// Current form data, or `None` when the runtime cannot export any.
	fn export_data(&self) -> Option<FormData>;

	async fn submit_form(
		&self,
		data: FormData,
		validate: bool,
		content_type: &str,
	) -> Result<(), SubmitError>;
}

/// Replaces every top-level array value with its members joined by `,`.
pub fn flatten_array_fields(data: &mut FormData) {
	for value in data.values_mut() {
		if let Value::Array(items) = value {
			let joined = join_array(items);
			*value = Value::String(joined);
		}
	}
}

/// Joins array members with `,` the way a browser's `Array.join` does:
/// `null` becomes empty and nested arrays are joined recursively.
pub fn join_array(items: &[Value]) -> String {
	items.iter().map(member_to_string).collect::<Vec<_>>().join(",")
}

fn member_to_string(value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		Value::Bool(flag) => flag.to_string(),
		Value::Number(number) => number_to_string(number),
		Value::String(text) => text.clone(),
		Value::Array(items) => join_array(items),
		Value::Object(_) => "[object Object]".to_string(),
	}
}

fn number_to_string(number: &Number) -> String {
	if let Some(int) = number.as_i64() {
		return int.to_string();
	}
	if let Some(uint) = number.as_u64() {
		return uint.to_string();
	}
	let Some(float) = number.as_f64() else {
		return number.to_string();
	};

	// Covers -0 as well.
	if float == 0.0 {
		return "0".to_string();
	}
	if (1e-6..1e21).contains(&float.abs()) {
		return float.to_string();
	}

	// Exponent form with an explicit sign on positive exponents: 1e+21.
	let scientific = format!("{float:e}");
	match scientific.split_once('e') {
		Some((mantissa, exponent)) if !exponent.starts_with('-') => {
			format!("{mantissa}e+{exponent}")
		}
		_ => scientific,
	}
}

/// Exports the form data, flattens array fields and submits the result as
/// JSON with validation enabled.
pub async fn submit_form_array_to_string<G>(globals: &G) -> Result<(), SubmitError>
where
	G: FormGlobals + ?Sized,
{
	let mut data = globals.export_data().unwrap_or_default();
	flatten_array_fields(&mut data);
	debug!(fields = data.len(), "submitting flattened form data");
	globals.submit_form(data, true, APPLICATION_JSON).await
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;
	use std::sync::Mutex;

	struct RecordingGlobals {
		export: Option<FormData>,
		submitted: Mutex<Vec<(FormData, bool, String)>>,
	}

	impl RecordingGlobals {
		fn new(export: Option<Value>) -> Self {
			Self {
				export: export.map(|value| match value {
					Value::Object(map) => map,
					other => panic!("expected object, got {other}"),
				}),
				submitted: Mutex::new(Vec::new()),
			}
		}
	}

	#[async_trait]
	impl FormGlobals for RecordingGlobals {
		fn export_data(&self) -> Option<FormData> {
			self.export.clone()
		}

		async fn submit_form(
			&self,
			data: FormData,
			validate: bool,
			content_type: &str,
		) -> Result<(), SubmitError> {
			self
				.submitted
				.lock()
				.unwrap()
				.push((data, validate, content_type.to_string()));
			Ok(())
		}
	}

	#[tokio::test]
	async fn arrays_are_joined_before_submit() {
		let globals = RecordingGlobals::new(Some(json!({
			"name": "Ada",
			"hobbies": ["chess", "math"],
			"age": 36,
			"address": { "city": "London" },
		})));

		submit_form_array_to_string(&globals).await.unwrap();

		let submitted = globals.submitted.lock().unwrap();
		assert_eq!(submitted.len(), 1);
		let (data, validate, content_type) = &submitted[0];
		assert_eq!(
			Value::Object(data.clone()),
			json!({
				"name": "Ada",
				"hobbies": "chess,math",
				"age": 36,
				"address": { "city": "London" },
			})
		);
		assert!(*validate);
		assert_eq!(content_type, APPLICATION_JSON);
	}

	#[tokio::test]
	async fn missing_export_submits_empty_object() {
		let globals = RecordingGlobals::new(None);

		submit_form_array_to_string(&globals).await.unwrap();

		let submitted = globals.submitted.lock().unwrap();
		assert!(submitted[0].0.is_empty());
	}

	#[test]
	fn join_renders_members_like_a_browser() {
		let items = [
			json!("a"),
			json!(1),
			json!(2.5),
			json!(3.0),
			json!(null),
			json!(true),
			json!(["x", ["y", "z"]]),
			json!({ "k": "v" }),
		];
		assert_eq!(join_array(&items), "a,1,2.5,3,,true,x,y,z,[object Object]");
	}

	#[test]
	fn numbers_outside_plain_range_use_exponent_form() {
		let items = [
			json!(-0.0),
			json!(1e21),
			json!(2.5e25),
			json!(-1e22),
			json!(1e-7),
			json!(1.5e-7),
			json!(1e-6),
			json!(123456.789),
			json!(1e20),
		];
		assert_eq!(
			join_array(&items),
			"0,1e+21,2.5e+25,-1e+22,1e-7,1.5e-7,0.000001,123456.789,100000000000000000000"
		);
	}

	#[test]
	fn empty_array_becomes_empty_string() {
		let mut data = FormData::new();
		data.insert("tags".to_string(), json!([]));
		flatten_array_fields(&mut data);
		assert_eq!(data["tags"], json!(""));
	}
}
