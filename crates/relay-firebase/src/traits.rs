// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Flattening identify traits into Firebase user properties.
//!
//! Firebase user properties are string-valued. Strings are used as-is, every
//! other value is rendered as JSON text (`5`, `true`, `["a","b"]`), and `null`
//! traits are skipped entirely.

use relay_destination_core::JsonMap;
use serde_json::Value;

/// Converts each non-null trait into a `(name, value)` string pair and hands it
/// to `emit`.
///
/// Spaces in names become underscores; values are trimmed of surrounding
/// whitespace and newlines. Iteration order is the map's order and carries no
/// meaning.
pub fn stringify_traits<F>(traits: &JsonMap, mut emit: F)
where
	F: FnMut(String, String),
{
	for (key, value) in traits {
		let text = match value {
			Value::Null => continue,
			Value::String(s) => s.clone(),
			other => other.to_string(),
		};

		emit(key.replace(' ', "_"), text.trim().to_string());
	}
}

/// Collecting form of [`stringify_traits`].
pub fn stringify_traits_to_vec(traits: &JsonMap) -> Vec<(String, String)> {
	let mut pairs = Vec::with_capacity(traits.len());
	stringify_traits(traits, |name, value| pairs.push((name, value)));
	pairs
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn object(value: Value) -> JsonMap {
		match value {
			Value::Object(map) => map,
			other => panic!("expected object, got {other}"),
		}
	}

	fn sorted(mut pairs: Vec<(String, String)>) -> Vec<(String, String)> {
		pairs.sort();
		pairs
	}

	fn pair(name: &str, value: &str) -> (String, String) {
		(name.to_string(), value.to_string())
	}

	#[test]
	fn skips_null_and_normalizes_the_rest() {
		let traits = object(json!({"Last Name": "Smith ", "Age": null, "Score": 5}));
		let pairs = sorted(stringify_traits_to_vec(&traits));

		assert_eq!(pairs, vec![pair("Last_Name", "Smith"), pair("Score", "5")]);
	}

	#[test]
	fn trims_newlines_from_values() {
		let traits = object(json!({"bio": "\n  hello world \t\n"}));
		assert_eq!(stringify_traits_to_vec(&traits), vec![pair("bio", "hello world")]);
	}

	#[test]
	fn renders_non_string_values_as_json_text() {
		let traits = object(json!({
			"premium": true,
			"ratio": 0.5,
			"tags": ["a", "b"],
			"address": {"city": "Paris"}
		}));
		let pairs = sorted(stringify_traits_to_vec(&traits));

		assert_eq!(
			pairs,
			vec![
				pair("address", r#"{"city":"Paris"}"#),
				pair("premium", "true"),
				pair("ratio", "0.5"),
				pair("tags", r#"["a","b"]"#),
			]
		);
	}

	#[test]
	fn replaces_every_space_in_names() {
		let traits = object(json!({" first  name ": "Ada"}));
		assert_eq!(stringify_traits_to_vec(&traits), vec![pair("_first__name_", "Ada")]);
	}

	#[test]
	fn empty_string_is_emitted() {
		let traits = object(json!({"nickname": "   "}));
		assert_eq!(stringify_traits_to_vec(&traits), vec![pair("nickname", "")]);
	}

	#[test]
	fn callback_sees_each_pair_once() {
		let traits = object(json!({"a": 1, "b": null, "c": "x"}));
		let mut count = 0;
		stringify_traits(&traits, |_, _| count += 1);
		assert_eq!(count, 2);
	}
}
