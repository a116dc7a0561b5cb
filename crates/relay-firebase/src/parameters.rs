// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Recursive parameter mapping.
//!
//! [`map_parameters`] renames the keys of a property object according to a
//! [`MappingTable`]. Only values reached through a mapped key are walked:
//!
//! ```text
//! {"products": [{"product_id": "A1"}], "meta": {"product_id": "B2"}}
//!   -> {"items": [{"item_id": "A1"}], "meta": {"product_id": "B2"}}
//! ```
//!
//! `products` is mapped, so its array elements are mapped too. `meta` is not in
//! the table and is copied as-is, nested keys included.

use relay_destination_core::JsonMap;
use serde_json::Value;

use crate::sanitize::sanitize_name;
use crate::table::MappingTable;

/// Parameters forwarded to Firebase.
pub type ParameterSet = JsonMap;

/// Maps `properties` through `table`.
///
/// For every table entry whose source key is present, the value is removed,
/// mapped recursively when it is an object or an array of objects, and
/// reinserted under the sanitized destination key. Keys absent from the table
/// keep their original values. When two source keys share a destination the
/// one iterated last wins.
pub fn map_parameters(properties: &JsonMap, table: &MappingTable) -> ParameterSet {
	let mut mapped = properties.clone();

	for (source, destination) in table.iter() {
		let Some(value) = properties.get(source) else {
			continue;
		};

		mapped.remove(source);
		mapped.insert(sanitize_name(destination), map_value(value, table));
	}

	mapped
}

fn map_value(value: &Value, table: &MappingTable) -> Value {
	match value {
		Value::Object(object) => Value::Object(map_parameters(object, table)),
		Value::Array(items) => Value::Array(
			items
				.iter()
				.map(|item| match item {
					Value::Object(object) => Value::Object(map_parameters(object, table)),
					other => other.clone(),
				})
				.collect(),
		),
		other => other.clone(),
	}
}

/// Merges `other` into `parameters`, keeping existing values on key collisions.
pub fn merge_parameters(parameters: &mut ParameterSet, other: ParameterSet) {
	for (key, value) in other {
		parameters.entry(key).or_insert(value);
	}
}
