// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Host-delivered settings.
//!
//! The host fetches a settings document and hands it to every plugin. Each
//! destination looks up its own block under `integrations.<key>`:
//!
//! ```json
//! {"integrations": {"firebase": {"deepLinkURLScheme": "relaydemo"}}}
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CoreError, Result};
use crate::JsonMap;

/// Settings document shared by every plugin in a pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
	#[serde(default)]
	pub integrations: JsonMap,
}

impl Settings {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds an integration block (builder pattern).
	pub fn with_integration(mut self, key: impl Into<String>, value: Value) -> Self {
		self.integrations.insert(key.into(), value);
		self
	}

	pub fn has_integration(&self, key: &str) -> bool {
		self.integrations.contains_key(key)
	}

	/// Decodes the integration block for `key`.
	///
	/// Returns `Ok(None)` when the block is missing or `null`.
	pub fn integration_settings<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
		match self.integrations.get(key) {
			None | Some(Value::Null) => Ok(None),
			Some(value) => serde_json::from_value(value.clone())
				.map(Some)
				.map_err(|source| CoreError::InvalidSettings {
					key: key.to_string(),
					source,
				}),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[derive(Debug, Deserialize, PartialEq)]
	#[serde(rename_all = "camelCase")]
	struct Sample {
		api_key: String,
		#[serde(default)]
		verbose: bool,
	}

	#[test]
	fn missing_integration_is_none() {
		let settings = Settings::new();
		assert_eq!(settings.integration_settings::<Sample>("sample").unwrap(), None);
	}

	#[test]
	fn null_integration_is_none() {
		let settings = Settings::new().with_integration("sample", Value::Null);
		assert!(settings.has_integration("sample"));
		assert_eq!(settings.integration_settings::<Sample>("sample").unwrap(), None);
	}

	#[test]
	fn decodes_integration_block() {
		let settings = Settings::new().with_integration("sample", json!({"apiKey": "k"}));
		assert_eq!(
			settings.integration_settings::<Sample>("sample").unwrap(),
			Some(Sample {
				api_key: "k".to_string(),
				verbose: false,
			})
		);
	}

	#[test]
	fn malformed_block_is_an_error() {
		let settings = Settings::new().with_integration("sample", json!({"apiKey": 7}));
		let err = settings.integration_settings::<Sample>("sample").unwrap_err();
		assert!(matches!(err, CoreError::InvalidSettings { ref key, .. } if key == "sample"));
	}

	#[test]
	fn settings_deserialize_without_integrations() {
		let settings: Settings = serde_json::from_str("{}").unwrap();
		assert!(settings.integrations.is_empty());
	}
}
