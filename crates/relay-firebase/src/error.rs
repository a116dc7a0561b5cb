// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the Firebase destination.
//!
//! None of these cross the plugin boundary: event hooks log and carry on.
//! They surface only from construction and configuration loading.

use std::path::PathBuf;

use relay_destination_core::CoreError;
use thiserror::Error;

/// Result type alias for destination operations.
pub type Result<T> = std::result::Result<T, DestinationError>;

/// Firebase destination errors.
#[derive(Debug, Error)]
pub enum DestinationError {
	/// The name sanitization pattern failed to compile.
	#[error("invalid name pattern: {0}")]
	InvalidPattern(#[from] regex::Error),

	/// Host settings could not be decoded.
	#[error(transparent)]
	Settings(#[from] CoreError),

	/// No backend was supplied to the builder.
	#[error("a Firebase backend is required")]
	MissingBackend,

	/// The configuration file exists but could not be read.
	#[error("failed to read config file {path}: {source}")]
	ConfigRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// The configuration file is not valid TOML for this schema.
	#[error("failed to parse config file {path}: {source}")]
	ConfigParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	/// A configuration value was present but unusable.
	#[error("invalid value for {key}: {message}")]
	InvalidValue { key: String, message: String },
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn invalid_value_message() {
		let err = DestinationError::InvalidValue {
			key: "RELAY_FIREBASE_LOG_PARAMETERS".to_string(),
			message: "expected a boolean".to_string(),
		};
		assert_eq!(
			err.to_string(),
			"invalid value for RELAY_FIREBASE_LOG_PARAMETERS: expected a boolean"
		);
	}

	#[test]
	fn settings_error_is_transparent() {
		let source = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
		let core = CoreError::InvalidSettings {
			key: "firebase".to_string(),
			source,
		};
		let expected = core.to_string();
		assert_eq!(DestinationError::from(core).to_string(), expected);
	}

	#[test]
	fn missing_backend_message() {
		assert_eq!(
			DestinationError::MissingBackend.to_string(),
			"a Firebase backend is required"
		);
	}
}
