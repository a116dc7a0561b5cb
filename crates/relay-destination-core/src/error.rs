// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the destination core.

use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised while decoding host input.
#[derive(Debug, Error)]
pub enum CoreError {
	/// The event payload was not valid JSON or did not match the event model.
	#[error("failed to decode event: {0}")]
	Decode(#[from] serde_json::Error),

	/// The settings payload could not be decoded.
	#[error("invalid settings for integration '{key}': {source}")]
	InvalidSettings {
		key: String,
		#[source]
		source: serde_json::Error,
	},
}
