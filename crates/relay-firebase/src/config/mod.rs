// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Destination configuration.
//!
//! Configuration is layered from multiple sources, higher precedence winning:
//!
//! 1. Environment variables (`RELAY_FIREBASE_*`)
//! 2. TOML config file
//! 3. Built-in defaults
//!
//! ```toml
//! log_parameters = true
//!
//! [firebase]
//! google_app_id = "1:1234567890:ios:abcdef"
//! gcm_sender_id = "1234567890"
//! project_id = "relay-demo"
//! ```
//!
//! Firebase options are only produced when both `google_app_id` and
//! `gcm_sender_id` are known; otherwise the backend is configured with its own
//! defaults.

pub mod sources;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

/// Options handed to the backend's one-time `configure` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirebaseOptions {
	pub google_app_id: String,
	pub gcm_sender_id: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub api_key: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub project_id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub bundle_id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub storage_bucket: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub database_url: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub deep_link_url_scheme: Option<String>,
}

impl FirebaseOptions {
	pub fn new(google_app_id: impl Into<String>, gcm_sender_id: impl Into<String>) -> Self {
		Self {
			google_app_id: google_app_id.into(),
			gcm_sender_id: gcm_sender_id.into(),
			..Default::default()
		}
	}

	pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
		self.api_key = Some(api_key.into());
		self
	}

	pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
		self.project_id = Some(project_id.into());
		self
	}

	pub fn with_deep_link_url_scheme(mut self, scheme: impl Into<String>) -> Self {
		self.deep_link_url_scheme = Some(scheme.into());
		self
	}
}

/// Fully resolved destination configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestinationConfig {
	/// Caller-supplied Firebase options; `None` configures with backend defaults.
	pub options: Option<FirebaseOptions>,
	/// Include forwarded parameter sets in debug logs.
	pub log_parameters: bool,
}

/// One configuration source's contribution. Unset fields defer to lower layers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DestinationConfigLayer {
	#[serde(default)]
	pub firebase: Option<FirebaseOptionsLayer>,
	#[serde(default)]
	pub log_parameters: Option<bool>,
}

impl DestinationConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if let Some(other_firebase) = other.firebase {
			let firebase = self.firebase.get_or_insert_with(Default::default);
			firebase.merge(other_firebase);
		}
		if other.log_parameters.is_some() {
			self.log_parameters = other.log_parameters;
		}
	}

	pub fn finalize(self) -> DestinationConfig {
		DestinationConfig {
			options: self.firebase.and_then(|f| f.finalize()),
			log_parameters: self.log_parameters.unwrap_or(false),
		}
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FirebaseOptionsLayer {
	pub google_app_id: Option<String>,
	pub gcm_sender_id: Option<String>,
	pub api_key: Option<String>,
	pub project_id: Option<String>,
	pub bundle_id: Option<String>,
	pub storage_bucket: Option<String>,
	pub database_url: Option<String>,
	pub deep_link_url_scheme: Option<String>,
}

impl FirebaseOptionsLayer {
	pub fn merge(&mut self, other: Self) {
		if other.google_app_id.is_some() {
			self.google_app_id = other.google_app_id;
		}
		if other.gcm_sender_id.is_some() {
			self.gcm_sender_id = other.gcm_sender_id;
		}
		if other.api_key.is_some() {
			self.api_key = other.api_key;
		}
		if other.project_id.is_some() {
			self.project_id = other.project_id;
		}
		if other.bundle_id.is_some() {
			self.bundle_id = other.bundle_id;
		}
		if other.storage_bucket.is_some() {
			self.storage_bucket = other.storage_bucket;
		}
		if other.database_url.is_some() {
			self.database_url = other.database_url;
		}
		if other.deep_link_url_scheme.is_some() {
			self.deep_link_url_scheme = other.deep_link_url_scheme;
		}
	}

	/// Returns options only when the two required identifiers are present.
	pub fn finalize(self) -> Option<FirebaseOptions> {
		Some(FirebaseOptions {
			google_app_id: self.google_app_id?,
			gcm_sender_id: self.gcm_sender_id?,
			api_key: self.api_key,
			project_id: self.project_id,
			bundle_id: self.bundle_id,
			storage_bucket: self.storage_bucket,
			database_url: self.database_url,
			deep_link_url_scheme: self.deep_link_url_scheme,
		})
	}

	fn is_empty(&self) -> bool {
		self.google_app_id.is_none()
			&& self.gcm_sender_id.is_none()
			&& self.api_key.is_none()
			&& self.project_id.is_none()
			&& self.bundle_id.is_none()
			&& self.storage_bucket.is_none()
			&& self.database_url.is_none()
			&& self.deep_link_url_scheme.is_none()
	}
}

/// Default config file location.
pub fn default_config_path() -> PathBuf {
	PathBuf::from("relay-firebase.toml")
}

/// Load configuration from all sources with standard precedence.
pub fn load_config() -> Result<DestinationConfig> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(default_config_path())),
		Box::new(EnvSource::system()),
	])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(config_path: impl Into<PathBuf>) -> Result<DestinationConfig> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource::system()),
	])
}

/// Load configuration from environment only.
pub fn load_config_from_env() -> Result<DestinationConfig> {
	load_from_sources(vec![Box::new(EnvSource::system())])
}

fn load_from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<DestinationConfig> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = DestinationConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		merged.merge(source.load()?);
	}

	let config = merged.finalize();
	info!(
		options_configured = config.options.is_some(),
		log_parameters = config.log_parameters,
		"Firebase destination configuration loaded"
	);
	Ok(config)
}
