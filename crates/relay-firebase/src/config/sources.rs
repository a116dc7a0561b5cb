// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: defaults, TOML files and environment variables.

use std::path::PathBuf;

use tracing::{debug, trace};

use super::{DestinationConfigLayer, FirebaseOptionsLayer};
use crate::error::{DestinationError, Result};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<DestinationConfigLayer>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<DestinationConfigLayer> {
		debug!("loading defaults");
		Ok(DestinationConfigLayer::default())
	}
}

/// TOML file configuration source. A missing file contributes nothing.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<DestinationConfigLayer> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(DestinationConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content =
			std::fs::read_to_string(&self.path).map_err(|e| DestinationError::ConfigRead {
				path: self.path.clone(),
				source: e,
			})?;

		let layer: DestinationConfigLayer =
			toml::from_str(&content).map_err(|e| DestinationError::ConfigParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Environment variable source.
///
/// Convention: `RELAY_FIREBASE_<FIELD>`.
pub struct EnvSource {
	lookup: EnvLookup,
}

impl EnvSource {
	/// Reads the process environment.
	pub fn system() -> Self {
		Self::with_lookup(|name| std::env::var(name).ok())
	}

	/// Reads variables through `lookup` instead of the process environment.
	pub fn with_lookup<F>(lookup: F) -> Self
	where
		F: Fn(&str) -> Option<String> + Send + Sync + 'static,
	{
		Self {
			lookup: Box::new(lookup),
		}
	}

	fn var(&self, name: &str) -> Option<String> {
		(self.lookup)(name).filter(|s| !s.is_empty())
	}

	fn bool(&self, name: &str) -> Result<Option<bool>> {
		match self.var(name) {
			Some(v) => parse_bool(&v)
				.map(Some)
				.ok_or_else(|| DestinationError::InvalidValue {
					key: name.to_string(),
					message: format!("invalid boolean value '{v}'"),
				}),
			None => Ok(None),
		}
	}
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<DestinationConfigLayer> {
		debug!("loading environment variables");

		let firebase = FirebaseOptionsLayer {
			google_app_id: self.var("RELAY_FIREBASE_GOOGLE_APP_ID"),
			gcm_sender_id: self.var("RELAY_FIREBASE_GCM_SENDER_ID"),
			api_key: self.var("RELAY_FIREBASE_API_KEY"),
			project_id: self.var("RELAY_FIREBASE_PROJECT_ID"),
			bundle_id: self.var("RELAY_FIREBASE_BUNDLE_ID"),
			storage_bucket: self.var("RELAY_FIREBASE_STORAGE_BUCKET"),
			database_url: self.var("RELAY_FIREBASE_DATABASE_URL"),
			deep_link_url_scheme: self.var("RELAY_FIREBASE_DEEP_LINK_URL_SCHEME"),
		};

		Ok(DestinationConfigLayer {
			firebase: (!firebase.is_empty()).then_some(firebase),
			log_parameters: self.bool("RELAY_FIREBASE_LOG_PARAMETERS")?,
		})
	}
}

fn parse_bool(value: &str) -> Option<bool> {
	match value.to_ascii_lowercase().as_str() {
		"1" | "true" | "yes" | "on" => Some(true),
		"0" | "false" | "no" | "off" => Some(false),
		_ => None,
	}
}
