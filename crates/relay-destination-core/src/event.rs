// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The vendor-neutral event model delivered by the host pipeline.
//!
//! Events arrive as JSON objects tagged with a `type` field:
//!
//! ```json
//! {"type": "track", "event": "Order Completed", "properties": {"total": 12.5}}
//! ```
//!
//! Properties, traits and context are free-form JSON objects. Destinations only
//! read them; every field a destination does not understand is carried through
//! untouched so downstream plugins see the original event.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::JsonMap;

/// Context key holding campaign attribution metadata.
pub const CAMPAIGN_CONTEXT_KEY: &str = "campaign";

/// The kind of an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
	Identify,
	Track,
	Screen,
}

impl fmt::Display for EventKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			EventKind::Identify => write!(f, "identify"),
			EventKind::Track => write!(f, "track"),
			EventKind::Screen => write!(f, "screen"),
		}
	}
}

/// An analytics event, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Event {
	Identify(IdentifyEvent),
	Track(TrackEvent),
	Screen(ScreenEvent),
}

impl Event {
	/// Decodes a single event from its JSON representation.
	pub fn from_json_str(s: &str) -> Result<Self> {
		Ok(serde_json::from_str(s)?)
	}

	pub fn kind(&self) -> EventKind {
		match self {
			Event::Identify(_) => EventKind::Identify,
			Event::Track(_) => EventKind::Track,
			Event::Screen(_) => EventKind::Screen,
		}
	}

	pub fn context(&self) -> Option<&JsonMap> {
		match self {
			Event::Identify(e) => e.context.as_ref(),
			Event::Track(e) => e.context.as_ref(),
			Event::Screen(e) => e.context.as_ref(),
		}
	}

	pub fn properties(&self) -> Option<&JsonMap> {
		match self {
			Event::Identify(e) => e.properties.as_ref(),
			Event::Track(e) => e.properties.as_ref(),
			Event::Screen(e) => e.properties.as_ref(),
		}
	}

	/// Returns the `context.campaign` object, if the event carries one.
	pub fn campaign(&self) -> Option<&JsonMap> {
		campaign_of(self.context())
	}
}

impl From<IdentifyEvent> for Event {
	fn from(event: IdentifyEvent) -> Self {
		Event::Identify(event)
	}
}

impl From<TrackEvent> for Event {
	fn from(event: TrackEvent) -> Self {
		Event::Track(event)
	}
}

impl From<ScreenEvent> for Event {
	fn from(event: ScreenEvent) -> Self {
		Event::Screen(event)
	}
}

fn campaign_of(context: Option<&JsonMap>) -> Option<&JsonMap> {
	context?.get(CAMPAIGN_CONTEXT_KEY)?.as_object()
}

/// Links the current device to a known user and records user traits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifyEvent {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub user_id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub traits: Option<JsonMap>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub anonymous_id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub message_id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub timestamp: Option<DateTime<Utc>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub context: Option<JsonMap>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub properties: Option<JsonMap>,
}

impl IdentifyEvent {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
		self.user_id = Some(user_id.into());
		self
	}

	/// Adds a single trait, creating the traits object on first use.
	pub fn with_trait(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self
			.traits
			.get_or_insert_with(JsonMap::new)
			.insert(key.into(), value.into());
		self
	}

	pub fn with_traits(mut self, traits: JsonMap) -> Self {
		self.traits = Some(traits);
		self
	}

	pub fn with_context(mut self, context: JsonMap) -> Self {
		self.context = Some(context);
		self
	}
}

/// A named user action with free-form properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackEvent {
	pub event: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub anonymous_id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub message_id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub timestamp: Option<DateTime<Utc>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub context: Option<JsonMap>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub properties: Option<JsonMap>,
}

impl TrackEvent {
	pub fn new(event: impl Into<String>) -> Self {
		Self {
			event: event.into(),
			..Default::default()
		}
	}

	/// Adds a single property, creating the properties object on first use.
	pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self
			.properties
			.get_or_insert_with(JsonMap::new)
			.insert(key.into(), value.into());
		self
	}

	pub fn with_properties(mut self, properties: JsonMap) -> Self {
		self.properties = Some(properties);
		self
	}

	pub fn with_context(mut self, context: JsonMap) -> Self {
		self.context = Some(context);
		self
	}

	pub fn campaign(&self) -> Option<&JsonMap> {
		campaign_of(self.context.as_ref())
	}
}

/// A screen (or page) view. The name is optional; unnamed screens carry no
/// information a destination can report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenEvent {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub category: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub anonymous_id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub message_id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub timestamp: Option<DateTime<Utc>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub context: Option<JsonMap>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub properties: Option<JsonMap>,
}

impl ScreenEvent {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: Some(name.into()),
			..Default::default()
		}
	}

	/// A screen event without a name.
	pub fn unnamed() -> Self {
		Self::default()
	}

	pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self
			.properties
			.get_or_insert_with(JsonMap::new)
			.insert(key.into(), value.into());
		self
	}

	pub fn with_properties(mut self, properties: JsonMap) -> Self {
		self.properties = Some(properties);
		self
	}

	pub fn with_context(mut self, context: JsonMap) -> Self {
		self.context = Some(context);
		self
	}

	pub fn campaign(&self) -> Option<&JsonMap> {
		campaign_of(self.context.as_ref())
	}
}
