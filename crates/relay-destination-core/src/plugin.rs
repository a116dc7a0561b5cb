// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The destination plugin contract.

use crate::event::{Event, IdentifyEvent, ScreenEvent, TrackEvent};
use crate::settings::Settings;

/// Where a plugin sits in the host's processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginType {
	/// Runs before anything else, may rewrite or drop events.
	Before,
	/// Adds data to events.
	Enrichment,
	/// Forwards events to an external backend.
	Destination,
	/// Runs after all destinations.
	After,
	/// Never receives events directly.
	Utility,
}

/// Why `update` is being called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateType {
	/// First settings delivery after the plugin was registered.
	Initial,
	/// Any later delivery.
	Refresh,
}

/// A plugin that receives events from the host pipeline.
///
/// Every hook has a pass-through default, so a destination only overrides the
/// event kinds it understands. Returning `None` from a hook drops the event for
/// the rest of the pipeline.
///
/// Hooks take `&self`: the host may deliver settings on one thread while events
/// arrive on another, so implementations keep any mutable state behind their
/// own synchronization.
pub trait DestinationPlugin: Send + Sync {
	/// Key used to look up this plugin's settings under `integrations`.
	fn key(&self) -> &str;

	fn plugin_type(&self) -> PluginType {
		PluginType::Destination
	}

	/// Called whenever the host receives a settings document.
	fn update(&self, _settings: &Settings, _update: UpdateType) {}

	fn identify(&self, event: IdentifyEvent) -> Option<IdentifyEvent> {
		Some(event)
	}

	fn track(&self, event: TrackEvent) -> Option<TrackEvent> {
		Some(event)
	}

	fn screen(&self, event: ScreenEvent) -> Option<ScreenEvent> {
		Some(event)
	}

	/// Dispatches an event to the hook for its kind.
	fn execute(&self, event: Event) -> Option<Event> {
		match event {
			Event::Identify(e) => self.identify(e).map(Event::Identify),
			Event::Track(e) => self.track(e).map(Event::Track),
			Event::Screen(e) => self.screen(e).map(Event::Screen),
		}
	}
}
