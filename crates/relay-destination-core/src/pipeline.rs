// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Ordered plugin pipeline.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::event::Event;
use crate::plugin::{DestinationPlugin, UpdateType};
use crate::settings::Settings;

/// An ordered list of plugins that events are threaded through.
///
/// Plugins run in registration order. Each receives the event returned by the
/// previous one; a plugin returning `None` stops processing.
#[derive(Default)]
pub struct Pipeline {
	plugins: Vec<Arc<dyn DestinationPlugin>>,
	settings_applied: AtomicBool,
}

impl Pipeline {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a plugin at the end of the pipeline.
	pub fn add(&mut self, plugin: Arc<dyn DestinationPlugin>) -> &mut Self {
		debug!(plugin = plugin.key(), "registering plugin");
		self.plugins.push(plugin);
		self
	}

	/// Removes every plugin registered under `key`. Returns how many were removed.
	pub fn remove(&mut self, key: &str) -> usize {
		let before = self.plugins.len();
		self.plugins.retain(|p| p.key() != key);
		before - self.plugins.len()
	}

	pub fn find(&self, key: &str) -> Option<&Arc<dyn DestinationPlugin>> {
		self.plugins.iter().find(|p| p.key() == key)
	}

	pub fn len(&self) -> usize {
		self.plugins.len()
	}

	pub fn is_empty(&self) -> bool {
		self.plugins.is_empty()
	}

	/// Delivers a settings document to every plugin.
	///
	/// The first delivery is reported as [`UpdateType::Initial`], every later one
	/// as [`UpdateType::Refresh`].
	pub fn apply_settings(&self, settings: &Settings) {
		let update = if self.settings_applied.swap(true, Ordering::SeqCst) {
			UpdateType::Refresh
		} else {
			UpdateType::Initial
		};

		debug!(?update, plugins = self.plugins.len(), "applying settings");
		for plugin in &self.plugins {
			plugin.update(settings, update);
		}
	}

	/// Runs an event through every plugin in order.
	pub fn process(&self, event: Event) -> Option<Event> {
		let mut current = event;
		for plugin in &self.plugins {
			trace!(plugin = plugin.key(), kind = %current.kind(), "executing plugin");
			match plugin.execute(current) {
				Some(next) => current = next,
				None => {
					debug!(plugin = plugin.key(), "event dropped by plugin");
					return None;
				}
			}
		}
		Some(current)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::event::{ScreenEvent, TrackEvent};
	use std::sync::Mutex;

	#[derive(Default)]
	struct Recorder {
		key: &'static str,
		seen: Mutex<Vec<String>>,
		updates: Mutex<Vec<UpdateType>>,
	}

	impl Recorder {
		fn new(key: &'static str) -> Arc<Self> {
			Arc::new(Self {
				key,
				..Default::default()
			})
		}
	}

	impl DestinationPlugin for Recorder {
		fn key(&self) -> &str {
			self.key
		}

		fn update(&self, _settings: &Settings, update: UpdateType) {
			self.updates.lock().unwrap().push(update);
		}

		fn track(&self, mut event: TrackEvent) -> Option<TrackEvent> {
			self.seen.lock().unwrap().push(event.event.clone());
			event.event.push_str(self.key);
			Some(event)
		}
	}

	struct Dropper;

	impl DestinationPlugin for Dropper {
		fn key(&self) -> &str {
			"dropper"
		}

		fn screen(&self, _event: ScreenEvent) -> Option<ScreenEvent> {
			None
		}
	}

	#[test]
	fn empty_pipeline_returns_event() {
		let pipeline = Pipeline::new();
		let event = Event::from(TrackEvent::new("x"));
		assert!(pipeline.is_empty());
		assert_eq!(pipeline.process(event.clone()), Some(event));
	}

	#[test]
	fn plugins_run_in_registration_order() {
		let a = Recorder::new("a");
		let b = Recorder::new("b");
		let mut pipeline = Pipeline::new();
		pipeline.add(a.clone()).add(b.clone());

		let out = pipeline.process(TrackEvent::new("e").into()).unwrap();

		assert_eq!(*a.seen.lock().unwrap(), vec!["e"]);
		assert_eq!(*b.seen.lock().unwrap(), vec!["ea"]);
		let Event::Track(track) = out else {
			panic!("expected track");
		};
		assert_eq!(track.event, "eab");
	}

	#[test]
	fn dropped_event_stops_processing() {
		let after = Recorder::new("after");
		let mut pipeline = Pipeline::new();
		pipeline.add(Arc::new(Dropper)).add(after.clone());

		assert_eq!(pipeline.process(ScreenEvent::new("Home").into()), None);
		assert!(after.seen.lock().unwrap().is_empty());
	}

	#[test]
	fn first_settings_delivery_is_initial() {
		let a = Recorder::new("a");
		let mut pipeline = Pipeline::new();
		pipeline.add(a.clone());

		pipeline.apply_settings(&Settings::new());
		pipeline.apply_settings(&Settings::new());

		assert_eq!(
			*a.updates.lock().unwrap(),
			vec![UpdateType::Initial, UpdateType::Refresh]
		);
	}

	#[test]
	fn find_and_remove_by_key() {
		let mut pipeline = Pipeline::new();
		pipeline
			.add(Recorder::new("a"))
			.add(Arc::new(Dropper))
			.add(Recorder::new("a"));

		assert_eq!(pipeline.len(), 3);
		assert!(pipeline.find("dropper").is_some());
		assert_eq!(pipeline.remove("a"), 2);
		assert_eq!(pipeline.len(), 1);
		assert!(pipeline.find("a").is_none());
	}
}
