// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The Firebase destination plugin.
//!
//! [`FirebaseDestination`] receives events from the host pipeline, maps them
//! into Firebase's vocabulary and forwards them to a [`FirebaseBackend`]:
//!
//! | Event | Backend calls |
//! |-------|---------------|
//! | identify | `set_user_id`, then `set_user_property` per non-null trait |
//! | track | `log_event(mapped name, mapped properties + campaign)` |
//! | screen | `log_event("screen_view", screen_name + mapped properties + campaign)` |
//!
//! Every hook returns the event unchanged so later plugins see the original.
//!
//! # Configuration state
//!
//! The backend is configured on the first settings delivery and never again.
//! The check-then-configure step runs under a mutex owned by the destination,
//! so concurrent settings deliveries from different threads still produce a
//! single `configure` call. The state lives as long as the destination; a new
//! destination over a backend that reports itself configured will skip.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use relay_destination_core::{
	DestinationPlugin, IdentifyEvent, JsonMap, ScreenEvent, Settings, TrackEvent, UpdateType,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::backend::FirebaseBackend;
use crate::config::{DestinationConfig, FirebaseOptions};
use crate::constants::event::SCREEN_VIEW;
use crate::constants::param::SCREEN_NAME;
use crate::error::{DestinationError, Result};
use crate::parameters::{merge_parameters, ParameterSet};
use crate::table::MappingTables;
use crate::traits::stringify_traits;

/// Key of the Firebase block under `integrations` in host settings.
pub const FIREBASE_KEY: &str = "firebase";

/// Firebase-specific settings delivered by the host.
#[derive(Debug, Default, Deserialize)]
struct FirebaseSettings {
	#[serde(rename = "deepLinkURLScheme", default)]
	deep_link_url_scheme: Option<String>,
}

/// Destination plugin forwarding events to Firebase Analytics.
pub struct FirebaseDestination {
	backend: Arc<dyn FirebaseBackend>,
	options: Option<FirebaseOptions>,
	tables: MappingTables,
	log_parameters: bool,
	configure_lock: Mutex<()>,
	configured: AtomicBool,
}

impl FirebaseDestination {
	/// Creates a destination with the built-in Firebase tables and no custom
	/// options.
	pub fn new(backend: Arc<dyn FirebaseBackend>) -> Self {
		Self {
			backend,
			options: None,
			tables: MappingTables::firebase(),
			log_parameters: false,
			configure_lock: Mutex::new(()),
			configured: AtomicBool::new(false),
		}
	}

	pub fn builder() -> FirebaseDestinationBuilder {
		FirebaseDestinationBuilder::new()
	}

	/// Version of this destination, reported to hosts that track plugin versions.
	pub fn version(&self) -> &'static str {
		env!("CARGO_PKG_VERSION")
	}

	pub fn tables(&self) -> &MappingTables {
		&self.tables
	}

	/// Whether this destination has configured (or found configured) the backend.
	pub fn is_configured(&self) -> bool {
		self.configured.load(Ordering::SeqCst) || self.backend.is_configured()
	}

	/// Configures the backend unless it already is. Returns `true` when this call
	/// performed the configuration.
	pub fn configure_once(&self) -> bool {
		let _guard = self
			.configure_lock
			.lock()
			.unwrap_or_else(PoisonError::into_inner);

		if self.is_configured() {
			info!("Firebase already configured, skipping");
			self.configured.store(true, Ordering::SeqCst);
			return false;
		}

		self.backend.configure(self.options.clone());
		self.configured.store(true, Ordering::SeqCst);
		info!(custom_options = self.options.is_some(), "Firebase configured");
		true
	}

	fn apply_integration_settings(&self, settings: &Settings) {
		let firebase = match settings.integration_settings::<FirebaseSettings>(FIREBASE_KEY) {
			Ok(Some(firebase)) => firebase,
			Ok(None) => return,
			Err(error) => {
				warn!(error = %error, "ignoring malformed Firebase settings");
				return;
			}
		};

		if let Some(scheme) = firebase.deep_link_url_scheme {
			self.backend.set_deep_link_url_scheme(&scheme);
			info!(scheme = %scheme, "added deep link URL scheme");
		}
	}

	/// Maps properties and campaign context onto `seed`, keeping existing keys.
	fn build_parameters(
		&self,
		seed: Option<ParameterSet>,
		properties: Option<&JsonMap>,
		campaign: Option<&JsonMap>,
	) -> Option<ParameterSet> {
		let mut parameters = seed;

		if let Some(properties) = properties {
			merge_into(&mut parameters, self.tables.map_properties(properties));
		}
		if let Some(campaign) = campaign {
			merge_into(&mut parameters, self.tables.map_campaign(campaign));
		}

		parameters
	}

	fn log_event(&self, name: &str, parameters: Option<ParameterSet>) {
		if self.log_parameters {
			debug!(event_name = %name, parameters = ?parameters, "Firebase logEvent");
		} else {
			debug!(
				event_name = %name,
				parameter_count = parameters.as_ref().map_or(0, |p| p.len()),
				"Firebase logEvent"
			);
		}
		self.backend.log_event(name, parameters);
	}
}

fn merge_into(parameters: &mut Option<ParameterSet>, mapped: ParameterSet) {
	match parameters {
		Some(existing) => merge_parameters(existing, mapped),
		None => *parameters = Some(mapped),
	}
}

impl DestinationPlugin for FirebaseDestination {
	fn key(&self) -> &str {
		FIREBASE_KEY
	}

	fn update(&self, settings: &Settings, update: UpdateType) {
		debug!(?update, "received settings");
		self.apply_integration_settings(settings);
		self.configure_once();
	}

	fn identify(&self, event: IdentifyEvent) -> Option<IdentifyEvent> {
		if let Some(user_id) = &event.user_id {
			self.backend.set_user_id(user_id);
			debug!(user_id = %user_id, "Firebase setUserId");
		}

		if let Some(traits) = &event.traits {
			stringify_traits(traits, |name, value| {
				self.backend.set_user_property(&name, &value);
				debug!(name = %name, value = %value, "Firebase setUserProperty");
			});
		}

		Some(event)
	}

	fn track(&self, event: TrackEvent) -> Option<TrackEvent> {
		let name = self.tables.map_event_name(&event.event);
		let parameters = self.build_parameters(None, event.properties.as_ref(), event.campaign());

		self.log_event(&name, parameters);
		Some(event)
	}

	fn screen(&self, event: ScreenEvent) -> Option<ScreenEvent> {
		let Some(screen_name) = &event.name else {
			debug!("screen event without a name, nothing to log");
			return Some(event);
		};

		let mut seed = ParameterSet::new();
		seed.insert(SCREEN_NAME.to_string(), Value::String(screen_name.clone()));
		let parameters =
			self.build_parameters(Some(seed), event.properties.as_ref(), event.campaign());

		self.log_event(SCREEN_VIEW, parameters);
		debug!(screen_name = %screen_name, "Firebase screen view");
		Some(event)
	}
}

/// Builder for [`FirebaseDestination`].
#[derive(Default)]
pub struct FirebaseDestinationBuilder {
	backend: Option<Arc<dyn FirebaseBackend>>,
	options: Option<FirebaseOptions>,
	tables: Option<MappingTables>,
	log_parameters: bool,
}

impl FirebaseDestinationBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the backend all calls are forwarded to. Required.
	pub fn backend(mut self, backend: Arc<dyn FirebaseBackend>) -> Self {
		self.backend = Some(backend);
		self
	}

	/// Sets the options passed to the backend's one-time `configure` call.
	pub fn options(mut self, options: FirebaseOptions) -> Self {
		self.options = Some(options);
		self
	}

	/// Applies a loaded [`DestinationConfig`]. Options in the config replace any
	/// set earlier; absent options leave them untouched.
	pub fn config(mut self, config: DestinationConfig) -> Self {
		if config.options.is_some() {
			self.options = config.options;
		}
		self.log_parameters = config.log_parameters;
		self
	}

	/// Replaces the built-in Firebase mapping tables.
	pub fn tables(mut self, tables: MappingTables) -> Self {
		self.tables = Some(tables);
		self
	}

	pub fn log_parameters(mut self, enabled: bool) -> Self {
		self.log_parameters = enabled;
		self
	}

	pub fn build(self) -> Result<FirebaseDestination> {
		let backend = self.backend.ok_or(DestinationError::MissingBackend)?;

		Ok(FirebaseDestination {
			backend,
			options: self.options,
			tables: self.tables.unwrap_or_default(),
			log_parameters: self.log_parameters,
			configure_lock: Mutex::new(()),
			configured: AtomicBool::new(false),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::backend::MockFirebaseBackend;
	use crate::backend::{BackendCall, RecordingBackend};
	use mockall::predicate;
	use serde_json::json;

	fn object(value: Value) -> JsonMap {
		match value {
			Value::Object(map) => map,
			other => panic!("expected object, got {other}"),
		}
	}

	fn recording() -> (Arc<RecordingBackend>, FirebaseDestination) {
		let backend = Arc::new(RecordingBackend::new());
		let destination = FirebaseDestination::new(backend.clone());
		(backend, destination)
	}

	#[test]
	fn settings_update_configures_exactly_once() {
		let mut backend = MockFirebaseBackend::new();
		backend.expect_is_configured().times(1).return_const(false);
		backend
			.expect_configure()
			.with(predicate::eq(None::<FirebaseOptions>))
			.times(1)
			.return_const(());

		let destination = FirebaseDestination::new(Arc::new(backend));
		destination.update(&Settings::new(), UpdateType::Initial);
		destination.update(&Settings::new(), UpdateType::Refresh);

		assert!(destination.is_configured());
	}

	#[test]
	fn already_configured_backend_is_not_reconfigured() {
		let mut backend = MockFirebaseBackend::new();
		backend.expect_is_configured().return_const(true);
		backend.expect_configure().never();

		let destination = FirebaseDestination::new(Arc::new(backend));
		assert!(!destination.configure_once());
	}

	#[test]
	fn custom_options_are_passed_to_configure() {
		let options = FirebaseOptions::new("app", "42").with_project_id("proj");
		let mut backend = MockFirebaseBackend::new();
		backend.expect_is_configured().return_const(false);
		backend
			.expect_configure()
			.with(predicate::eq(Some(options.clone())))
			.times(1)
			.return_const(());

		let destination = FirebaseDestination::builder()
			.backend(Arc::new(backend))
			.options(options)
			.build()
			.unwrap();
		assert!(destination.configure_once());
	}

	#[test]
	fn deep_link_scheme_is_applied_before_configuring() {
		let mut backend = MockFirebaseBackend::new();
		let mut seq = mockall::Sequence::new();
		backend
			.expect_set_deep_link_url_scheme()
			.with(predicate::eq("relaydemo"))
			.times(1)
			.in_sequence(&mut seq)
			.return_const(());
		backend
			.expect_is_configured()
			.times(1)
			.in_sequence(&mut seq)
			.return_const(false);
		backend
			.expect_configure()
			.times(1)
			.in_sequence(&mut seq)
			.return_const(());

		let destination = FirebaseDestination::new(Arc::new(backend));
		let settings =
			Settings::new().with_integration(FIREBASE_KEY, json!({"deepLinkURLScheme": "relaydemo"}));
		destination.update(&settings, UpdateType::Initial);
	}

	#[test]
	fn malformed_settings_still_configure() {
		let (backend, destination) = recording();
		let settings =
			Settings::new().with_integration(FIREBASE_KEY, json!({"deepLinkURLScheme": 12}));

		destination.update(&settings, UpdateType::Initial);

		assert_eq!(backend.calls(), vec![BackendCall::Configure { options: None }]);
	}

	#[test]
	fn concurrent_updates_configure_once() {
		let backend = Arc::new(RecordingBackend::new());
		let destination = Arc::new(FirebaseDestination::new(backend.clone()));

		let handles: Vec<_> = (0..8)
			.map(|_| {
				let destination = destination.clone();
				std::thread::spawn(move || destination.update(&Settings::new(), UpdateType::Initial))
			})
			.collect();
		for handle in handles {
			handle.join().unwrap();
		}

		assert_eq!(backend.configure_count(), 1);
	}

	#[test]
	fn second_destination_sees_backend_configured_by_first() {
		let backend = Arc::new(RecordingBackend::new());
		let first = FirebaseDestination::new(backend.clone());
		let second = FirebaseDestination::new(backend.clone());

		assert!(first.configure_once());
		assert!(!second.configure_once());
		assert_eq!(backend.configure_count(), 1);
	}

	#[test]
	fn identify_sets_user_id_and_properties() {
		let (backend, destination) = recording();
		let event = IdentifyEvent::new()
			.with_user_id("X-1234567890")
			.with_traits(object(json!({"Last Name": "Smith ", "Age": null})));

		let returned = destination.identify(event.clone());

		assert_eq!(returned, Some(event));
		assert_eq!(
			backend.calls(),
			vec![
				BackendCall::SetUserId {
					user_id: "X-1234567890".to_string()
				},
				BackendCall::SetUserProperty {
					name: "Last_Name".to_string(),
					value: "Smith".to_string()
				},
			]
		);
	}

	#[test]
	fn identify_without_user_or_traits_does_nothing() {
		let mut backend = MockFirebaseBackend::new();
		backend.expect_set_user_id().never();
		backend.expect_set_user_property().never();

		let destination = FirebaseDestination::new(Arc::new(backend));
		assert!(destination.identify(IdentifyEvent::new()).is_some());
	}

	#[test]
	fn track_maps_name_and_properties() {
		let (backend, destination) = recording();
		let event = TrackEvent::new("Order Completed")
			.with_properties(object(json!({"revenue": 30, "order_id": "o-9", "coupon": "X"})));

		assert_eq!(destination.track(event.clone()), Some(event));
		assert_eq!(
			backend.logged_events(),
			vec![(
				"purchase".to_string(),
				Some(object(json!({"value": 30, "transaction_id": "o-9", "coupon": "X"})))
			)]
		);
	}

	#[test]
	fn track_without_properties_logs_no_parameters() {
		let (backend, destination) = recording();
		destination.track(TrackEvent::new("onAppear"));

		assert_eq!(backend.logged_events(), vec![("onAppear".to_string(), None)]);
	}

	#[test]
	fn track_with_only_campaign_logs_campaign_parameters() {
		let (backend, destination) = recording();
		let event = TrackEvent::new("Signed Up")
			.with_context(object(json!({"campaign": {"source": "ads", "name": "spring"}})));

		destination.track(event);

		assert_eq!(
			backend.logged_events(),
			vec![(
				"Signed_Up".to_string(),
				Some(object(json!({"source": "ads", "campaign": "spring"})))
			)]
		);
	}

	#[test]
	fn property_values_win_over_campaign_values() {
		let (backend, destination) = recording();
		let event = TrackEvent::new("x")
			.with_properties(object(json!({"source": "property"})))
			.with_context(object(json!({"campaign": {"source": "campaign", "medium": "email"}})));

		destination.track(event);

		let (_, parameters) = backend.logged_events().remove(0);
		assert_eq!(
			parameters.unwrap(),
			object(json!({"source": "property", "medium": "email"}))
		);
	}

	#[test]
	fn screen_without_name_logs_nothing() {
		let mut backend = MockFirebaseBackend::new();
		backend.expect_log_event().never();

		let destination = FirebaseDestination::new(Arc::new(backend));
		let event = ScreenEvent::unnamed().with_property("price", 1);
		assert_eq!(destination.screen(event.clone()), Some(event));
	}

	#[test]
	fn screen_logs_screen_view_with_reserved_name() {
		let (backend, destination) = recording();
		let event = ScreenEvent::new("Screen appeared")
			.with_properties(object(json!({"screen_name": "ignored", "category": "home"})))
			.with_context(object(json!({"campaign": {"medium": "push"}})));

		destination.screen(event);

		assert_eq!(
			backend.logged_events(),
			vec![(
				"screen_view".to_string(),
				Some(object(json!({
					"screen_name": "Screen appeared",
					"item_category": "home",
					"medium": "push"
				})))
			)]
		);
	}

	#[test]
	fn reports_crate_version() {
		let (_, destination) = recording();
		assert_eq!(destination.version(), env!("CARGO_PKG_VERSION"));
		assert!(!destination.version().is_empty());
	}

	#[test]
	fn builder_requires_backend() {
		assert!(matches!(
			FirebaseDestination::builder().build(),
			Err(DestinationError::MissingBackend)
		));
	}

	#[test]
	fn builder_config_keeps_explicit_options_when_config_has_none() {
		let backend = Arc::new(RecordingBackend::new());
		let destination = FirebaseDestination::builder()
			.backend(backend.clone())
			.options(FirebaseOptions::new("app", "1"))
			.config(DestinationConfig {
				options: None,
				log_parameters: true,
			})
			.build()
			.unwrap();

		destination.configure_once();
		assert_eq!(
			backend.calls(),
			vec![BackendCall::Configure {
				options: Some(FirebaseOptions::new("app", "1"))
			}]
		);
	}

	#[test]
	fn custom_tables_replace_builtin_ones() {
		let backend = Arc::new(RecordingBackend::new());
		let tables = MappingTables {
			events: crate::table::MappingTable::from_pairs([("Level Up", "level_up")]),
			..MappingTables::firebase()
		};
		let destination = FirebaseDestination::builder()
			.backend(backend.clone())
			.tables(tables)
			.build()
			.unwrap();

		destination.track(TrackEvent::new("Level Up"));
		destination.track(TrackEvent::new("Order Completed"));

		let names: Vec<_> = backend.logged_events().into_iter().map(|(n, _)| n).collect();
		assert_eq!(names, vec!["level_up", "Order_Completed"]);
	}
}
