// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The boundary to the Firebase Analytics SDK.
//!
//! [`FirebaseBackend`] is the narrow surface the destination calls into.
//! Production hosts implement it over their platform's Firebase SDK; tests and
//! dry runs use [`RecordingBackend`], which keeps every call in memory.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use serde::Serialize;

use crate::config::FirebaseOptions;
use crate::parameters::ParameterSet;

/// Calls the destination makes into the Firebase SDK.
///
/// All methods take `&self` and implementations must be thread-safe: settings
/// updates and events may arrive on different threads.
///
/// The configure-once guard lives in each [`FirebaseDestination`]. Give every
/// backend instance a single destination; two destinations over one backend
/// can race on `is_configured` and both call `configure`.
///
/// [`FirebaseDestination`]: crate::FirebaseDestination
#[cfg_attr(test, mockall::automock)]
pub trait FirebaseBackend: Send + Sync {
	/// Initializes the SDK. `None` means "use the SDK's bundled defaults".
	fn configure(&self, options: Option<FirebaseOptions>);

	/// Whether the SDK has already been initialized in this process.
	fn is_configured(&self) -> bool;

	/// Sets the deep-link URL scheme on the SDK's global options.
	fn set_deep_link_url_scheme(&self, scheme: &str);

	fn set_user_id(&self, user_id: &str);

	fn set_user_property(&self, name: &str, value: &str);

	fn log_event(&self, name: &str, parameters: Option<ParameterSet>);
}

/// A single call made against a [`FirebaseBackend`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum BackendCall {
	Configure {
		options: Option<FirebaseOptions>,
	},
	SetDeepLinkUrlScheme {
		scheme: String,
	},
	SetUserId {
		user_id: String,
	},
	SetUserProperty {
		name: String,
		value: String,
	},
	LogEvent {
		name: String,
		parameters: Option<ParameterSet>,
	},
}

/// In-memory backend that records every call in order.
#[derive(Debug, Default)]
pub struct RecordingBackend {
	calls: Mutex<Vec<BackendCall>>,
	configured: AtomicBool,
}

impl RecordingBackend {
	pub fn new() -> Self {
		Self::default()
	}

	/// A backend that reports itself as already configured, as when the SDK was
	/// initialized elsewhere in the process.
	pub fn preconfigured() -> Self {
		Self {
			calls: Mutex::new(Vec::new()),
			configured: AtomicBool::new(true),
		}
	}

	/// Snapshot of all calls so far.
	pub fn calls(&self) -> Vec<BackendCall> {
		self.lock().clone()
	}

	/// Removes and returns all calls so far.
	pub fn take_calls(&self) -> Vec<BackendCall> {
		std::mem::take(&mut *self.lock())
	}

	/// Only the `log_event` calls, as `(name, parameters)`.
	pub fn logged_events(&self) -> Vec<(String, Option<ParameterSet>)> {
		self
			.lock()
			.iter()
			.filter_map(|call| match call {
				BackendCall::LogEvent { name, parameters } => Some((name.clone(), parameters.clone())),
				_ => None,
			})
			.collect()
	}

	/// Number of `configure` calls so far.
	pub fn configure_count(&self) -> usize {
		self
			.lock()
			.iter()
			.filter(|call| matches!(call, BackendCall::Configure { .. }))
			.count()
	}

	fn record(&self, call: BackendCall) {
		self.lock().push(call);
	}

	fn lock(&self) -> std::sync::MutexGuard<'_, Vec<BackendCall>> {
		self.calls.lock().unwrap_or_else(PoisonError::into_inner)
	}
}

impl FirebaseBackend for RecordingBackend {
	fn configure(&self, options: Option<FirebaseOptions>) {
		self.configured.store(true, Ordering::SeqCst);
		self.record(BackendCall::Configure { options });
	}

	fn is_configured(&self) -> bool {
		self.configured.load(Ordering::SeqCst)
	}

	fn set_deep_link_url_scheme(&self, scheme: &str) {
		self.record(BackendCall::SetDeepLinkUrlScheme {
			scheme: scheme.to_string(),
		});
	}

	fn set_user_id(&self, user_id: &str) {
		self.record(BackendCall::SetUserId {
			user_id: user_id.to_string(),
		});
	}

	fn set_user_property(&self, name: &str, value: &str) {
		self.record(BackendCall::SetUserProperty {
			name: name.to_string(),
			value: value.to_string(),
		});
	}

	fn log_event(&self, name: &str, parameters: Option<ParameterSet>) {
		self.record(BackendCall::LogEvent {
			name: name.to_string(),
			parameters,
		});
	}
}
