// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! A backend that prints every Firebase call as a JSON line.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use relay_firebase::{BackendCall, FirebaseBackend, FirebaseOptions, ParameterSet};
use tracing::warn;

pub struct StdoutBackend<W: Write + Send> {
	out: Mutex<W>,
	configured: AtomicBool,
}

impl StdoutBackend<std::io::Stdout> {
	pub fn stdout() -> Self {
		Self::new(std::io::stdout())
	}
}

impl<W: Write + Send> StdoutBackend<W> {
	pub fn new(out: W) -> Self {
		Self {
			out: Mutex::new(out),
			configured: AtomicBool::new(false),
		}
	}

	pub fn into_inner(self) -> W {
		self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
	}

	fn emit(&self, call: BackendCall) {
		let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
		let written = serde_json::to_writer(&mut *out, &call)
			.map_err(std::io::Error::from)
			.and_then(|()| writeln!(out));
		if let Err(error) = written {
			warn!(error = %error, "failed to write backend call");
		}
	}
}

impl<W: Write + Send> FirebaseBackend for StdoutBackend<W> {
	fn configure(&self, options: Option<FirebaseOptions>) {
		self.configured.store(true, Ordering::SeqCst);
		self.emit(BackendCall::Configure { options });
	}

	fn is_configured(&self) -> bool {
		self.configured.load(Ordering::SeqCst)
	}

	fn set_deep_link_url_scheme(&self, scheme: &str) {
		self.emit(BackendCall::SetDeepLinkUrlScheme {
			scheme: scheme.to_string(),
		});
	}

	fn set_user_id(&self, user_id: &str) {
		self.emit(BackendCall::SetUserId {
			user_id: user_id.to_string(),
		});
	}

	fn set_user_property(&self, name: &str, value: &str) {
		self.emit(BackendCall::SetUserProperty {
			name: name.to_string(),
			value: value.to_string(),
		});
	}

	fn log_event(&self, name: &str, parameters: Option<ParameterSet>) {
		self.emit(BackendCall::LogEvent {
			name: name.to_string(),
			parameters,
		});
	}
}
