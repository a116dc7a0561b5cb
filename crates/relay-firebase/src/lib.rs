// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Firebase Analytics destination for Relay.
//!
//! This crate translates Relay's vendor-neutral events into the vocabulary
//! Firebase Analytics expects and forwards them to a [`FirebaseBackend`].
//!
//! # Features
//!
//! - **Event name mapping**: semantic commerce events (`"Order Completed"`) become
//!   Firebase's canonical events (`purchase`); everything else is sanitized
//! - **Parameter mapping**: property keys are renamed recursively through nested
//!   objects and arrays reached via a mapped key
//! - **Name sanitization**: free-form names are forced into `[A-Za-z0-9_]{0,40}`
//! - **User properties**: identify traits are flattened to trimmed strings
//! - **Configure once**: the backend is configured on the first settings delivery
//!   and never again, even under concurrent updates
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use relay_destination_core::{DestinationPlugin, TrackEvent};
//! use relay_firebase::{BackendCall, FirebaseDestination, RecordingBackend};
//!
//! let backend = Arc::new(RecordingBackend::new());
//! let destination = FirebaseDestination::new(backend.clone());
//!
//! destination.track(TrackEvent::new("Order Completed").with_property("revenue", 42.0));
//!
//! let calls = backend.calls();
//! let BackendCall::LogEvent { name, parameters } = &calls[0] else {
//!     panic!("expected a logged event");
//! };
//! assert_eq!(name, "purchase");
//! assert_eq!(parameters.as_ref().unwrap()["value"], 42.0);
//! ```

pub mod backend;
pub mod config;
pub mod constants;
pub mod destination;
pub mod error;
pub mod parameters;
pub mod sanitize;
pub mod table;
pub mod traits;

pub use backend::{BackendCall, FirebaseBackend, RecordingBackend};
pub use config::{
	load_config, load_config_from_env, load_config_with_file, DestinationConfig, FirebaseOptions,
};
pub use destination::{FirebaseDestination, FirebaseDestinationBuilder, FIREBASE_KEY};
pub use error::{DestinationError, Result};
pub use parameters::{map_parameters, merge_parameters, ParameterSet};
pub use sanitize::{sanitize_name, try_sanitize_name, MAX_NAME_LEN};
pub use table::{MappingTable, MappingTables};
pub use traits::{stringify_traits, stringify_traits_to_vec};
