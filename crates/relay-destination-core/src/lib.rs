// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for Relay analytics destinations.
//!
//! This crate provides the host-facing half of a destination integration:
//!
//! - [`Event`]: the vendor-neutral identify/track/screen event model
//! - [`Settings`]: per-integration settings delivered by the host
//! - [`DestinationPlugin`]: the contract every destination implements
//! - [`Pipeline`]: an ordered list of plugins that events are threaded through
//!
//! Destination crates (for example `relay-firebase`) depend on this crate and
//! implement [`DestinationPlugin`]; hosts build a [`Pipeline`] and feed events in.
//!
//! # Example
//!
//! ```
//! use relay_destination_core::{Event, Pipeline, TrackEvent};
//!
//! let pipeline = Pipeline::new();
//! let event = Event::Track(TrackEvent::new("Order Completed"));
//!
//! // With no plugins registered the event comes straight back.
//! assert_eq!(pipeline.process(event.clone()), Some(event));
//! ```

pub mod error;
pub mod event;
pub mod pipeline;
pub mod plugin;
pub mod settings;

pub use error::{CoreError, Result};
pub use event::{Event, EventKind, IdentifyEvent, ScreenEvent, TrackEvent};
pub use pipeline::Pipeline;
pub use plugin::{DestinationPlugin, PluginType, UpdateType};
pub use settings::Settings;

/// A JSON object, the shape of event properties, traits and context.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;
