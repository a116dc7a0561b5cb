// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The canned events fired by `relay-firebase-demo sample`.

use relay_destination_core::{Event, IdentifyEvent, JsonMap, ScreenEvent, TrackEvent};
use serde_json::{json, Value};

fn object(value: Value) -> JsonMap {
	match value {
		Value::Object(map) => map,
		_ => JsonMap::new(),
	}
}

/// Events in the order a user would trigger them in the sample app.
pub fn sample_events() -> Vec<Event> {
	vec![
		TrackEvent::new("onAppear").into(),
		TrackEvent::new("Track").into(),
		ScreenEvent::new("Screen appeared").into(),
		IdentifyEvent::new()
			.with_user_id("X-1234567890")
			.with_trait("Last Name", "Smith ")
			.with_trait("Score", 5)
			.into(),
		TrackEvent::new("Order Completed")
			.with_properties(object(json!({
				"order_id": "o-1001",
				"revenue": 59.9,
				"currency": "EUR",
				"products": [
					{"product_id": "A1", "name": "Trail Shoe", "price": 49.9, "quantity": 1}
				]
			})))
			.with_context(object(json!({
				"campaign": {"source": "newsletter", "medium": "email", "name": "spring_sale"}
			})))
			.into(),
		TrackEvent::new("onDisappear").into(),
	]
}

#[cfg(test)]
mod tests {
	use super::*;
	use relay_destination_core::EventKind;

	#[test]
	fn covers_every_event_kind() {
		let kinds: Vec<_> = sample_events().iter().map(Event::kind).collect();
		assert!(kinds.contains(&EventKind::Identify));
		assert!(kinds.contains(&EventKind::Track));
		assert!(kinds.contains(&EventKind::Screen));
	}

	#[test]
	fn order_carries_campaign_context() {
		let events = sample_events();
		let order = events
			.iter()
			.find_map(|e| match e {
				Event::Track(t) if t.event == "Order Completed" => Some(t),
				_ => None,
			})
			.unwrap();
		assert_eq!(order.campaign().unwrap()["source"], "newsletter");
	}
}
