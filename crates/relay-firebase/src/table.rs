// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Name mapping tables.
//!
//! A [`MappingTable`] is an immutable `source → destination` lookup. Three tables
//! drive the Firebase destination:
//!
//! | Table | Source vocabulary | Example |
//! |-------|-------------------|---------|
//! | events | semantic event names | `Order Completed` → `purchase` |
//! | properties | event property keys | `product_id` → `item_id` |
//! | campaign | `context.campaign` keys | `name` → `campaign` |
//!
//! Tables iterate in source-key order, which fixes the outcome when two source
//! keys share a destination: the later source key wins.

use std::collections::BTreeMap;

use relay_destination_core::JsonMap;

use crate::constants::{event, param};
use crate::parameters::{map_parameters, ParameterSet};
use crate::sanitize::sanitize_name;

/// An immutable `source → destination` name table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
	entries: BTreeMap<String, String>,
}

impl MappingTable {
	/// Builds a table from `(source, destination)` pairs. A repeated source keeps
	/// its last destination.
	pub fn from_pairs<I, K, V>(pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			entries: pairs
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}

	pub fn get(&self, source: &str) -> Option<&str> {
		self.entries.get(source).map(String::as_str)
	}

	pub fn contains(&self, source: &str) -> bool {
		self.entries.contains_key(source)
	}

	/// Iterates `(source, destination)` pairs in source-key order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self
			.entries
			.iter()
			.map(|(k, v)| (k.as_str(), v.as_str()))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Semantic event names to Firebase's canonical events.
	pub fn firebase_events() -> Self {
		Self::from_pairs([
			("Product Clicked", event::SELECT_ITEM),
			("Product Viewed", event::VIEW_ITEM),
			("Product Added", event::ADD_TO_CART),
			("Product Removed", event::REMOVE_FROM_CART),
			("Checkout Started", event::BEGIN_CHECKOUT),
			("Promotion Viewed", event::VIEW_PROMOTION),
			("Payment Info Entered", event::ADD_PAYMENT_INFO),
			("Order Completed", event::PURCHASE),
			("Order Refunded", event::REFUND),
			("Product List Viewed", event::VIEW_ITEM_LIST),
			("Product Added to Wishlist", event::ADD_TO_WISHLIST),
			("Product Shared", event::SHARE),
			("Cart Shared", event::SHARE),
			("Products Searched", event::SEARCH),
		])
	}

	/// Event property keys to Firebase parameters.
	pub fn firebase_properties() -> Self {
		Self::from_pairs([
			("products", param::ITEMS),
			("category", param::ITEM_CATEGORY),
			("product_id", param::ITEM_ID),
			("name", param::ITEM_NAME),
			("brand", param::ITEM_BRAND),
			("price", param::VALUE),
			("quantity", param::QUANTITY),
			("query", param::SEARCH_TERM),
			("shipping", param::SHIPPING),
			("tax", param::TAX),
			("total", param::VALUE),
			("revenue", param::VALUE),
			("order_id", param::TRANSACTION_ID),
			("currency", param::CURRENCY),
		])
	}

	/// Campaign attribution keys to Firebase parameters.
	pub fn firebase_campaign() -> Self {
		Self::from_pairs([
			("source", param::SOURCE),
			("medium", param::MEDIUM),
			("name", param::CAMPAIGN),
			("term", param::TERM),
			("content", param::CONTENT),
		])
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MappingTable {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self::from_pairs(iter)
	}
}

/// The three tables a destination maps with, built once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingTables {
	pub events: MappingTable,
	pub properties: MappingTable,
	pub campaign: MappingTable,
}

impl MappingTables {
	pub fn firebase() -> Self {
		Self {
			events: MappingTable::firebase_events(),
			properties: MappingTable::firebase_properties(),
			campaign: MappingTable::firebase_campaign(),
		}
	}

	/// Resolves an event name: canonical name on an exact match, otherwise the
	/// sanitized input.
	pub fn map_event_name(&self, name: &str) -> String {
		match self.events.get(name) {
			Some(canonical) => canonical.to_string(),
			None => sanitize_name(name),
		}
	}

	pub fn map_properties(&self, properties: &JsonMap) -> ParameterSet {
		map_parameters(properties, &self.properties)
	}

	pub fn map_campaign(&self, campaign: &JsonMap) -> ParameterSet {
		map_parameters(campaign, &self.campaign)
	}
}

impl Default for MappingTables {
	fn default() -> Self {
		Self::firebase()
	}
}
