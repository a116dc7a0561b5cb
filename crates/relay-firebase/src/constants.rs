// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Reserved Firebase Analytics event and parameter names.
//!
//! These are owned by the Firebase contract and already satisfy its name
//! grammar, so they are forwarded without sanitization.

/// Canonical Firebase event names.
pub mod event {
	pub const ADD_PAYMENT_INFO: &str = "add_payment_info";
	pub const ADD_TO_CART: &str = "add_to_cart";
	pub const ADD_TO_WISHLIST: &str = "add_to_wishlist";
	pub const BEGIN_CHECKOUT: &str = "begin_checkout";
	pub const PURCHASE: &str = "purchase";
	pub const REFUND: &str = "refund";
	pub const REMOVE_FROM_CART: &str = "remove_from_cart";
	pub const SCREEN_VIEW: &str = "screen_view";
	pub const SEARCH: &str = "search";
	pub const SELECT_ITEM: &str = "select_item";
	pub const SHARE: &str = "share";
	pub const VIEW_ITEM: &str = "view_item";
	pub const VIEW_ITEM_LIST: &str = "view_item_list";
	pub const VIEW_PROMOTION: &str = "view_promotion";
}

/// Canonical Firebase parameter names.
pub mod param {
	pub const CAMPAIGN: &str = "campaign";
	pub const CONTENT: &str = "content";
	pub const CURRENCY: &str = "currency";
	pub const ITEMS: &str = "items";
	pub const ITEM_BRAND: &str = "item_brand";
	pub const ITEM_CATEGORY: &str = "item_category";
	pub const ITEM_ID: &str = "item_id";
	pub const ITEM_NAME: &str = "item_name";
	pub const MEDIUM: &str = "medium";
	pub const QUANTITY: &str = "quantity";
	pub const SCREEN_NAME: &str = "screen_name";
	pub const SEARCH_TERM: &str = "search_term";
	pub const SHIPPING: &str = "shipping";
	pub const SOURCE: &str = "source";
	pub const TAX: &str = "tax";
	pub const TERM: &str = "term";
	pub const TRANSACTION_ID: &str = "transaction_id";
	pub const VALUE: &str = "value";
}
