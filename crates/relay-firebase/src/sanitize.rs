// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Name sanitization into Firebase's identifier grammar.
//!
//! Firebase accepts event and parameter names made of ASCII letters, digits and
//! underscores, at most 40 characters long. [`sanitize_name`] forces any string
//! into that shape:
//!
//! 1. surrounding spaces and tabs are trimmed; line breaks are kept
//! 2. every character outside `[A-Za-z0-9_]` becomes `_` (one per character, so
//!    non-ASCII letters are replaced too)
//! 3. the result is cut to the first 40 characters

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::error::Result;

/// Maximum length of a Firebase event or parameter name.
pub const MAX_NAME_LEN: usize = 40;

static DISALLOWED_CHARS: LazyLock<std::result::Result<Regex, regex::Error>> =
	LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9_]"));

/// Sanitizes `name`, reporting a pattern failure to the caller.
pub fn try_sanitize_name(name: &str) -> Result<String> {
	let pattern = DISALLOWED_CHARS.as_ref().map_err(Clone::clone)?;
	Ok(apply(pattern, name))
}

/// Sanitizes `name` into `[A-Za-z0-9_]{0,40}`.
///
/// Never fails: if the pattern is unusable the failure is logged and `name` is
/// returned as given.
pub fn sanitize_name(name: &str) -> String {
	sanitize_with(DISALLOWED_CHARS.as_ref(), name)
}

fn sanitize_with(pattern: std::result::Result<&Regex, &regex::Error>, name: &str) -> String {
	match pattern {
		Ok(pattern) => apply(pattern, name),
		Err(error) => {
			warn!(error = %error, name, "could not sanitize name for Firebase, using it unchanged");
			name.to_string()
		}
	}
}

fn apply(pattern: &Regex, name: &str) -> String {
	let replaced = pattern.replace_all(name.trim_matches(is_inline_whitespace), "_");
	replaced.chars().take(MAX_NAME_LEN).collect()
}

/// Whitespace other than line breaks. Leading or trailing newlines survive the
/// trim and are replaced like any other disallowed character.
fn is_inline_whitespace(c: char) -> bool {
	c.is_whitespace()
		&& !matches!(
			c,
			'\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
		)
}
