//! Rendering a single item as a `key` or `key=value` fragment.

use crate::{Cmcd, CustomValue, Version};

impl Cmcd {
	/// Render this item as a fragment, or `None` if it should be omitted entirely.
	///
	/// - `true` booleans are sent as the bare key; `false` is sent explicitly.
	/// - `pr=1` and the default version are omitted.
	/// - Strings are quoted and escaped; empty strings are omitted.
	/// - `bl`, `dl` and `mtp` are rounded to the nearest 100.
	/// - Tokens and numbers are sent as-is.
	pub fn fragment(&self) -> Option<String> {
		let key = self.key();

		let value = match self {
			Self::BufferStarvation(true) | Self::Startup(true) => return Some(key.to_string()),
			Self::BufferStarvation(false) | Self::Startup(false) => false.to_string(),

			Self::PlaybackRate(rate) if *rate == 1.0 => return omit(key),
			Self::PlaybackRate(rate) => number(*rate),

			// Only the default version exists, and it's never sent.
			Self::Version(Version::V1) => return omit(key),

			Self::ContentId(value)
			| Self::NextObjectRequest(value)
			| Self::NextRangeRequest(value)
			| Self::SessionId(value) => quote(value).or_else(|| omit(key))?,

			Self::BufferLength(value) | Self::Deadline(value) | Self::MeasuredThroughput(value) => round(*value).to_string(),

			Self::EncodedBitrate(value)
			| Self::ObjectDuration(value)
			| Self::RequestedMaximumThroughput(value)
			| Self::TopBitrate(value) => value.to_string(),

			Self::ObjectType(token) => token.to_string(),
			Self::StreamingFormat(token) => token.to_string(),
			Self::StreamType(token) => token.to_string(),

			Self::Custom(custom) => match &custom.value {
				CustomValue::Number(value) => number(*value),
				CustomValue::String(value) => quote(value).or_else(|| omit(key))?,
			},
		};

		Some(format!("{key}={value}"))
	}
}

fn omit(key: &str) -> Option<String> {
	tracing::trace!(key, "omitting cmcd key");
	None
}

/// Print a number, without the sign of a negative zero.
fn number(value: f64) -> String {
	match value == 0.0 {
		true => "0".to_string(),
		false => value.to_string(),
	}
}

/// Quote a string value, escaping backslashes and then double quotes.
///
/// Returns `None` for an empty string.
fn quote(value: &str) -> Option<String> {
	if value.is_empty() {
		return None;
	}

	let mut quoted = String::with_capacity(value.len() + 2);
	quoted.push('"');

	for c in value.chars() {
		match c {
			'\\' => quoted.push_str("\\\\"),
			'"' => quoted.push_str("\\\""),
			c => quoted.push(c),
		}
	}

	quoted.push('"');
	Some(quoted)
}

/// Round to the nearest 100, with halves rounding up.
fn round(value: u64) -> u64 {
	value.saturating_add(50) / 100 * 100
}
