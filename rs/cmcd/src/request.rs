//! Attaching CMCD to an outgoing request.
//!
//! Deciding *which* keys to send (buffer levels, bitrate, stalls) is up to the player.
//! This module only covers the parts that don't depend on playback state:
//! the per-session keys and how the encoded result is added to a request.

use std::{collections::BTreeMap, str::FromStr};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Cmcd, Custom, CustomValue, Encoded, Error, QUERY_PARAM, StreamType, StreamingFormat, Version};

/// How CMCD is transmitted with a request.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
	/// Four `CMCD-*` HTTP headers.
	#[default]
	Headers,
	/// A single `CMCD` query parameter.
	Query,
}

impl FromStr for Mode {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"headers" => Ok(Self::Headers),
			"query" => Ok(Self::Query),
			_ => Err(Error::UnknownToken {
				kind: "mode",
				token: s.to_string(),
			}),
		}
	}
}

/// Per-session CMCD settings, usually loaded once from a config file.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	/// Sent as `sid` with every request, unless empty.
	pub session_id: Option<String>,

	/// Sent as `cid` with every request, unless empty.
	pub content_id: Option<String>,

	/// Sent as `st` with every request.
	pub stream_type: Option<StreamType>,

	/// Sent as `sf` with every request.
	pub streaming_format: Option<StreamingFormat>,

	/// Whether to use headers or a query parameter.
	pub mode: Mode,

	/// Custom keys appended to every request.
	///
	/// Keys should carry a hyphenated, reverse-DNS prefix, ex. `com.example-myKey`.
	/// We use a BTreeMap so the config serializes deterministically.
	pub custom: BTreeMap<String, CustomValue>,
}

impl Config {
	/// The items that are the same for every request in the session.
	pub fn items(&self) -> Vec<Cmcd> {
		let mut items = vec![Cmcd::Version(Version::default())];

		if let Some(id) = self.session_id.as_ref().filter(|id| !id.is_empty()) {
			items.push(Cmcd::SessionId(id.clone()));
		}

		if let Some(id) = self.content_id.as_ref().filter(|id| !id.is_empty()) {
			items.push(Cmcd::ContentId(id.clone()));
		}

		if let Some(st) = self.stream_type {
			items.push(Cmcd::StreamType(st));
		}

		if let Some(sf) = self.streaming_format {
			items.push(Cmcd::StreamingFormat(sf));
		}

		for (key, value) in &self.custom {
			let custom = Custom::new(key.clone(), value.clone());
			if !custom.is_prefixed() {
				tracing::warn!(key = %custom.key, "custom cmcd key should have a hyphenated prefix");
			}
			items.push(custom.into());
		}

		items
	}
}

/// Replace any `CMCD` query parameter in the URL with the encoded items.
///
/// Other query parameters are left untouched, including their encoding.
/// If every item was omitted, the URL is left without a `CMCD` parameter.
pub fn apply_query(url: &mut Url, encoded: &Encoded) {
	let mut pairs: Vec<String> = url
		.query()
		.unwrap_or_default()
		.split('&')
		.filter(|pair| !pair.is_empty())
		.filter(|pair| pair.split('=').next() != Some(QUERY_PARAM))
		.map(str::to_string)
		.collect();

	if !encoded.is_empty() {
		pairs.push(encoded.query());
	}

	match pairs.is_empty() {
		true => url.set_query(None),
		false => url.set_query(Some(&pairs.join("&"))),
	}
}
