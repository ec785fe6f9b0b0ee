use std::str::FromStr;

use crate::{Cmcd, Custom, CustomValue, Error, Key, Result};

/// Parse an item from `key` or `key=value`.
///
/// This is the unquoted, human form used on the command line: string values may
/// optionally be wrapped in double quotes, and a bare boolean key means `true`.
/// Identifiers that aren't standard keys become [`Custom`] items.
impl FromStr for Cmcd {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		let (name, value) = match s.split_once('=') {
			Some((name, value)) => (name.trim(), Some(value.trim())),
			None => (s.trim(), None),
		};

		match name.parse::<Key>() {
			Ok(key) => parse_standard(key, value),
			Err(_) if name.is_empty() => Err(Error::UnknownKey(s.to_string())),
			Err(_) => {
				let value = value.ok_or_else(|| Error::MissingValue(name.to_string()))?;
				Ok(Cmcd::Custom(Custom::new(name, parse_custom(value))))
			}
		}
	}
}

fn parse_standard(key: Key, value: Option<&str>) -> Result<Cmcd> {
	// A bare boolean key means true, like it does on the wire.
	let Some(value) = value else {
		return match key {
			Key::BufferStarvation => Ok(Cmcd::BufferStarvation(true)),
			Key::Startup => Ok(Cmcd::Startup(true)),
			_ => Err(Error::MissingValue(key.to_string())),
		};
	};

	let invalid = || Error::InvalidValue {
		key: key.to_string(),
		value: value.to_string(),
	};

	let integer = || value.parse::<u64>().map_err(|_| invalid());
	let boolean = || value.parse::<bool>().map_err(|_| invalid());
	let string = || unquote(value).to_string();

	Ok(match key {
		Key::EncodedBitrate => Cmcd::EncodedBitrate(integer()?),
		Key::BufferLength => Cmcd::BufferLength(integer()?),
		Key::BufferStarvation => Cmcd::BufferStarvation(boolean()?),
		Key::ContentId => Cmcd::ContentId(string()),
		Key::ObjectDuration => Cmcd::ObjectDuration(integer()?),
		Key::Deadline => Cmcd::Deadline(integer()?),
		Key::MeasuredThroughput => Cmcd::MeasuredThroughput(integer()?),
		Key::NextObjectRequest => Cmcd::NextObjectRequest(string()),
		Key::NextRangeRequest => Cmcd::NextRangeRequest(string()),
		Key::ObjectType => Cmcd::ObjectType(value.parse()?),
		Key::PlaybackRate => match value.parse::<f64>() {
			Ok(rate) if rate.is_finite() => Cmcd::PlaybackRate(rate),
			_ => return Err(invalid()),
		},
		Key::RequestedMaximumThroughput => Cmcd::RequestedMaximumThroughput(integer()?),
		Key::StreamingFormat => Cmcd::StreamingFormat(value.parse()?),
		Key::SessionId => Cmcd::SessionId(string()),
		Key::StreamType => Cmcd::StreamType(value.parse()?),
		Key::Startup => Cmcd::Startup(boolean()?),
		Key::TopBitrate => Cmcd::TopBitrate(integer()?),
		Key::Version => Cmcd::Version(value.parse()?),
	})
}

fn parse_custom(value: &str) -> CustomValue {
	match value.parse::<f64>() {
		Ok(number) if number.is_finite() => CustomValue::Number(number),
		_ => CustomValue::String(unquote(value).to_string()),
	}
}

fn unquote(value: &str) -> &str {
	value
		.strip_prefix('"')
		.and_then(|v| v.strip_suffix('"'))
		.unwrap_or(value)
}
