use std::{fmt, str::FromStr};

use crate::{Error, Result};

/// The HTTP header a key is transmitted in.
///
/// Keys are grouped by how often their values are expected to change,
/// which lets intermediaries cache or compress the more stable headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
	/// Keys whose values vary with the object being requested.
	Object,
	/// Keys whose values vary with each request.
	Request,
	/// Keys whose values are expected to be invariant over the life of the session.
	Session,
	/// Keys whose values do not vary with every request or object.
	Status,
}

impl Category {
	pub const ALL: [Category; 4] = [Category::Object, Category::Request, Category::Session, Category::Status];

	/// The name of the HTTP header for this category.
	pub const fn header(self) -> &'static str {
		match self {
			Self::Object => "CMCD-Object",
			Self::Request => "CMCD-Request",
			Self::Session => "CMCD-Session",
			Self::Status => "CMCD-Status",
		}
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.header())
	}
}

/// How the value of a key is represented on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
	/// An integer, emitted as-is (kbps or milliseconds depending on the key).
	Integer,
	/// An integer rounded to the nearest 100 before it is emitted.
	Rounded,
	/// A flag; `true` is emitted as the bare key.
	Boolean,
	/// A quoted and escaped string, omitted when empty.
	String,
	/// An unquoted token from a fixed set.
	Token,
	/// A decimal number, emitted as-is.
	Number,
}

/// One of the standard keys defined by CMCD v1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
	EncodedBitrate,
	BufferLength,
	BufferStarvation,
	ContentId,
	ObjectDuration,
	Deadline,
	MeasuredThroughput,
	NextObjectRequest,
	NextRangeRequest,
	ObjectType,
	PlaybackRate,
	RequestedMaximumThroughput,
	StreamingFormat,
	SessionId,
	StreamType,
	Startup,
	TopBitrate,
	Version,
}

impl Key {
	/// Every standard key, in alphabetical order of their identifiers.
	pub const ALL: [Key; 18] = [
		Key::BufferLength,
		Key::EncodedBitrate,
		Key::BufferStarvation,
		Key::ContentId,
		Key::ObjectDuration,
		Key::Deadline,
		Key::MeasuredThroughput,
		Key::NextObjectRequest,
		Key::NextRangeRequest,
		Key::ObjectType,
		Key::PlaybackRate,
		Key::RequestedMaximumThroughput,
		Key::StreamingFormat,
		Key::SessionId,
		Key::StreamType,
		Key::Startup,
		Key::TopBitrate,
		Key::Version,
	];

	/// The identifier used on the wire.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::EncodedBitrate => "br",
			Self::BufferLength => "bl",
			Self::BufferStarvation => "bs",
			Self::ContentId => "cid",
			Self::ObjectDuration => "d",
			Self::Deadline => "dl",
			Self::MeasuredThroughput => "mtp",
			Self::NextObjectRequest => "nor",
			Self::NextRangeRequest => "nrr",
			Self::ObjectType => "ot",
			Self::PlaybackRate => "pr",
			Self::RequestedMaximumThroughput => "rtp",
			Self::StreamingFormat => "sf",
			Self::SessionId => "sid",
			Self::StreamType => "st",
			Self::Startup => "su",
			Self::TopBitrate => "tb",
			Self::Version => "v",
		}
	}

	/// The header this key is transmitted in.
	pub const fn category(self) -> Category {
		match self {
			Self::EncodedBitrate | Self::ObjectDuration | Self::ObjectType | Self::TopBitrate => Category::Object,
			Self::BufferLength
			| Self::Deadline
			| Self::MeasuredThroughput
			| Self::NextObjectRequest
			| Self::NextRangeRequest
			| Self::Startup => Category::Request,
			Self::ContentId
			| Self::PlaybackRate
			| Self::StreamingFormat
			| Self::SessionId
			| Self::StreamType
			| Self::Version => Category::Session,
			Self::BufferStarvation | Self::RequestedMaximumThroughput => Category::Status,
		}
	}

	/// The representation of this key's value.
	pub const fn kind(self) -> Kind {
		match self {
			Self::EncodedBitrate
			| Self::ObjectDuration
			| Self::RequestedMaximumThroughput
			| Self::TopBitrate
			| Self::Version => Kind::Integer,
			Self::BufferLength | Self::Deadline | Self::MeasuredThroughput => Kind::Rounded,
			Self::BufferStarvation | Self::Startup => Kind::Boolean,
			Self::ContentId | Self::NextObjectRequest | Self::NextRangeRequest | Self::SessionId => Kind::String,
			Self::ObjectType | Self::StreamingFormat | Self::StreamType => Kind::Token,
			Self::PlaybackRate => Kind::Number,
		}
	}
}

impl fmt::Display for Key {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Key {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		Key::ALL
			.into_iter()
			.find(|key| key.as_str() == s)
			.ok_or_else(|| Error::UnknownKey(s.to_string()))
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn identifiers() {
		for key in Key::ALL {
			assert_eq!(key.as_str().parse::<Key>(), Ok(key));
		}

		assert_eq!(
			"com.example-myKey".parse::<Key>(),
			Err(Error::UnknownKey("com.example-myKey".to_string()))
		);
	}

	#[test]
	fn sorted() {
		let ids: Vec<_> = Key::ALL.iter().map(|key| key.as_str()).collect();
		let mut sorted = ids.clone();
		sorted.sort();
		assert_eq!(ids, sorted);
	}

	#[test]
	fn categories() {
		let object: Vec<_> = Key::ALL
			.into_iter()
			.filter(|key| key.category() == Category::Object)
			.map(Key::as_str)
			.collect();
		assert_eq!(object, ["br", "d", "ot", "tb"]);

		let request: Vec<_> = Key::ALL
			.into_iter()
			.filter(|key| key.category() == Category::Request)
			.map(Key::as_str)
			.collect();
		assert_eq!(request, ["bl", "dl", "mtp", "nor", "nrr", "su"]);

		let session: Vec<_> = Key::ALL
			.into_iter()
			.filter(|key| key.category() == Category::Session)
			.map(Key::as_str)
			.collect();
		assert_eq!(session, ["cid", "pr", "sf", "sid", "st", "v"]);

		let status: Vec<_> = Key::ALL
			.into_iter()
			.filter(|key| key.category() == Category::Status)
			.map(Key::as_str)
			.collect();
		assert_eq!(status, ["bs", "rtp"]);
	}

	#[test]
	fn headers() {
		let names: Vec<_> = Category::ALL.iter().map(|c| c.header()).collect();
		assert_eq!(names, ["CMCD-Object", "CMCD-Request", "CMCD-Session", "CMCD-Status"]);
	}
}
