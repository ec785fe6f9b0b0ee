use percent_encoding::utf8_percent_encode;

use crate::{Category, Custom, Key, ObjectType, StreamType, StreamingFormat, Version, encode::COMPONENT};

/// A single CMCD data point.
///
/// There is one variant per standard key, so the value type and header are fixed by the variant.
/// Vendor extensions use [`Cmcd::Custom`] and are always sent in the session header.
#[derive(Debug, Clone, PartialEq)]
pub enum Cmcd {
	/// `br`: The encoded bitrate of the audio or video object, in kbps.
	///
	/// If the playlist declares both peak and average bitrate values, the peak should be sent.
	EncodedBitrate(u64),

	/// `bl`: The buffer length associated with the object, in milliseconds.
	///
	/// Rounded to the nearest 100ms when encoded.
	/// Should only be sent with an object type of `a`, `v` or `av`.
	BufferLength(u64),

	/// `bs`: The buffer was starved at some point since the prior request.
	BufferStarvation(bool),

	/// `cid`: A unique identifier for the current content, at most 64 characters.
	ContentId(String),

	/// `d`: The playback duration of the object, in milliseconds.
	///
	/// For partial segments this is the duration of the part, not the parent segment.
	ObjectDuration(u64),

	/// `dl`: The time until the first sample of this object is needed to avoid a stall, in milliseconds.
	///
	/// Rounded to the nearest 100ms when encoded.
	Deadline(u64),

	/// `mtp`: The throughput between client and server as measured by the client, in kbps.
	///
	/// Rounded to the nearest 100kbps when encoded.
	MeasuredThroughput(u64),

	/// `nor`: The path of the next object to be requested, relative to the current request.
	///
	/// This value must already be URL-encoded, see [`Cmcd::next_object_request`].
	NextObjectRequest(String),

	/// `nrr`: The byte range of the next partial request, ex. `12323-48763`.
	NextRangeRequest(String),

	/// `ot`: The media type of the object being requested.
	ObjectType(ObjectType),

	/// `pr`: The playback rate; 1 for real-time, 2 for double speed, 0 if not playing.
	///
	/// Omitted when 1.
	PlaybackRate(f64),

	/// `rtp`: The maximum throughput the client considers sufficient for this object, in kbps.
	RequestedMaximumThroughput(u64),

	/// `sf`: The streaming format of the current request.
	StreamingFormat(StreamingFormat),

	/// `sid`: A GUID identifying the current playback session, at most 64 characters.
	SessionId(String),

	/// `st`: Whether the stream is VOD or live.
	StreamType(StreamType),

	/// `su`: The object is needed urgently due to startup, seeking or recovery after a stall.
	Startup(bool),

	/// `tb`: The highest bitrate rendition the client is allowed to play, in kbps.
	TopBitrate(u64),

	/// `v`: The CMCD version; omitted when it's the default.
	Version(Version),

	/// A non-standard key, see [`Custom`].
	Custom(Custom),
}

impl Cmcd {
	/// The standard key for this item, or `None` for a custom key.
	pub fn standard_key(&self) -> Option<Key> {
		Some(match self {
			Self::EncodedBitrate(_) => Key::EncodedBitrate,
			Self::BufferLength(_) => Key::BufferLength,
			Self::BufferStarvation(_) => Key::BufferStarvation,
			Self::ContentId(_) => Key::ContentId,
			Self::ObjectDuration(_) => Key::ObjectDuration,
			Self::Deadline(_) => Key::Deadline,
			Self::MeasuredThroughput(_) => Key::MeasuredThroughput,
			Self::NextObjectRequest(_) => Key::NextObjectRequest,
			Self::NextRangeRequest(_) => Key::NextRangeRequest,
			Self::ObjectType(_) => Key::ObjectType,
			Self::PlaybackRate(_) => Key::PlaybackRate,
			Self::RequestedMaximumThroughput(_) => Key::RequestedMaximumThroughput,
			Self::StreamingFormat(_) => Key::StreamingFormat,
			Self::SessionId(_) => Key::SessionId,
			Self::StreamType(_) => Key::StreamType,
			Self::Startup(_) => Key::Startup,
			Self::TopBitrate(_) => Key::TopBitrate,
			Self::Version(_) => Key::Version,
			Self::Custom(_) => return None,
		})
	}

	/// The key as it appears on the wire.
	pub fn key(&self) -> &str {
		match self {
			Self::Custom(custom) => &custom.key,
			_ => self.standard_key().map(Key::as_str).unwrap_or_default(),
		}
	}

	/// The header this item is sent in.
	pub fn category(&self) -> Category {
		self.standard_key().map(Key::category).unwrap_or(Category::Session)
	}

	/// Create a `nor` item from a relative path, URL-encoding it.
	///
	/// Use [`Cmcd::NextObjectRequest`] directly if the path is already encoded.
	pub fn next_object_request(path: &str) -> Self {
		Self::NextObjectRequest(utf8_percent_encode(path, COMPONENT).to_string())
	}

	/// Create a custom item, see [`Custom::new`].
	pub fn custom(key: impl Into<String>, value: impl Into<crate::CustomValue>) -> Self {
		Self::Custom(Custom::new(key, value))
	}
}

impl From<Custom> for Cmcd {
	fn from(custom: Custom) -> Self {
		Self::Custom(custom)
	}
}
