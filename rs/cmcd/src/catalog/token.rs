use std::{fmt, str::FromStr};

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// The media type of the object being requested (`ot`).
///
/// If the object type is unknown, the key should not be sent at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum ObjectType {
	/// A text file, such as a manifest or playlist.
	#[serde(rename = "m")]
	#[display("m")]
	Manifest,
	#[serde(rename = "a")]
	#[display("a")]
	AudioOnly,
	#[serde(rename = "v")]
	#[display("v")]
	VideoOnly,
	#[serde(rename = "av")]
	#[display("av")]
	MuxedAudioVideo,
	#[serde(rename = "i")]
	#[display("i")]
	InitSegment,
	#[serde(rename = "c")]
	#[display("c")]
	CaptionOrSubtitle,
	/// An ISOBMFF timed text track.
	#[serde(rename = "tt")]
	#[display("tt")]
	TimedTextTrack,
	/// A cryptographic key, license or certificate.
	#[serde(rename = "k")]
	#[display("k")]
	Key,
	#[serde(rename = "o")]
	#[display("o")]
	Other,
}

impl FromStr for ObjectType {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		Ok(match s {
			"m" => Self::Manifest,
			"a" => Self::AudioOnly,
			"v" => Self::VideoOnly,
			"av" => Self::MuxedAudioVideo,
			"i" => Self::InitSegment,
			"c" => Self::CaptionOrSubtitle,
			"tt" => Self::TimedTextTrack,
			"k" => Self::Key,
			"o" => Self::Other,
			_ => return Err(unknown("object type", s)),
		})
	}
}

/// The streaming format of the current request (`sf`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum StreamingFormat {
	#[serde(rename = "d")]
	#[display("d")]
	Dash,
	#[serde(rename = "h")]
	#[display("h")]
	Hls,
	#[serde(rename = "s")]
	#[display("s")]
	Smooth,
	#[serde(rename = "o")]
	#[display("o")]
	Other,
}

impl FromStr for StreamingFormat {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		Ok(match s {
			"d" => Self::Dash,
			"h" => Self::Hls,
			"s" => Self::Smooth,
			"o" => Self::Other,
			_ => return Err(unknown("streaming format", s)),
		})
	}
}

/// Whether all segments are available up front (`st`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum StreamType {
	/// All segments are available, ex. VOD.
	#[serde(rename = "v")]
	#[display("v")]
	Vod,
	/// Segments become available over time, ex. LIVE.
	#[serde(rename = "l")]
	#[display("l")]
	Live,
}

impl FromStr for StreamType {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		Ok(match s {
			"v" => Self::Vod,
			"l" => Self::Live,
			_ => return Err(unknown("stream type", s)),
		})
	}
}

/// The version of CMCD used to interpret the keys (`v`).
///
/// If omitted, the server must assume version 1, so the default is never sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive, Serialize, Deserialize)]
#[repr(u8)]
#[num_enum(error_type(name = Error, constructor = Error::UnsupportedVersion))]
#[serde(try_from = "u8", into = "u8")]
pub enum Version {
	V1 = 1,
}

impl Default for Version {
	fn default() -> Self {
		Version::V1
	}
}

impl fmt::Display for Version {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		u8::from(*self).fmt(f)
	}
}

impl FromStr for Version {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		let v: u8 = s.parse().map_err(|_| unknown("version", s))?;
		Version::try_from(v)
	}
}

fn unknown(kind: &'static str, token: &str) -> Error {
	Error::UnknownToken {
		kind,
		token: token.to_string(),
	}
}
