//! # cmcd: Common Media Client Data
//!
//! `cmcd` encodes the metadata a media player attaches to its segment and
//! manifest requests, as defined by CTA-5004 (CMCD v1). A CDN can use these
//! signals (buffer length, bitrate, session id, ...) to make better delivery
//! decisions.
//!
//! ## Overview
//!
//! - **Catalog**: The fixed set of standard keys, their header [`Category`] and value [`Kind`].
//! - **Model**: A [`Cmcd`] item per key, plus [`Custom`] keys for vendor extensions.
//! - **Format**: Each item renders to a `key` or `key=value` fragment, or is omitted.
//! - **Encode**: Items are sorted by key and rendered as [`Headers`] or a single `CMCD=` query parameter.
//! - **Request**: Helpers to attach the result to an outgoing request [`Url`](url::Url).
//!
//! ```
//! use cmcd::{Cmcd, ObjectType};
//!
//! let items = [
//! 	Cmcd::EncodedBitrate(500),
//! 	Cmcd::BufferLength(0),
//! 	Cmcd::BufferStarvation(true),
//! 	Cmcd::ObjectType(ObjectType::VideoOnly),
//! ];
//!
//! assert_eq!(cmcd::to_query(&items), "CMCD=bl%3D0%2Cbr%3D500%2Cbs%2Cot%3Dv");
//! ```
//!
//! The JSON encoding of CMCD is not supported, only HTTP headers and query parameters.
mod encode;
mod error;
mod format;
mod request;

pub mod catalog;
pub mod model;

pub use catalog::*;
pub use encode::*;
pub use error::*;
pub use model::*;
pub use request::*;
