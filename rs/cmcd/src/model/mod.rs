//! The metadata items attached to a request.
//!
//! Items are built fresh for every request and discarded once encoded.

mod custom;
mod item;
mod parse;

pub use custom::*;
pub use item::*;
