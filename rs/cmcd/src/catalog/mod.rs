//! The catalog of standard CMCD keys.
//!
//! Every standard key belongs to exactly one header [`Category`] and carries exactly one value [`Kind`].
//! This mapping is defined by CTA-5004 and is not configurable.

mod key;
mod token;

pub use key::*;
pub use token::*;
