//! Ordered, case-insensitive HTTP header container.
//!
//! [`HeaderMap`] keeps headers in insertion order, which is observable on
//! the wire: request heads are serialized by iterating the map. Names are
//! normalized to lowercase at construction, so lookups are ASCII
//! case-insensitive.
use std::fmt;

mod map;
mod name;
mod value;

pub use map::{HeaderMap, Iter};
pub use name::HeaderName;
pub use value::HeaderValue;

/// Standard header names used by the engine.
pub mod standard {
    use super::HeaderName;

    pub const HOST: HeaderName = HeaderName::from_lowercase_static("host");
    pub const CONNECTION: HeaderName = HeaderName::from_lowercase_static("connection");
    pub const CONTENT_LENGTH: HeaderName = HeaderName::from_lowercase_static("content-length");
    pub const TRANSFER_ENCODING: HeaderName = HeaderName::from_lowercase_static("transfer-encoding");
}

// ===== Error =====

/// Header parsing error.
#[derive(Debug, PartialEq, Eq)]
pub enum HeaderError {
    /// Invalid character in header name.
    InvalidName,
    /// Invalid character in header value.
    InvalidValue,
    /// Header line has no `:` separator.
    InvalidLine,
}

impl std::error::Error for HeaderError {}

impl fmt::Display for HeaderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidName => f.write_str("invalid header name"),
            Self::InvalidValue => f.write_str("invalid header value"),
            Self::InvalidLine => f.write_str("invalid header line"),
        }
    }
}
