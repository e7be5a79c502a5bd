use std::{fmt, str::FromStr};

use bytes::Bytes;

use super::HeaderError;

/// HTTP Header Value.
///
/// This API does not support non-ASCII values.
#[derive(Clone, PartialEq, Eq)]
pub struct HeaderValue {
    /// is ASCII
    bytes: Bytes,
}

impl HeaderValue {
    /// Create [`HeaderValue`] from static bytes.
    ///
    /// # Panics
    ///
    /// Panics if the input is not a valid header value.
    #[inline]
    pub const fn from_static(bytes: &'static [u8]) -> Self {
        assert!(validate_header_value(bytes), "invalid header value");
        Self { bytes: Bytes::from_static(bytes) }
    }

    /// Create [`HeaderValue`] from [`Bytes`].
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a valid header value.
    #[inline]
    pub fn from_bytes<B: Into<Bytes>>(value: B) -> Result<Self, HeaderError> {
        let bytes = value.into();
        if validate_header_value(&bytes) {
            Ok(Self { bytes })
        } else {
            Err(HeaderError::InvalidValue)
        }
    }

    /// Create [`HeaderValue`] by copying from a slice of bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a valid header value.
    #[inline]
    pub fn from_slice<A: AsRef<[u8]>>(value: A) -> Result<Self, HeaderError> {
        Self::from_bytes(Bytes::copy_from_slice(value.as_ref()))
    }

    /// Create [`HeaderValue`] from a string.
    ///
    /// # Panics
    ///
    /// Panics if the string contains an invalid character.
    #[inline]
    pub fn from_string<S: Into<String>>(value: S) -> HeaderValue {
        match Self::from_bytes(Bytes::from(value.into().into_bytes())) {
            Ok(value) => value,
            Err(_) => panic!("invalid header value"),
        }
    }

    /// Returns header value as a byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns header value as `str`.
    #[inline]
    pub fn as_str(&self) -> &str {
        // `bytes` is valid ASCII
        unsafe { str::from_utf8_unchecked(&self.bytes) }
    }
}

// ===== Parsing =====

const fn validate_header_value(mut bytes: &[u8]) -> bool {
    match bytes {
        // no leading SP / HTAB
        | [b' ' | b'\t', ..]
        // no trailing SP / HTAB
        | [.., b' ' | b'\t'] => return false,
        _ => {}
    }
    let mut ok = true;
    while let [byte, rest @ ..] = bytes {
        // visible ASCII, SP and HTAB
        ok &= matches!(*byte, b'\t' | b' '..=b'~');
        bytes = rest;
    }
    ok
}

// ===== Traits =====

impl fmt::Debug for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HeaderValue").field(&self.as_str()).finish()
    }
}

impl FromStr for HeaderValue {
    type Err = HeaderError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slice(s)
    }
}

impl PartialEq<str> for HeaderValue {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<[u8]> for HeaderValue {
    #[inline]
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl From<HeaderValue> for Bytes {
    #[inline]
    fn from(value: HeaderValue) -> Self {
        value.bytes
    }
}
