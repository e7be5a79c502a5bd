use std::{borrow::Cow, fmt, str::FromStr};

use super::HeaderError;

/// HTTP Header Name.
///
/// Normalized to lowercase at construction, so comparisons are plain
/// byte equality.
#[derive(Clone, PartialEq, Eq)]
pub struct HeaderName {
    /// lowercase token
    value: Cow<'static, str>,
}

impl HeaderName {
    /// Create [`HeaderName`] from a static string that is already a
    /// lowercase token.
    ///
    /// For runtime input use [`from_slice`][HeaderName::from_slice].
    ///
    /// # Panics
    ///
    /// Panics if the input is not a valid lowercase header name.
    pub const fn from_lowercase_static(value: &'static str) -> Self {
        let mut bytes = value.as_bytes();
        while let [byte, rest @ ..] = bytes {
            assert!(
                is_token_byte(*byte) && !byte.is_ascii_uppercase(),
                "static header name must be a lowercase token",
            );
            bytes = rest;
        }
        assert!(!value.is_empty(), "static header name must not be empty");
        Self { value: Cow::Borrowed(value) }
    }

    /// Parse [`HeaderName`] by copying from a slice of bytes, normalizing
    /// to lowercase.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a valid header name token.
    pub fn from_slice(src: &[u8]) -> Result<Self, HeaderError> {
        if src.is_empty() || !src.iter().all(|&b| is_token_byte(b)) {
            return Err(HeaderError::InvalidName);
        }
        // token bytes are ASCII
        let mut value = String::from_utf8_lossy(src).into_owned();
        value.make_ascii_lowercase();
        Ok(Self { value: Cow::Owned(value) })
    }

    /// Returns the lowercase name as `str`.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

// https://datatracker.ietf.org/doc/html/rfc9110#section-5.6.2
const fn is_token_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
        || matches!(
            byte,
            b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.' | b'^' | b'_'
                | b'`' | b'|' | b'~'
        )
}

// ===== Traits =====

impl fmt::Debug for HeaderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for HeaderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeaderName {
    type Err = HeaderError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slice(s.as_bytes())
    }
}

impl AsRef<str> for HeaderName {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for HeaderName {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.value.as_bytes().eq_ignore_ascii_case(other.as_bytes())
    }
}
