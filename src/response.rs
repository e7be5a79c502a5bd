//! HTTP Response
use crate::headers::HeaderMap;

/// HTTP Response head.
///
/// Default-constructed per exchange and populated progressively while the
/// status line and headers are parsed. The body is not stored here; it is
/// drained through [`Exchange::read_body`][crate::Exchange::read_body]
/// directly from the connection's receive buffer.
#[derive(Debug, Default)]
pub struct Response {
    status_code: u16,
    status_message: String,
    headers: HeaderMap,
}

impl Response {
    /// Create an empty [`Response`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the status code.
    #[inline]
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Returns the trimmed status message.
    #[inline]
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Returns shared reference to the headers.
    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub(crate) fn set_status(&mut self, code: u16, message: &str) {
        self.status_code = code;
        self.status_message = message.to_owned();
    }

    pub(crate) fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }
}
