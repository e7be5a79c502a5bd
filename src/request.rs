//! HTTP Request
use bytes::Bytes;

use crate::{
    headers::{HeaderMap, HeaderName, HeaderValue},
    method::Method,
    uri::Uri,
};

/// HTTP Request.
///
/// Describes one exchange: method, target [`Uri`], headers and body
/// content with its length known up front. Once handed to
/// [`HttpClient::execute`][crate::HttpClient::execute] the engine owns it
/// and may set or override the `Host` and `Content-Length` headers before
/// transmission.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    content: Bytes,
}

impl Request {
    /// Create a [`Request`] with the given method and target.
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            method,
            uri,
            headers: HeaderMap::new(),
            content: Bytes::new(),
        }
    }

    /// Create a bodyless `GET` request.
    #[inline]
    pub fn get(uri: Uri) -> Self {
        Self::new(Method::GET, uri)
    }

    /// Create a `POST` request with the given content.
    #[inline]
    pub fn post(uri: Uri, content: impl Into<Bytes>) -> Self {
        Self::new(Method::POST, uri).with_content(content)
    }

    /// Append a header, builder style.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Set the body content, builder style.
    pub fn with_content(mut self, content: impl Into<Bytes>) -> Self {
        self.content = content.into();
        self
    }

    /// Returns the method.
    #[inline]
    pub fn method(&self) -> Method {
        self.method
    }

    /// Returns the target URI.
    #[inline]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Returns shared reference to the headers.
    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns mutable reference to the headers.
    #[inline]
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Returns the body content.
    #[inline]
    pub fn content(&self) -> &Bytes {
        &self.content
    }
}
