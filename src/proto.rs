//! HTTP/1.1 wire logic.
//!
//! Request-head serialization, response-head parsing and body framing
//! resolution. Everything here is synchronous; the engine in
//! [`client`][crate::client] feeds it from the transport.
use bytes::BytesMut;

use crate::error::ParseError;
use crate::headers::standard::{CONNECTION, CONTENT_LENGTH, HOST, TRANSFER_ENCODING};
use crate::headers::{HeaderMap, HeaderValue};
use crate::log::debug;
use crate::request::Request;
use crate::response::Response;

/// Reconcile header defaults before serialization.
///
/// `Host` is always set from the URI; `Content-Length` is set to the body
/// size unless the caller asked for a chunked transfer encoding.
pub(crate) fn reconcile_headers(request: &mut Request) {
    // host bytes passed uri validation, a strict subset of valid header
    // value bytes, so `from_string` cannot panic here
    let host = HeaderValue::from_string(request.uri().host().to_owned());
    request.headers_mut().insert(HOST, host);

    let chunked = request
        .headers()
        .get(TRANSFER_ENCODING)
        .is_some_and(|value| contains_ignore_case(value.as_str(), "chunked"));

    if !chunked {
        // itoa output is ASCII digits
        let length = itoa::Buffer::new().format(request.content().len()).to_owned();
        request
            .headers_mut()
            .insert(CONTENT_LENGTH, HeaderValue::from_string(length));
    }
}

/// Serialize the request line and header block, blank line included.
pub(crate) fn write_request_head(request: &Request, buf: &mut BytesMut) {
    buf.reserve(128);

    buf.extend_from_slice(request.method().as_str().as_bytes());
    buf.extend_from_slice(b" ");
    buf.extend_from_slice(request.uri().path().as_bytes());
    buf.extend_from_slice(b" HTTP/1.1\r\n");

    for (name, value) in request.headers() {
        buf.extend_from_slice(name.as_str().as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(value.as_bytes());
        buf.extend_from_slice(b"\r\n");
        debug!("header: {name} -> {value:?}");
    }
    buf.extend_from_slice(b"\r\n");
}

/// Parse the status line and header block into `response`.
///
/// `head` is the response head without the `\r\n\r\n` terminator.
pub(crate) fn parse_response_head(head: &[u8], response: &mut Response) -> Result<(), ParseError> {
    let text = str::from_utf8(head).map_err(|_| ParseError::InvalidHeader)?;

    let (status_line, headers) = match text.split_once("\r\n") {
        Some(split) => split,
        None => (text, ""),
    };

    let mut tokens = status_line.splitn(3, ' ');
    let _version = tokens.next().ok_or(ParseError::InvalidStatusLine)?;
    let code = tokens.next().ok_or(ParseError::InvalidStatusLine)?;
    let code: u16 = code.parse().map_err(|_| ParseError::InvalidStatusCode)?;
    let message = tokens.next().unwrap_or("").trim_ascii();
    response.set_status(code, message);

    response
        .headers_mut()
        .parse(headers)
        .map_err(|_| ParseError::InvalidHeader)
}

// ===== Framing =====

/// Body framing state derived from response headers.
#[derive(Debug)]
pub(crate) struct Framing {
    /// total expected body bytes, absent for chunked or bodyless responses
    pub content_length: Option<u64>,
    /// bytes still to read off the transport
    pub body_length_left: u64,
    /// `false` iff `Connection` contains "close"
    pub keep_alive: bool,
    /// chunked transfer detected; decoding is out of scope
    pub chunked: bool,
}

impl Default for Framing {
    fn default() -> Self {
        Self {
            content_length: None,
            body_length_left: 0,
            // keep-alive unless the server says otherwise
            keep_alive: true,
            chunked: false,
        }
    }
}

impl Framing {
    /// Resolve framing from response headers.
    ///
    /// `residual` is the number of unconsumed bytes already sitting in
    /// the receive buffer after the head read; it counts against the
    /// content length.
    pub(crate) fn resolve(headers: &HeaderMap, residual: usize) -> Result<Self, ParseError> {
        let keep_alive = match headers.get(CONNECTION) {
            Some(value) => !contains_ignore_case(value.as_str(), "close"),
            None => true,
        };

        let chunked = headers
            .get(TRANSFER_ENCODING)
            .is_some_and(|value| contains_ignore_case(value.as_str(), "chunked"));

        let mut content_length = None;
        let mut body_length_left = 0;

        if !chunked && let Some(value) = headers.get(CONTENT_LENGTH) {
            let length: u64 = value
                .as_str()
                .trim_ascii()
                .parse()
                .map_err(|_| ParseError::InvalidContentLength)?;
            content_length = Some(length);
            body_length_left = length.saturating_sub(residual as u64);
            debug!("body-size={length} left={body_length_left} in-buffer={residual}");
        }

        Ok(Self {
            content_length,
            body_length_left,
            keep_alive,
            chunked,
        })
    }
}

/// ASCII case-insensitive substring containment.
///
/// Substring, not token, matching: `notchunked` contains "chunked". Kept
/// that way to preserve the matching semantics of the wire behavior this
/// engine reimplements; see DESIGN.md.
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    debug_assert!(needle.bytes().all(|b| b.is_ascii_lowercase()));
    let haystack = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.len() > haystack.len() {
        return false;
    }
    haystack
        .windows(needle.len())
        .any(|window| window.eq_ignore_ascii_case(needle))
}

#[cfg(test)]
mod test {
    use crate::headers::HeaderName;

    use super::*;

    fn request(method: crate::Method, target: &str) -> Request {
        Request::new(method, target.parse().unwrap())
    }

    #[test]
    fn head_serialization_order() {
        let mut req = request(crate::Method::GET, "http://example.com/index")
            .with_header(
                HeaderName::from_slice(b"Accept").unwrap(),
                HeaderValue::from_static(b"*/*"),
            );
        reconcile_headers(&mut req);

        let mut buf = BytesMut::new();
        write_request_head(&req, &mut buf);
        assert_eq!(
            &buf[..],
            b"GET /index HTTP/1.1\r\naccept: */*\r\nhost: example.com\r\ncontent-length: 0\r\n\r\n"
                .as_slice(),
        );
    }

    #[test]
    fn content_length_matches_body() {
        let mut req = request(crate::Method::POST, "http://example.com/submit")
            .with_content(&b"hello world"[..]);
        reconcile_headers(&mut req);
        assert_eq!(req.headers().get(CONTENT_LENGTH).unwrap().as_str(), "11");
    }

    #[test]
    fn chunked_request_omits_content_length() {
        let mut req = request(crate::Method::POST, "http://example.com/submit")
            .with_header(TRANSFER_ENCODING, HeaderValue::from_static(b"Chunked"))
            .with_content(&b"hello"[..]);
        reconcile_headers(&mut req);
        assert!(!req.headers().contains_key("content-length"));
        assert_eq!(req.headers().get("host").unwrap().as_str(), "example.com");
    }

    #[test]
    fn host_is_overwritten() {
        let mut req = request(crate::Method::GET, "http://example.com/")
            .with_header(HOST, HeaderValue::from_static(b"stale.example"));
        reconcile_headers(&mut req);
        assert_eq!(req.headers().get("host").unwrap().as_str(), "example.com");
    }

    #[test]
    fn host_header_from_any_parsed_uri() {
        // every byte the uri parser admits in a host is a valid header
        // value byte
        for target in [
            "http://sub-domain.example_123.com/",
            "http://192.168.0.1:8080/",
            "https://x~y.example/",
        ] {
            let mut req = request(crate::Method::GET, target);
            reconcile_headers(&mut req);
            assert_eq!(
                req.headers().get("host").unwrap().as_str(),
                req.uri().host(),
            );
        }
    }

    #[test]
    fn parse_status_and_headers() {
        let mut response = Response::new();
        parse_response_head(
            b"HTTP/1.1 404 Not Found\r\nContent-Length: 9\r\nServer: demo\r\n",
            &mut response,
        )
        .unwrap();
        assert_eq!(response.status_code(), 404);
        assert_eq!(response.status_message(), "Not Found");
        assert_eq!(response.headers().get("server").unwrap().as_str(), "demo");
    }

    #[test]
    fn status_without_message() {
        let mut response = Response::new();
        parse_response_head(b"HTTP/1.1 204", &mut response).unwrap();
        assert_eq!(response.status_code(), 204);
        assert_eq!(response.status_message(), "");
    }

    #[test]
    fn non_numeric_status_fails() {
        let mut response = Response::new();
        let err = parse_response_head(b"HTTP/1.1 abc OK\r\n", &mut response).unwrap_err();
        assert_eq!(err, ParseError::InvalidStatusCode);
    }

    #[test]
    fn connection_close_clears_keep_alive() {
        let mut headers = HeaderMap::new();
        headers.parse("Connection: Close\r\n").unwrap();
        let framing = Framing::resolve(&headers, 0).unwrap();
        assert!(!framing.keep_alive);

        let mut headers = HeaderMap::new();
        headers.parse("Connection: keep-alive\r\n").unwrap();
        assert!(Framing::resolve(&headers, 0).unwrap().keep_alive);

        assert!(Framing::resolve(&HeaderMap::new(), 0).unwrap().keep_alive);
    }

    #[test]
    fn residual_counts_against_content_length() {
        let mut headers = HeaderMap::new();
        headers.parse("Content-Length: 10\r\n").unwrap();

        let framing = Framing::resolve(&headers, 4).unwrap();
        assert_eq!(framing.content_length, Some(10));
        assert_eq!(framing.body_length_left, 6);

        // buffer already holds the whole body and then some
        let framing = Framing::resolve(&headers, 12).unwrap();
        assert_eq!(framing.body_length_left, 0);
    }

    #[test]
    fn chunked_skips_length_accounting() {
        let mut headers = HeaderMap::new();
        headers
            .parse("Transfer-Encoding: chunked\r\nContent-Length: 10\r\n")
            .unwrap();
        let framing = Framing::resolve(&headers, 0).unwrap();
        assert!(framing.chunked);
        assert_eq!(framing.content_length, None);
        assert_eq!(framing.body_length_left, 0);
    }

    #[test]
    fn invalid_content_length_fails() {
        let mut headers = HeaderMap::new();
        headers.parse("Content-Length: many\r\n").unwrap();
        assert_eq!(
            Framing::resolve(&headers, 0).unwrap_err(),
            ParseError::InvalidContentLength,
        );
    }

    #[test]
    fn substring_containment() {
        assert!(contains_ignore_case("Chunked", "chunked"));
        assert!(contains_ignore_case("gzip, chunked", "chunked"));
        // substring semantics, deliberately kept
        assert!(contains_ignore_case("notchunked", "chunked"));
        assert!(!contains_ignore_case("chunk", "chunked"));
    }
}
