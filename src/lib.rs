//! Asynchronous HTTP/1.1 client exchange engine.
//!
//! Drives a single logical exchange, one request and one response, over
//! plain TCP or TLS without blocking the event loop: deterministic
//! request serialization, incremental response parsing from a growing
//! receive buffer, and body framing by content length with chunked and
//! connection-close detection.
//!
//! # Example
//!
//! ```no_run
//! # async fn run() -> Result<(), tsuri::Error> {
//! use tsuri::{HttpClient, Request};
//!
//! let client = HttpClient::new();
//! let request = Request::get("http://example.com/index".parse().unwrap());
//!
//! let mut exchange = client.execute(request).await?;
//! assert_eq!(exchange.response().status_code(), 200);
//!
//! loop {
//!     let piece = exchange.read_body(4096).await?;
//!     if piece.is_empty() {
//!         break;
//!     }
//!     // consume the piece
//! }
//! # Ok(()) }
//! ```
#![warn(missing_debug_implementations)]

mod log;

pub mod headers;
pub mod uri;

mod buffer;
mod client;
mod error;
mod method;
mod proto;
mod request;
mod response;
mod stream;

pub use client::{Exchange, HttpClient};
pub use error::{Error, ParseError, Step};
pub use method::Method;
pub use request::Request;
pub use response::Response;
pub use stream::MaybeTls;
pub use uri::Uri;
