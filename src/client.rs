//! HTTP/1.1 client exchange engine.
//!
//! One exchange advances strictly through connect, send header, send
//! body, read response head; a failure in any step resolves the exchange
//! terminally. After the head is parsed the caller pulls the body through
//! [`Exchange::read_body`] until it is drained.
use std::{io, time::Duration};

use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

use crate::buffer::RecvBuffer;
use crate::error::{Error, Step};
use crate::log::error;
use crate::proto::{self, Framing};
use crate::request::Request;
use crate::response::Response;
use crate::stream::{self, MaybeTls, TlsConfig};

/// HTTP/1.1 client.
///
/// Holds the transport configuration; each [`execute`][HttpClient::execute]
/// drives one exchange over a fresh connection. Configuring a CA
/// certificate switches the transport from plain TCP to TLS.
#[derive(Debug, Default)]
pub struct HttpClient {
    ca_cert: Option<String>,
    client_pair: Option<(String, String)>,
    timeout: Option<Duration>,
}

impl HttpClient {
    /// Create a client with a plain TCP transport and no deadline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a client certificate and key (PEM) for mutual TLS.
    ///
    /// Only used when a CA certificate is also configured.
    pub fn set_client_certificate(&mut self, cert_pem: &str, key_pem: &str) {
        self.client_pair = Some((cert_pem.to_owned(), key_pem.to_owned()));
    }

    /// Set the CA certificate (PEM) used to verify the server, switching
    /// the transport to TLS.
    pub fn set_ca_certificate(&mut self, ca_pem: &str) {
        self.ca_cert = Some(ca_pem.to_owned());
    }

    /// Set a deadline applied to each asynchronous step of an exchange.
    ///
    /// Without one, a hung transport leaves the exchange pending
    /// indefinitely.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = Some(timeout);
    }

    /// Execute one exchange: connect, transmit the request and parse the
    /// response head.
    ///
    /// The engine sets the `Host` header from the URI and, unless the
    /// caller asked for a chunked transfer encoding, a `Content-Length`
    /// header equal to the body size. Chunked request bodies are not
    /// supported; the body is always sent as one contiguous block.
    ///
    /// Resolves exactly once: with an [`Exchange`] holding the parsed
    /// [`Response`], or with the first error, in which case the transport
    /// is dropped and nothing of the exchange survives.
    pub async fn execute(&self, request: Request) -> Result<Exchange<MaybeTls>, Error> {
        let tls = match &self.ca_cert {
            Some(ca_pem) => Some(TlsConfig::from_pem(
                ca_pem,
                self.client_pair
                    .as_ref()
                    .map(|(cert, key)| (cert.as_str(), key.as_str())),
            )?),
            None => None,
        };

        let host = request.uri().host();
        let port = request.uri().port();
        let io = io_step(
            Step::Connect,
            self.timeout,
            stream::connect(host, port, tls.as_ref()),
        )
        .await?;

        Exchange::start(io, request, self.timeout).await
    }
}

/// One in-flight or completed exchange.
///
/// Owns the transport stream for its whole lifetime; dropping the
/// exchange closes the connection.
#[derive(Debug)]
pub struct Exchange<IO> {
    io: IO,
    buffer: RecvBuffer,
    response: Response,
    framing: Framing,
    timeout: Option<Duration>,
    /// a body read failed; the stream is shut down and unusable
    failed: bool,
}

impl<IO> Exchange<IO>
where
    IO: AsyncRead + AsyncWrite + Unpin,
{
    /// Drive the exchange over an established stream up to the parsed
    /// response head.
    pub(crate) async fn start(
        io: IO,
        mut request: Request,
        timeout: Option<Duration>,
    ) -> Result<Self, Error> {
        let mut exchange = Self {
            io,
            buffer: RecvBuffer::new(),
            response: Response::new(),
            framing: Framing::default(),
            timeout,
            failed: false,
        };

        proto::reconcile_headers(&mut request);

        let mut head = BytesMut::with_capacity(256);
        proto::write_request_head(&request, &mut head);
        io_step(
            Step::SendHeader,
            timeout,
            exchange.io.write_all(&head),
        )
        .await?;

        if !request.content().is_empty() {
            io_step(
                Step::SendBody,
                timeout,
                exchange.io.write_all(request.content()),
            )
            .await?;
        }

        let head = io_step(
            Step::ReadResponse,
            timeout,
            exchange.buffer.read_until_headers(&mut exchange.io),
        )
        .await?;

        proto::parse_response_head(&head, &mut exchange.response).map_err(parse_error)?;
        exchange.framing =
            Framing::resolve(exchange.response.headers(), exchange.buffer.len())
                .map_err(parse_error)?;

        Ok(exchange)
    }

    /// Returns the parsed response head.
    #[inline]
    pub fn response(&self) -> &Response {
        &self.response
    }

    /// Returns `false` if the server asked for the connection to be
    /// closed after this exchange.
    ///
    /// Detection only; connection reuse is out of scope.
    #[inline]
    pub fn is_keep_alive(&self) -> bool {
        self.framing.keep_alive
    }

    /// Returns `true` if the response body uses a chunked transfer
    /// encoding.
    ///
    /// Chunk decoding is out of scope; [`read_body`][Exchange::read_body]
    /// hands over raw buffered bytes without length accounting.
    #[inline]
    pub fn is_chunked(&self) -> bool {
        self.framing.chunked
    }

    /// Returns the number of body bytes still to be read off the
    /// transport.
    #[inline]
    pub fn body_length_left(&self) -> u64 {
        self.framing.body_length_left
    }

    /// Pull the next piece of the body, reading at most enough from the
    /// transport to hand over `max_size` bytes.
    ///
    /// Bytes already buffered from earlier reads count against
    /// `max_size`; when they cover it, or no body remains, this resolves
    /// immediately without touching the network. Call repeatedly until
    /// the returned buffer is empty and
    /// [`body_length_left`][Exchange::body_length_left] is zero.
    ///
    /// A transport failure is terminal: the stream is shut down and
    /// every subsequent call fails.
    pub async fn read_body(&mut self, max_size: usize) -> Result<Bytes, Error> {
        if self.failed {
            return Err(exchange_failed());
        }

        let buffered = self.buffer.len();
        let want = self
            .framing
            .body_length_left
            .min(max_size.saturating_sub(buffered) as u64) as usize;

        if want > 0 {
            let read = match io_step(
                Step::ReadResponse,
                self.timeout,
                self.buffer.read_more(&mut self.io, want),
            )
            .await
            {
                Ok(read) => read,
                Err(err) => {
                    self.failed = true;
                    let _ = self.io.shutdown().await;
                    return Err(err);
                }
            };
            self.framing.body_length_left -= read as u64;
        }

        Ok(self.buffer.take())
    }
}

// ===== Error path =====

/// Single funnel for transport failures: apply the step deadline, tag the
/// error with its step and log it.
async fn io_step<T>(
    step: Step,
    timeout: Option<Duration>,
    fut: impl Future<Output = io::Result<T>>,
) -> Result<T, Error> {
    let result = match timeout {
        Some(deadline) => match tokio::time::timeout(deadline, fut).await {
            Ok(result) => result,
            Err(_) => Err(io::Error::new(io::ErrorKind::TimedOut, "deadline elapsed")),
        },
        None => fut.await,
    };

    result.map_err(|source| {
        error!("http error: {step} {source}");
        Error::Io { step, source }
    })
}

fn exchange_failed() -> Error {
    Error::Io {
        step: Step::ReadResponse,
        source: io::Error::new(io::ErrorKind::BrokenPipe, "exchange already failed"),
    }
}

fn parse_error(err: crate::error::ParseError) -> Error {
    error!("http error: read response {err}");
    Error::Parse(err)
}
