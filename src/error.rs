use std::{fmt, io};

/// The asynchronous step an exchange failed in.
///
/// One exchange advances strictly through connect, send header, send body
/// and read response; a transport failure is tagged with the step that
/// reported it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Connect,
    SendHeader,
    SendBody,
    ReadResponse,
}

impl Step {
    /// Returns the human readable step name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Connect => "connect",
            Self::SendHeader => "send header",
            Self::SendBody => "send body",
            Self::ReadResponse => "read response",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ===== Parsing Error =====

/// Response head parsing error.
#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    /// Status line is missing or truncated.
    InvalidStatusLine,
    /// Status code token is not numeric.
    InvalidStatusCode,
    /// Header line has no separator or invalid name/value.
    InvalidHeader,
    /// `Content-Length` value is not an unsigned integer.
    InvalidContentLength,
}

impl std::error::Error for ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidStatusLine => f.write_str("invalid status line"),
            Self::InvalidStatusCode => f.write_str("invalid status code"),
            Self::InvalidHeader => f.write_str("invalid header"),
            Self::InvalidContentLength => f.write_str("invalid content length"),
        }
    }
}

// ===== Exchange Error =====

/// Exchange error.
///
/// Every failure of an exchange funnels into one of these variants; the
/// exchange future resolves with it exactly once and the transport is
/// dropped, so the engine state cannot be reused after a failure.
#[derive(Debug)]
pub enum Error {
    /// Transport failure reported by the underlying stream.
    Io {
        /// Step the failure occurred in.
        step: Step,
        source: io::Error,
    },
    /// Malformed response head.
    Parse(ParseError),
    /// Certificate or key PEM blobs could not be decoded.
    InvalidCertificate,
    /// TLS configuration rejected the supplied certificates.
    Tls(tokio_rustls::rustls::Error),
}

impl Error {
    /// Returns the step a transport failure occurred in, if any.
    pub const fn step(&self) -> Option<Step> {
        match self {
            Self::Io { step, .. } => Some(*step),
            _ => None,
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::InvalidCertificate => None,
            Self::Tls(err) => Some(err),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Io { step, source } => write!(f, "{step}: {source}"),
            Self::Parse(err) => write!(f, "parse error: {err}"),
            Self::InvalidCertificate => f.write_str("invalid certificate"),
            Self::Tls(err) => write!(f, "tls error: {err}"),
        }
    }
}

impl From<ParseError> for Error {
    #[inline]
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}

impl From<tokio_rustls::rustls::Error> for Error {
    #[inline]
    fn from(value: tokio_rustls::rustls::Error) -> Self {
        Self::Tls(value)
    }
}
