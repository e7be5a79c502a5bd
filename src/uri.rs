//! Request target URI.
//!
//! Only the subset an HTTP/1.1 exchange needs: an `http` or `https`
//! scheme, a host, an optional port and an origin-form path. Percent
//! encoding is neither decoded nor encoded here.
use std::{fmt, str::FromStr};

/// URI Scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Scheme {
    #[default]
    Http,
    Https,
}

impl Scheme {
    /// Returns string representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }

    /// Returns the well known port for the scheme.
    pub const fn default_port(&self) -> u16 {
        match self {
            Self::Http => 80,
            Self::Https => 443,
        }
    }
}

/// Request target URI: scheme, host, port and path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uri {
    scheme: Scheme,
    host: String,
    port: Option<u16>,
    /// origin-form, query included
    path: String,
}

impl Uri {
    /// Returns the scheme.
    #[inline]
    pub const fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Returns the host.
    #[inline]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the explicit port, or the scheme default.
    #[inline]
    pub fn port(&self) -> u16 {
        self.port.unwrap_or_else(|| self.scheme.default_port())
    }

    /// Returns the origin-form path, query included.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl FromStr for Uri {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (scheme, rest) = match s.split_once("://") {
            Some(("http", rest)) => (Scheme::Http, rest),
            Some(("https", rest)) => (Scheme::Https, rest),
            _ => return Err(UriError::InvalidScheme),
        };

        let (authority, path) = match rest.find('/') {
            Some(at) => (&rest[..at], &rest[at..]),
            None => (rest, "/"),
        };

        let (host, port) = match authority.split_once(':') {
            Some((host, port)) => {
                let port = port.parse().map_err(|_| UriError::InvalidPort)?;
                (host, Some(port))
            }
            None => (authority, None),
        };

        if host.is_empty() || !host.bytes().all(is_host_byte) {
            return Err(UriError::InvalidAuthority);
        }

        Ok(Self {
            scheme,
            host: host.to_owned(),
            port,
            path: path.to_owned(),
        })
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme.as_str(), self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{port}")?;
        }
        f.write_str(&self.path)
    }
}

// unreserved / sub-delims as far as registered names go
const fn is_host_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~')
}

// ===== Error =====

/// An error when trying to parse [`Uri`] from a string.
#[derive(Debug, PartialEq, Eq)]
pub enum UriError {
    /// Scheme is missing or not `http`/`https`.
    InvalidScheme,
    /// Host is missing or contains invalid characters.
    InvalidAuthority,
    /// Port is not a 16 bit integer.
    InvalidPort,
}

impl std::error::Error for UriError {}

impl fmt::Display for UriError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidScheme => f.write_str("invalid scheme"),
            Self::InvalidAuthority => f.write_str("invalid authority"),
            Self::InvalidPort => f.write_str("invalid port"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_origin() {
        let uri: Uri = "http://example.com/index".parse().unwrap();
        assert_eq!(uri.scheme(), Scheme::Http);
        assert_eq!(uri.host(), "example.com");
        assert_eq!(uri.port(), 80);
        assert_eq!(uri.path(), "/index");
    }

    #[test]
    fn parse_explicit_port_and_query() {
        let uri: Uri = "https://example.com:8443/over/there?name=ferret".parse().unwrap();
        assert_eq!(uri.scheme(), Scheme::Https);
        assert_eq!(uri.port(), 8443);
        assert_eq!(uri.path(), "/over/there?name=ferret");
    }

    #[test]
    fn parse_empty_path() {
        let uri: Uri = "https://example.com".parse().unwrap();
        assert_eq!(uri.port(), 443);
        assert_eq!(uri.path(), "/");
    }

    #[test]
    fn reject_malformed() {
        assert_eq!("example.com/index".parse::<Uri>(), Err(UriError::InvalidScheme));
        assert_eq!("ftp://example.com".parse::<Uri>(), Err(UriError::InvalidScheme));
        assert_eq!("http:///index".parse::<Uri>(), Err(UriError::InvalidAuthority));
        assert_eq!("http://example.com:http/".parse::<Uri>(), Err(UriError::InvalidPort));
    }
}
