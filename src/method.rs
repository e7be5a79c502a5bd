use std::{fmt, str::FromStr};

/// HTTP Method.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Method(Inner);

// https://tools.ietf.org/html/rfc7231#section-4
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
enum Inner {
    Options,
    #[default]
    Get,
    Head,
    Post,
    Put,
    Delete,
    Patch,
}

impl Method {
    /// The `OPTIONS` method describes the communication options for the target resource.
    pub const OPTIONS: Method = Method(Inner::Options);
    /// The `GET` method requests a representation of the specified resource.
    pub const GET: Method = Method(Inner::Get);
    /// The `HEAD` method asks for a response identical to a GET request, but without a response
    /// body.
    pub const HEAD: Method = Method(Inner::Head);
    /// The `POST` method submits an entity to the specified resource.
    pub const POST: Method = Method(Inner::Post);
    /// The `PUT` method replaces all current representations of the target resource with the
    /// request content.
    pub const PUT: Method = Method(Inner::Put);
    /// The `DELETE` method deletes the specified resource.
    pub const DELETE: Method = Method(Inner::Delete);
    /// The `PATCH` method applies partial modifications to a resource.
    pub const PATCH: Method = Method(Inner::Patch);

    /// Create [`Method`] from bytes.
    pub const fn from_bytes(src: &[u8]) -> Option<Method> {
        match src {
            b"OPTIONS" => Some(Self::OPTIONS),
            b"GET" => Some(Self::GET),
            b"HEAD" => Some(Self::HEAD),
            b"POST" => Some(Self::POST),
            b"PUT" => Some(Self::PUT),
            b"DELETE" => Some(Self::DELETE),
            b"PATCH" => Some(Self::PATCH),
            _ => None,
        }
    }

    /// Returns string representation.
    pub const fn as_str(&self) -> &'static str {
        match self.0 {
            Inner::Options => "OPTIONS",
            Inner::Get => "GET",
            Inner::Head => "HEAD",
            Inner::Post => "POST",
            Inner::Put => "PUT",
            Inner::Delete => "DELETE",
            Inner::Patch => "PATCH",
        }
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ===== Error =====

/// An error when trying to parse [`Method`] from a string.
#[derive(Debug)]
pub struct UnknownMethod;

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(s.as_bytes()).ok_or(UnknownMethod)
    }
}

impl std::error::Error for UnknownMethod {}

impl fmt::Display for UnknownMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown method")
    }
}
