//! Transport stream: plain TCP or TLS.
//!
//! The presence of a CA certificate is the sole switch between the plain
//! and TLS transports; server verification runs against that CA, and an
//! optional client certificate and key enable mutual TLS.
use std::{
    io,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tokio_rustls::client::TlsStream;
use tokio_rustls::rustls::pki_types::ServerName;
use tokio_rustls::rustls::{ClientConfig, RootCertStore};

use crate::error::Error;

/// TLS client configuration built from PEM text blobs.
pub(crate) struct TlsConfig {
    connector: TlsConnector,
}

impl TlsConfig {
    /// Build a configuration trusting `ca_pem`, optionally presenting a
    /// client certificate and key for mutual TLS.
    pub(crate) fn from_pem(
        ca_pem: &str,
        client_pair: Option<(&str, &str)>,
    ) -> Result<Self, Error> {
        let mut roots = RootCertStore::empty();
        for cert in rustls_pemfile::certs(&mut ca_pem.as_bytes()) {
            let cert = cert.map_err(|_| Error::InvalidCertificate)?;
            roots.add(cert)?;
        }
        if roots.is_empty() {
            return Err(Error::InvalidCertificate);
        }

        let builder = ClientConfig::builder().with_root_certificates(roots);
        let config = match client_pair {
            Some((cert_pem, key_pem)) => {
                let certs = rustls_pemfile::certs(&mut cert_pem.as_bytes())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|_| Error::InvalidCertificate)?;
                let key = rustls_pemfile::private_key(&mut key_pem.as_bytes())
                    .map_err(|_| Error::InvalidCertificate)?
                    .ok_or(Error::InvalidCertificate)?;
                builder.with_client_auth_cert(certs, key)?
            }
            None => builder.with_no_client_auth(),
        };

        Ok(Self {
            connector: TlsConnector::from(Arc::new(config)),
        })
    }
}

/// Connect to `host:port`, wrapping the socket in TLS when a
/// configuration is given.
pub(crate) async fn connect(
    host: &str,
    port: u16,
    tls: Option<&TlsConfig>,
) -> io::Result<MaybeTls> {
    let stream = TcpStream::connect((host, port)).await?;

    match tls {
        None => Ok(MaybeTls::Plain(stream)),
        Some(config) => {
            let name = ServerName::try_from(host.to_owned())
                .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
            let stream = config.connector.connect(name, stream).await?;
            Ok(MaybeTls::Tls(Box::new(stream)))
        }
    }
}

/// A bidirectional byte stream, plain or TLS-wrapped.
#[derive(Debug)]
pub enum MaybeTls {
    Plain(TcpStream),
    Tls(Box<TlsStream<TcpStream>>),
}

impl AsyncRead for MaybeTls {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match self.get_mut() {
            Self::Plain(stream) => Pin::new(stream).poll_read(cx, buf),
            Self::Tls(stream) => Pin::new(stream.as_mut()).poll_read(cx, buf),
        }
    }
}

impl AsyncWrite for MaybeTls {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        match self.get_mut() {
            Self::Plain(stream) => Pin::new(stream).poll_write(cx, buf),
            Self::Tls(stream) => Pin::new(stream.as_mut()).poll_write(cx, buf),
        }
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut() {
            Self::Plain(stream) => Pin::new(stream).poll_flush(cx),
            Self::Tls(stream) => Pin::new(stream.as_mut()).poll_flush(cx),
        }
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut() {
            Self::Plain(stream) => Pin::new(stream).poll_shutdown(cx),
            Self::Tls(stream) => Pin::new(stream.as_mut()).poll_shutdown(cx),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reject_garbage_ca() {
        assert!(matches!(
            TlsConfig::from_pem("not a certificate", None),
            Err(Error::InvalidCertificate)
        ));
    }
}
