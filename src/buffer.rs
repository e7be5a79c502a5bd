//! Receive buffer with a consumed/unconsumed boundary.
use std::io;

use bytes::{Bytes, BytesMut};
use memchr::memmem;
use tokio::io::{AsyncRead, AsyncReadExt};

const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";
const DEFAULT_BUFFER_CAP: usize = 1024;
const MAX_HEAD_CAP: usize = 16 * 1024;

/// Append-only receive buffer.
///
/// Bytes read from the transport accumulate here until the caller
/// consumes them with [`take`][RecvBuffer::take]. After a
/// [`read_until_headers`][RecvBuffer::read_until_headers] the residual
/// may already hold part or all of the body.
#[derive(Debug)]
pub(crate) struct RecvBuffer {
    buf: BytesMut,
    /// bytes already scanned for the terminator
    scanned: usize,
}

impl RecvBuffer {
    pub(crate) fn new() -> Self {
        Self {
            buf: BytesMut::with_capacity(DEFAULT_BUFFER_CAP),
            scanned: 0,
        }
    }

    /// Returns the number of unconsumed bytes currently buffered.
    pub(crate) fn len(&self) -> usize {
        self.buf.len()
    }

    /// Read until `\r\n\r\n` is buffered, returning the head without the
    /// terminator. Bytes past the terminator stay buffered.
    pub(crate) async fn read_until_headers<IO>(&mut self, io: &mut IO) -> io::Result<Bytes>
    where
        IO: AsyncRead + Unpin,
    {
        loop {
            // a terminator may straddle the previous scan boundary
            let start = self.scanned.saturating_sub(HEADER_TERMINATOR.len() - 1);
            if let Some(at) = memmem::find(&self.buf[start..], HEADER_TERMINATOR) {
                self.scanned = 0;
                let mut head = self.buf.split_to(start + at + HEADER_TERMINATOR.len());
                head.truncate(start + at);
                return Ok(head.freeze());
            }
            self.scanned = self.buf.len();

            if self.buf.len() > MAX_HEAD_CAP {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "excessive header size",
                ));
            }
            if io.read_buf(&mut self.buf).await? == 0 {
                return Err(io::ErrorKind::UnexpectedEof.into());
            }
        }
    }

    /// Read exactly `count` additional bytes into the buffer, returning
    /// the number of bytes transferred.
    pub(crate) async fn read_more<IO>(&mut self, io: &mut IO, count: usize) -> io::Result<usize>
    where
        IO: AsyncRead + Unpin,
    {
        self.buf.reserve(count);

        let mut remaining = count;
        while remaining > 0 {
            // capped so the buffer never runs past the requested count
            let read = (&mut *io)
                .take(remaining as u64)
                .read_buf(&mut self.buf)
                .await?;
            if read == 0 {
                return Err(io::ErrorKind::UnexpectedEof.into());
            }
            remaining -= read;
        }
        Ok(count)
    }

    /// Hand all unconsumed bytes to the caller, consuming them.
    pub(crate) fn take(&mut self) -> Bytes {
        self.buf.split().freeze()
    }
}

#[cfg(test)]
mod test {
    use tokio::io::AsyncWriteExt;

    use super::*;

    #[tokio::test]
    async fn head_and_residual() {
        let (mut client, mut server) = tokio::io::duplex(256);
        server
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\nhel")
            .await
            .unwrap();

        let mut buffer = RecvBuffer::new();
        let head = buffer.read_until_headers(&mut client).await.unwrap();
        assert_eq!(&head[..], b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n");
        assert_eq!(buffer.len(), 3);

        server.write_all(b"lo").await.unwrap();
        assert_eq!(buffer.read_more(&mut client, 2).await.unwrap(), 2);
        assert_eq!(&buffer.take()[..], b"hello");
        assert_eq!(buffer.len(), 0);
    }

    #[tokio::test]
    async fn terminator_split_across_reads() {
        let (mut client, mut server) = tokio::io::duplex(256);

        let mut buffer = RecvBuffer::new();
        let read = tokio::spawn(async move {
            let head = buffer.read_until_headers(&mut client).await.unwrap();
            (head, buffer)
        });

        server.write_all(b"HTTP/1.1 204 No Content\r\n\r").await.unwrap();
        server.flush().await.unwrap();
        tokio::task::yield_now().await;
        server.write_all(b"\nrest").await.unwrap();

        let (head, buffer) = read.await.unwrap();
        assert_eq!(&head[..], b"HTTP/1.1 204 No Content");
        assert_eq!(buffer.len(), 4);
    }

    #[tokio::test]
    async fn eof_before_terminator() {
        let (mut client, mut server) = tokio::io::duplex(256);
        server.write_all(b"HTTP/1.1 200 OK\r\n").await.unwrap();
        drop(server);

        let mut buffer = RecvBuffer::new();
        let err = buffer.read_until_headers(&mut client).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
