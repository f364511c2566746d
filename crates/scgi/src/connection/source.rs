//! The byte source a request reads its header frame from.

use std::io;

use bytes::{Buf, Bytes};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// An asynchronous stream of request bytes.
///
/// `read` fills a prefix of `buf` and reports how much, `Ok(0)` meaning the peer closed the
/// stream. `close` releases the stream; requests call it once, best effort, when dropped.
///
/// Every tokio `AsyncRead + AsyncWrite` stream is a source, closed through `shutdown`.
#[trait_variant::make(ByteSource: Send)]
pub trait LocalByteSource {
    async fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    async fn close(&mut self) -> io::Result<()>;
}

impl<T> ByteSource for T
where
    T: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        AsyncReadExt::read(self, buf).await
    }

    async fn close(&mut self) -> io::Result<()> {
        AsyncWriteExt::shutdown(self).await
    }
}

/// The request body, positioned right after the header frame.
///
/// Header reads may pull a few body bytes off the wire together with a short frame;
/// those are handed out first, then reads go straight to the source.
#[derive(Debug)]
pub struct BodyReader<'req, S> {
    prefix: &'req mut Bytes,
    source: &'req mut S,
}

impl<'req, S> BodyReader<'req, S> {
    pub(crate) fn new(prefix: &'req mut Bytes, source: &'req mut S) -> Self {
        Self { prefix, source }
    }

    /// Body bytes already buffered and not yet read.
    pub fn buffered(&self) -> &[u8] {
        &self.prefix[..]
    }
}

impl<S: ByteSource> ByteSource for BodyReader<'_, S> {
    async fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.prefix.is_empty() {
            return ByteSource::read(&mut *self.source, buf).await;
        }

        let len = buf.len().min(self.prefix.len());
        buf[..len].copy_from_slice(&self.prefix[..len]);
        self.prefix.advance(len);
        Ok(len)
    }

    async fn close(&mut self) -> io::Result<()> {
        ByteSource::close(&mut *self.source).await
    }
}
