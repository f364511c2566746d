use bytes::Bytes;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::config::ReaderConfig;
use crate::connection::async_reader::AsyncReader;
use crate::connection::{BodyReader, ByteSource};
use crate::protocol::{HeaderTable, ScgiError};

/// One SCGI request: its byte source and, once read, its header table.
///
/// `Request` reads the header frame exactly once. After a successful
/// [`read_headers`](Request::read_headers) the table is available through
/// [`header_table`](Request::header_table) and the body through
/// [`body_reader`](Request::body_reader); after a failure the request is spent.
///
/// Dropping a request with an attached source closes that source on the current tokio
/// runtime in the background. Close errors are discarded.
///
/// # Example
///
/// ```no_run
/// use micro_scgi::connection::Request;
/// use tokio::net::TcpListener;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn serve() -> Result<(), Box<dyn std::error::Error>> {
/// let listener = TcpListener::bind("127.0.0.1:4000").await?;
/// let (stream, _remote_addr) = listener.accept().await?;
///
/// let mut request = Request::new();
/// request.set_source(stream);
/// let headers = request.read_headers(&CancellationToken::new()).await?;
/// println!("{:?}", headers.get_str("REQUEST_URI"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Request<S>
where
    S: ByteSource + 'static,
{
    reader: AsyncReader,
    source: Option<S>,
    table: Option<HeaderTable>,
    body_prefix: Bytes,
}

impl<S> Request<S>
where
    S: ByteSource + 'static,
{
    pub fn new() -> Self {
        Self::with_config(ReaderConfig::default())
    }

    pub fn with_config(config: ReaderConfig) -> Self {
        Self { reader: AsyncReader::new(config), source: None, table: None, body_prefix: Bytes::new() }
    }

    /// Attaches the byte source, dropping any source attached before.
    pub fn set_source(&mut self, source: S) {
        if self.source.replace(source).is_some() {
            debug!("replaced scgi request byte source");
        }
    }

    /// Reads and parses the header frame.
    ///
    /// # Errors
    ///
    /// - [`ScgiError::Stream`] if the source fails or closes before the frame is complete
    /// - [`ScgiError::InvalidFraming`] if the frame is malformed
    /// - [`ScgiError::Cancelled`] if `cancel` fires while a read is pending
    /// - [`ScgiError::InvalidState`] if no source is attached or the headers were read before
    pub async fn read_headers(&mut self, cancel: &CancellationToken) -> Result<&HeaderTable, ScgiError> {
        let Some(source) = self.source.as_mut() else {
            return Err(ScgiError::invalid_state("no byte source attached"));
        };

        let parsed = self.reader.read(source, cancel).await?;
        self.body_prefix = parsed.body_prefix;
        Ok(&*self.table.insert(parsed.table))
    }

    /// The parsed headers, `None` until [`read_headers`](Request::read_headers) succeeded.
    pub fn header_table(&self) -> Option<&HeaderTable> {
        self.table.as_ref()
    }

    pub fn source(&self) -> Option<&S> {
        self.source.as_ref()
    }

    pub fn source_mut(&mut self) -> Option<&mut S> {
        self.source.as_mut()
    }

    /// Body bytes that were read together with the header frame.
    pub fn body_prefix(&self) -> &[u8] {
        &self.body_prefix
    }

    /// The request body, continuing right after the header frame.
    ///
    /// `None` if no source is attached.
    pub fn body_reader(&mut self) -> Option<BodyReader<'_, S>> {
        let source = self.source.as_mut()?;
        Some(BodyReader::new(&mut self.body_prefix, source))
    }
}

impl<S> Default for Request<S>
where
    S: ByteSource + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Drop for Request<S>
where
    S: ByteSource + 'static,
{
    fn drop(&mut self) {
        let Some(mut source) = self.source.take() else {
            return;
        };

        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = source.close().await {
                        trace!(cause = %e, "discard scgi byte source close error");
                    }
                });
            }
            Err(_) => debug!("no tokio runtime, dropping scgi byte source without close"),
        }
    }
}
