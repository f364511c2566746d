//! The read loop that pulls one SCGI header frame off a [`ByteSource`].
//!
//! # State Machine
//!
//! ```text
//! Start -> AwaitLength -> AwaitBody -> Parsing -> Done
//!              |              |           |
//!              +--------------+-----------+-----> Failed
//! ```
//!
//! - `AwaitLength`: reads into the first `probe_size` bytes until the `:` shows up
//! - `AwaitBody`: reads exactly the rest of the frame, growing the buffer once if needed
//! - `Parsing`: splits the field block on the blocking pool
//!
//! Every read races the cancellation token. Reads never go past the frame once its
//! size is known, so the source stays positioned at the body; only the first probe
//! read can overshoot a very short frame, and those bytes are kept as the body prefix.

use bytes::Bytes;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::codec::{FieldSplitter, Frame, HeaderBuffer, LengthFramer};
use crate::config::ReaderConfig;
use crate::connection::ByteSource;
use crate::ensure;
use crate::protocol::{HeaderTable, ScgiError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReadState {
    Start,
    AwaitLength,
    AwaitBody,
    Parsing,
    Done,
    Failed,
}

/// Outcome of a successful frame read.
#[derive(Debug)]
pub(crate) struct ParsedHeader {
    pub(crate) table: HeaderTable,
    /// Bytes past the frame that arrived with it.
    pub(crate) body_prefix: Bytes,
}

#[derive(Debug)]
pub(crate) struct AsyncReader {
    config: ReaderConfig,
    framer: LengthFramer,
    state: ReadState,
}

impl AsyncReader {
    pub(crate) fn new(config: ReaderConfig) -> Self {
        Self { config, framer: LengthFramer::new(config.probe_size()), state: ReadState::Start }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> ReadState {
        self.state
    }

    /// Reads and parses one header frame from `source`.
    ///
    /// Runs once per reader; any later call fails with `InvalidState`.
    pub(crate) async fn read<S: ByteSource>(&mut self, source: &mut S, cancel: &CancellationToken) -> Result<ParsedHeader, ScgiError> {
        ensure!(self.state == ReadState::Start, ScgiError::invalid_state("header frame can only be read once"));

        match self.drive(source, cancel).await {
            Ok(parsed) => {
                self.state = ReadState::Done;
                debug!(headers = parsed.table.len(), body_prefix = parsed.body_prefix.len(), "parsed scgi header frame");
                Ok(parsed)
            }
            Err(e) => {
                warn!(state = ?self.state, cause = %e, "failed to read scgi header frame");
                self.state = ReadState::Failed;
                Err(e)
            }
        }
    }

    async fn drive<S: ByteSource>(&mut self, source: &mut S, cancel: &CancellationToken) -> Result<ParsedHeader, ScgiError> {
        let mut buffer = HeaderBuffer::with_capacity(self.config.initial_capacity());

        self.state = ReadState::AwaitLength;
        let frame = loop {
            fill(&mut buffer, self.framer.probe_size(), source, cancel).await?;
            if let Some(frame) = self.framer.decode(buffer.filled())? {
                break frame;
            }
        };

        let total_required = frame.total_required();
        let max_header_bytes = self.config.max_header_bytes();
        ensure!(
            total_required <= max_header_bytes,
            ScgiError::invalid_framing(format!("header frame of {total_required} bytes exceeds the limit {max_header_bytes}"))
        );
        debug!(declared = frame.declared(), head_offset = frame.head_offset(), total_required, "scgi header length decoded");
        buffer.set_frame(frame);

        self.state = ReadState::AwaitBody;
        while buffer.filled_len() < total_required {
            fill(&mut buffer, total_required, source, cancel).await?;
        }

        self.state = ReadState::Parsing;
        split_fields(buffer.freeze(), frame).await
    }
}

/// Issues one read into `buffer` up to `limit`.
async fn fill<S: ByteSource>(buffer: &mut HeaderBuffer, limit: usize, source: &mut S, cancel: &CancellationToken) -> Result<(), ScgiError> {
    let window = buffer.unfilled_mut(limit);
    let wanted = window.len();

    let read = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(ScgiError::Cancelled),
        read = source.read(window) => read?,
    };

    ensure!(read > 0, ScgiError::stream_closed(buffer.filled_len(), buffer.total_required()));
    ensure!(
        read <= wanted,
        ScgiError::io(std::io::Error::other(format!("source reported {read} bytes for a {wanted} byte read")))
    );

    buffer.advance(read);
    trace!(read, wanted, filled = buffer.filled_len(), "read scgi header bytes");
    Ok(())
}

/// Splits the field block on the blocking pool, off the I/O path.
async fn split_fields(frame_bytes: Bytes, frame: Frame) -> Result<ParsedHeader, ScgiError> {
    if !frame.is_terminated(&frame_bytes) {
        debug!(terminator = ?frame_bytes.get(frame.terminator()), "scgi header frame does not end with ','");
    }

    let body_prefix = frame_bytes.slice(frame.total_required()..);
    let splitter = FieldSplitter::new(frame_bytes, frame.fields());

    let table = match tokio::task::spawn_blocking(move || splitter.split()).await {
        Ok(table) => table?,
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Err(e) => {
            warn!(cause = %e, "header split task did not complete");
            return Err(ScgiError::Cancelled);
        }
    };

    Ok(ParsedHeader { table, body_prefix })
}
