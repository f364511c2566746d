use std::io;
use thiserror::Error;

/// Failure of an SCGI header read.
///
/// Every variant is terminal for the [`Request`](crate::connection::Request) that produced it,
/// a retry means a fresh request against a fresh source.
#[derive(Error, Debug)]
pub enum ScgiError {
    /// The byte source failed, or reached EOF before the header frame was complete.
    #[error("stream error: {source}")]
    Stream {
        #[from]
        source: io::Error,
    },

    /// The bytes on the wire are not a valid SCGI header frame.
    #[error("invalid framing: {reason}")]
    InvalidFraming { reason: String },

    /// The read was aborted through its cancellation token.
    #[error("header read cancelled")]
    Cancelled,

    /// The request was used in a way its lifecycle does not allow.
    #[error("invalid request state: {reason}")]
    InvalidState { reason: &'static str },
}

impl ScgiError {
    pub fn invalid_framing<S: ToString>(str: S) -> Self {
        Self::InvalidFraming { reason: str.to_string() }
    }

    pub fn invalid_state(reason: &'static str) -> Self {
        Self::InvalidState { reason }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Stream { source: e.into() }
    }

    /// The source reported EOF after `filled` header bytes.
    ///
    /// `expected` is the frame size, `None` while the length prefix is still incomplete.
    pub fn stream_closed(filled: usize, expected: Option<usize>) -> Self {
        let message = match expected {
            Some(expected) => format!("stream closed after {filled} of {expected} header bytes"),
            None => format!("stream closed after {filled} header bytes, before the length prefix completed"),
        };
        Self::io(io::Error::new(io::ErrorKind::UnexpectedEof, message))
    }

    #[inline]
    pub fn is_stream(&self) -> bool {
        matches!(self, ScgiError::Stream { .. })
    }

    #[inline]
    pub fn is_invalid_framing(&self) -> bool {
        matches!(self, ScgiError::InvalidFraming { .. })
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ScgiError::Cancelled)
    }
}

/// Rejected [`ReaderConfig`](crate::config::ReaderConfig) settings.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be greater than zero")]
    Zero { name: &'static str },

    #[error("probe size {probe_size} exceeds initial capacity {initial_capacity}")]
    ProbeTooLarge { probe_size: usize, initial_capacity: usize },

    #[error("max header bytes {max_header_bytes} is below initial capacity {initial_capacity}")]
    MaxTooSmall { max_header_bytes: usize, initial_capacity: usize },
}
