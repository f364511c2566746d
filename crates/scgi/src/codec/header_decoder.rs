//! SCGI header decoder for use with [`tokio_util::codec::FramedRead`].
//!
//! This is the buffered counterpart of [`Request::read_headers`](crate::connection::Request::read_headers):
//! it decodes the same frame out of a `BytesMut` the caller (or `FramedRead`) fills,
//! and leaves whatever follows the frame, the start of the request body, in the buffer.
//!
//! # Implementation Details
//!
//! 1. Find the length prefix with [`LengthFramer`]
//! 2. Reserve room for the whole frame and wait until it has arrived
//! 3. Split the frame off the buffer, zero-copy
//! 4. Split the field block into a [`HeaderTable`] with [`FieldSplitter`]

use bytes::BytesMut;
use tokio_util::codec::Decoder;
use tracing::{debug, trace};

use crate::codec::{FieldSplitter, Frame, LengthFramer};
use crate::config::ReaderConfig;
use crate::ensure;
use crate::protocol::{HeaderTable, ScgiError};

/// Decoder for SCGI header frames implementing the [`Decoder`] trait.
#[derive(Debug)]
pub struct HeaderDecoder {
    framer: LengthFramer,
    max_header_bytes: usize,
    frame: Option<Frame>,
}

impl HeaderDecoder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(config: ReaderConfig) -> Self {
        Self { framer: LengthFramer::new(config.probe_size()), max_header_bytes: config.max_header_bytes(), frame: None }
    }
}

impl Default for HeaderDecoder {
    fn default() -> Self {
        Self::with_config(ReaderConfig::default())
    }
}

impl Decoder for HeaderDecoder {
    type Item = HeaderTable;
    type Error = ScgiError;

    /// Attempts to decode one header frame from `src`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(table))` if a complete frame was decoded; `src` then starts at the body
    /// - `Ok(None)` if more data is needed
    /// - `Err(ScgiError::InvalidFraming)` if the frame is malformed or too large
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let frame = match self.frame {
            Some(frame) => frame,
            None => {
                let Some(frame) = self.framer.decode(src)? else {
                    return Ok(None);
                };

                let total_required = frame.total_required();
                ensure!(
                    total_required <= self.max_header_bytes,
                    ScgiError::invalid_framing(format!("header frame of {total_required} bytes exceeds the limit {}", self.max_header_bytes))
                );
                self.frame = Some(frame);
                frame
            }
        };

        let total_required = frame.total_required();
        if src.len() < total_required {
            trace!(buffered = src.len(), total_required, "header frame incomplete");
            src.reserve(total_required - src.len());
            return Ok(None);
        }

        self.frame = None;
        let frame_bytes = src.split_to(total_required).freeze();
        if !frame.is_terminated(&frame_bytes) {
            debug!(terminator = ?frame_bytes.get(frame.terminator()), "header frame does not end with ','");
        }

        FieldSplitter::new(frame_bytes, frame.fields()).split().map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_frame_and_leaves_body() {
        let mut buf = BytesMut::from(&b"24:CONTENT_LENGTH\x005\0SCGI\x001\0,hello"[..]);

        let table = HeaderDecoder::new().decode(&mut buf).unwrap().unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get_str("CONTENT_LENGTH"), Some("5"));
        assert_eq!(table.get_str("SCGI"), Some("1"));
        assert_eq!(&buf[..], b"hello");
    }

    #[test]
    fn waits_for_whole_frame() {
        let frame = b"12:k1\0v1\0k2\0v2\0,";
        let mut decoder = HeaderDecoder::new();
        let mut buf = BytesMut::new();

        for (index, byte) in frame.iter().enumerate() {
            buf.extend_from_slice(&[*byte]);
            let result = decoder.decode(&mut buf).unwrap();
            if index + 1 < frame.len() {
                assert!(result.is_none());
            } else {
                let table = result.unwrap();
                assert_eq!(table.get_str("k1"), Some("v1"));
                assert_eq!(table.get_str("k2"), Some("v2"));
            }
        }

        assert!(buf.is_empty());
    }

    #[test]
    fn decodes_consecutive_frames() {
        let mut buf = BytesMut::from(&b"4:a\x001\0,4:b\x002\0,"[..]);
        let mut decoder = HeaderDecoder::new();

        let first = decoder.decode(&mut buf).unwrap().unwrap();
        let second = decoder.decode(&mut buf).unwrap().unwrap();

        assert_eq!(first.get_str("a"), Some("1"));
        assert_eq!(second.get_str("b"), Some("2"));
        assert!(decoder.decode(&mut buf).unwrap().is_none());
    }

    #[test]
    fn rejects_zero_length() {
        let mut buf = BytesMut::from(&b"0:,"[..]);
        assert!(HeaderDecoder::new().decode(&mut buf).unwrap_err().is_invalid_framing());
    }

    #[test]
    fn rejects_oversized_frame() {
        let config = ReaderConfig::builder().max_header_bytes(128).build().unwrap();
        let mut buf = BytesMut::from(&b"200:"[..]);
        assert!(HeaderDecoder::with_config(config).decode(&mut buf).unwrap_err().is_invalid_framing());
    }

    #[test]
    fn rejects_missing_delimiter() {
        let mut buf = BytesMut::from(&b"GET / HTTP/1.1\r\nHost: x\r\n\r\n"[..]);
        assert!(HeaderDecoder::new().decode(&mut buf).unwrap_err().is_invalid_framing());
    }
}
