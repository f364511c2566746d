//! Decoding of the netstring length prefix, `<decimal-length>:`.

use std::ops::Range;

use tracing::trace;

use crate::ensure;
use crate::protocol::ScgiError;

const DELIMITER: u8 = b':';
const TERMINATOR: u8 = b',';

/// Geometry of one header frame, derived from its length prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    declared: usize,
    head_offset: usize,
}

impl Frame {
    /// `declared` field bytes starting right after the `:` at `head_offset - 1`.
    pub fn new(declared: usize, head_offset: usize) -> Self {
        Self { declared, head_offset }
    }

    /// The field block length announced by the prefix.
    #[inline]
    pub fn declared(&self) -> usize {
        self.declared
    }

    /// Offset of the first field byte.
    #[inline]
    pub fn head_offset(&self) -> usize {
        self.head_offset
    }

    /// Size of the whole frame: prefix, fields and the trailing `,`.
    #[inline]
    pub fn total_required(&self) -> usize {
        self.head_offset + self.declared + 1
    }

    /// The field block, `[head_offset, total_required - 1)`.
    #[inline]
    pub fn fields(&self) -> Range<usize> {
        self.head_offset..self.head_offset + self.declared
    }

    /// Offset of the trailing `,`.
    #[inline]
    pub fn terminator(&self) -> usize {
        self.head_offset + self.declared
    }

    /// Whether `bytes`, holding at least the whole frame, ends the frame with `,`.
    pub fn is_terminated(&self, bytes: &[u8]) -> bool {
        bytes.get(self.terminator()) == Some(&TERMINATOR)
    }
}

/// Finds and decodes the length prefix in the first bytes of a frame.
///
/// The `:` must show up within `probe_size` bytes; the digits before it must be a
/// non-zero ASCII decimal number.
#[derive(Debug, Clone, Copy)]
pub struct LengthFramer {
    probe_size: usize,
}

impl LengthFramer {
    pub fn new(probe_size: usize) -> Self {
        Self { probe_size }
    }

    pub fn probe_size(&self) -> usize {
        self.probe_size
    }

    /// Decodes the length prefix from the bytes received so far.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(frame))` once the prefix is complete
    /// - `Ok(None)` if no `:` arrived yet and the probe window is not used up
    /// - `Err(ScgiError::InvalidFraming)` if the window is used up without a `:`, or the
    ///   length is empty, non-numeric, zero or does not fit in `usize`
    pub fn decode(&self, prefix: &[u8]) -> Result<Option<Frame>, ScgiError> {
        let window = &prefix[..prefix.len().min(self.probe_size)];
        let Some(delimiter) = window.iter().position(|b| *b == DELIMITER) else {
            ensure!(
                prefix.len() < self.probe_size,
                ScgiError::invalid_framing(format!("no length delimiter within the first {} bytes", self.probe_size))
            );
            return Ok(None);
        };

        let declared = parse_length(&prefix[..delimiter])?;
        ensure!(declared > 0, ScgiError::invalid_framing("declared header length is zero"));

        let head_offset = delimiter + 1;
        ensure!(
            declared.checked_add(head_offset + 1).is_some(),
            ScgiError::invalid_framing(format!("declared header length {declared} overflows"))
        );

        trace!(declared, head_offset, "decoded header length prefix");
        Ok(Some(Frame::new(declared, head_offset)))
    }
}

fn parse_length(digits: &[u8]) -> Result<usize, ScgiError> {
    ensure!(!digits.is_empty(), ScgiError::invalid_framing("missing header length"));

    digits.iter().try_fold(0usize, |length, b| {
        ensure!(
            b.is_ascii_digit(),
            ScgiError::invalid_framing(format!("header length {:?} is not a decimal number", String::from_utf8_lossy(digits)))
        );
        length
            .checked_mul(10)
            .and_then(|length| length.checked_add(usize::from(b - b'0')))
            .ok_or_else(|| ScgiError::invalid_framing("header length overflows"))
    })
}
