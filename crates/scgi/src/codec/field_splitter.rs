//! Splitting of the NUL separated field block into key/value pairs.

use std::ops::Range;

use bytes::Bytes;
use tracing::trace;

use crate::ensure;
use crate::protocol::{HeaderTable, ScgiError};

const TERMINATOR: u8 = b'\0';

/// Initial table capacity, enough for a typical web server's SCGI parameters.
const EXPECTED_FIELDS: usize = 32;

/// Splits the field block of a received frame into a [`HeaderTable`].
///
/// Fields alternate key, value, key, value, each followed by a NUL. The splitter never
/// looks for terminators outside its region: a key without a NUL before the region end,
/// or a key with nothing after its NUL, is rejected. The last value may run up to the
/// region end only when the byte right after the region is a NUL.
#[derive(Debug)]
pub struct FieldSplitter {
    frame: Bytes,
    region: Range<usize>,
}

impl FieldSplitter {
    /// # Panics
    ///
    /// Panics if `region` is not inside `frame`.
    pub fn new(frame: Bytes, region: Range<usize>) -> Self {
        assert!(region.start <= region.end && region.end <= frame.len(), "field region {region:?} out of frame bounds");
        Self { frame, region }
    }

    pub fn split(&self) -> Result<HeaderTable, ScgiError> {
        let (start, end) = (self.region.start, self.region.end);
        let mut table = HeaderTable::with_capacity(EXPECTED_FIELDS);

        let mut cursor = start;
        while cursor < end {
            let key_end = self
                .find_terminator(cursor..end)
                .ok_or_else(|| ScgiError::invalid_framing(format!("header key at offset {cursor} is not terminated")))?;

            let value_start = key_end + 1;
            ensure!(value_start < end, ScgiError::invalid_framing(format!("header key at offset {cursor} has no value")));
            let value_end = match self.find_terminator(value_start..end) {
                Some(value_end) => value_end,
                // a length one short of the fields puts the last NUL on the frame's trailing byte
                None if self.frame.get(end) == Some(&TERMINATOR) => end,
                None => {
                    return Err(ScgiError::invalid_framing(format!("header value at offset {value_start} is not terminated")));
                }
            };

            let key = self.frame.slice(cursor..key_end);
            let value = self.frame.slice(value_start..value_end);
            trace!(?key, ?value, "split header field");
            table.insert(key, value);

            cursor = value_end + 1;
        }

        Ok(table)
    }

    fn find_terminator(&self, range: Range<usize>) -> Option<usize> {
        let offset = range.start;
        self.frame[range].iter().position(|b| *b == TERMINATOR).map(|index| offset + index)
    }
}
