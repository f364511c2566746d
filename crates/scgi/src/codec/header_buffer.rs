//! Growable storage for the bytes of one SCGI header frame.

use bytes::{Bytes, BytesMut};
use tracing::debug;

use crate::codec::Frame;

/// Byte storage that header reads land in.
///
/// The storage is always initialized up to its capacity, so reads can target
/// `[filled_len, limit)` directly. It grows at most to the exact frame size and keeps
/// every received byte at its original offset when it does.
#[derive(Debug)]
pub struct HeaderBuffer {
    storage: BytesMut,
    filled: usize,
    frame: Option<Frame>,
}

impl HeaderBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { storage: BytesMut::zeroed(capacity), filled: 0, frame: None }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    #[inline]
    pub fn filled_len(&self) -> usize {
        self.filled
    }

    /// The bytes received so far.
    #[inline]
    pub fn filled(&self) -> &[u8] {
        &self.storage[..self.filled]
    }

    /// Frame geometry, once the length prefix has been decoded.
    #[inline]
    pub fn frame(&self) -> Option<Frame> {
        self.frame
    }

    pub fn head_offset(&self) -> Option<usize> {
        self.frame.map(|frame| frame.head_offset())
    }

    pub fn total_required(&self) -> Option<usize> {
        self.frame.map(|frame| frame.total_required())
    }

    /// Records the decoded frame and makes room for all of it.
    ///
    /// # Panics
    ///
    /// Panics if a frame was already recorded.
    pub fn set_frame(&mut self, frame: Frame) {
        assert!(self.frame.is_none(), "header frame already set");
        self.frame = Some(frame);
        self.ensure_capacity(frame.total_required());
    }

    /// Grows the storage to exactly `capacity` bytes, keeping the filled prefix.
    ///
    /// Never shrinks.
    pub fn ensure_capacity(&mut self, capacity: usize) {
        if capacity <= self.capacity() {
            return;
        }

        debug!(from = self.capacity(), to = capacity, filled = self.filled, "grow header buffer");
        let mut grown = BytesMut::zeroed(capacity);
        grown[..self.filled].copy_from_slice(&self.storage[..self.filled]);
        self.storage = grown;
    }

    /// The writable window `[filled_len, limit)`.
    ///
    /// # Panics
    ///
    /// Panics if `limit` is below `filled_len` or above the capacity.
    pub fn unfilled_mut(&mut self, limit: usize) -> &mut [u8] {
        &mut self.storage[self.filled..limit]
    }

    /// Marks `n` more bytes of the writable window as received.
    ///
    /// # Panics
    ///
    /// Panics if that would pass the capacity.
    pub fn advance(&mut self, n: usize) {
        assert!(self.filled + n <= self.capacity(), "advance past header buffer capacity");
        self.filled += n;
    }

    /// Consumes the buffer, returning the received bytes.
    pub fn freeze(self) -> Bytes {
        let mut storage = self.storage;
        storage.truncate(self.filled);
        storage.freeze()
    }
}
