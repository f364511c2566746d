//! The parsed SCGI header mapping.
//!
//! Keys and values are [`Bytes`] slices of the frozen header buffer, so building the
//! table never copies field data and the table can outlive the request that produced it.

use std::collections::HashMap;
use std::collections::hash_map::Iter;

use bytes::Bytes;

/// Key/value pairs from one SCGI header block.
///
/// A key that appears more than once keeps its last value. The table is only ever
/// handed out fully populated; readers never observe a partially split frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderTable {
    inner: HashMap<Bytes, Bytes>,
}

impl HeaderTable {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self { inner: HashMap::with_capacity(capacity) }
    }

    pub(crate) fn insert(&mut self, key: Bytes, value: Bytes) -> Option<Bytes> {
        self.inner.insert(key, value)
    }

    /// Returns the raw value stored under `key`.
    pub fn get<K: AsRef<[u8]>>(&self, key: K) -> Option<&Bytes> {
        self.inner.get(key.as_ref())
    }

    /// Returns the value under `key` if it is valid UTF-8.
    pub fn get_str<K: AsRef<[u8]>>(&self, key: K) -> Option<&str> {
        self.get(key).and_then(|value| std::str::from_utf8(value).ok())
    }

    pub fn contains_key<K: AsRef<[u8]>>(&self, key: K) -> bool {
        self.inner.contains_key(key.as_ref())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Bytes, Bytes> {
        self.inner.iter()
    }
}

impl<'a> IntoIterator for &'a HeaderTable {
    type Item = (&'a Bytes, &'a Bytes);
    type IntoIter = Iter<'a, Bytes, Bytes>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
