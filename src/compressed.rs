//! Owned result of an in-memory compression.

use crate::layout::Layout;

/// A compressed buffer together with its logical length.
///
/// The allocation is sized by [`Layout::alloc_len`] and therefore carries the
/// safety margin after the last data byte; only the first [`len`](Self::len)
/// bytes belong to the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compressed {
    pub(crate) buf: Vec<u8>,
    pub(crate) used: usize,
    pub(crate) layout: Layout,
}

impl Compressed {
    /// Logical bytes of the stream (header, keys and data; no margin)
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.used]
    }

    /// Number of bytes used by the stream
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.used
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// Size of the underlying allocation, safety margin included
    #[inline]
    #[must_use]
    pub fn allocated(&self) -> usize {
        self.buf.len()
    }

    /// Region offsets of this stream
    #[inline]
    #[must_use]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Full allocation (margin included) and the logical length
    #[must_use]
    pub fn into_raw_parts(self) -> (Vec<u8>, usize) {
        (self.buf, self.used)
    }

    /// Stream bytes with the trailing margin dropped
    #[must_use]
    pub fn into_vec(mut self) -> Vec<u8> {
        self.buf.truncate(self.used);
        self.buf
    }
}

impl AsRef<[u8]> for Compressed {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
