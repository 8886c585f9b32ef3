//! Size estimation and region offsets of a compressed stream.
//!
//! Everything here is pure arithmetic over the input: no allocation, no I/O.
//! Encoders size their output with [`Layout::for_values`] before writing a
//! single byte; decoders rebuild the key and data offsets from the element
//! count alone with [`Layout::for_count`].

use serde::Serialize;

use crate::constants::{header_len, key_size, PADDING};
use crate::width::{transformed, width};

/// Number of data-stream bytes `values` will occupy once encoded.
///
/// In delta mode the first element is sized on its raw value and every later
/// element on its wrapping difference from the previous one.
#[must_use]
pub fn data_size(values: &[u64], delta: bool) -> usize {
    transformed(values, delta).map(|v| usize::from(width(v))).sum()
}

/// Allocation size for compressing `values` without a header:
/// key stream + data stream + [`PADDING`].
///
/// ```
/// use vbyte64::{compressed_size, PADDING};
///
/// // widths 0, 1, 1, 1, 1, 0 => 4 data bytes, 3 key bytes
/// let values = [0, 13, 16, 17, 20, 20];
/// assert_eq!(compressed_size(&values, true), 3 + 4 + PADDING);
/// ```
#[must_use]
pub fn compressed_size(values: &[u64], delta: bool) -> usize {
    key_size(values.len()) + data_size(values, delta) + PADDING
}

/// Positions of the header, key and data regions in a compressed stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Layout {
    /// Number of encoded values
    pub count: usize,
    /// Whether the stream starts with the element-count header
    pub framed: bool,
    /// Length of the data region (0 when only the count is known)
    pub data_len: usize,
}

impl Layout {
    /// Layout of the stream that encoding `values` will produce
    #[must_use]
    pub fn for_values(values: &[u64], delta: bool, framed: bool) -> Self {
        Self {
            count: values.len(),
            framed,
            data_len: data_size(values, delta),
        }
    }

    /// Layout known from the element count alone (decode side)
    #[must_use]
    pub const fn for_count(count: usize, framed: bool) -> Self {
        Self {
            count,
            framed,
            data_len: 0,
        }
    }

    #[inline]
    #[must_use]
    pub const fn header_len(&self) -> usize {
        header_len(self.framed)
    }

    #[inline]
    #[must_use]
    pub const fn key_len(&self) -> usize {
        key_size(self.count)
    }

    /// Start of the key region
    #[inline]
    #[must_use]
    pub const fn key_offset(&self) -> usize {
        self.header_len()
    }

    /// Start of the data region: header + key region
    #[inline]
    #[must_use]
    pub const fn data_offset(&self) -> usize {
        self.header_len() + self.key_len()
    }

    /// Bytes that are logically part of the stream
    #[inline]
    #[must_use]
    pub const fn logical_len(&self) -> usize {
        self.data_offset() + self.data_len
    }

    /// Bytes to allocate for an in-memory stream, safety margin included
    #[inline]
    #[must_use]
    pub const fn alloc_len(&self) -> usize {
        self.logical_len() + PADDING
    }

    /// Largest element count a stream of `len` bytes could describe.
    ///
    /// Every value needs at least half a key byte; anything above this bound
    /// cannot be backed by the input and is rejected before allocating.
    #[inline]
    #[must_use]
    pub const fn max_count(len: usize, framed: bool) -> usize {
        len.saturating_sub(header_len(framed)).saturating_mul(2)
    }
}
