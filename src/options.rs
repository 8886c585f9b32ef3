//! Runtime codec configuration.

use serde::{Deserialize, Serialize};

use crate::compressed::Compressed;
use crate::decoder::{decompress, decompress_framed};
use crate::encoder::compress_with;
use crate::error::{Error, Result};
use crate::layout::Layout;

/// Selects the delta transform and the element-count header.
///
/// Encoder and decoder must agree on both flags; neither is recorded in the
/// stream.
///
/// ```
/// use vbyte64::Options;
///
/// let opts = Options::new().delta(true).framed(true);
/// let ids = [10u64, 11, 15, 40, 41];
/// let compressed = opts.compress(&ids).unwrap();
/// assert_eq!(opts.decompress(compressed.as_bytes(), None).unwrap(), ids);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Options {
    /// Store differences between consecutive values instead of the values
    #[serde(default)]
    pub delta: bool,
    /// Prefix the stream with the element count
    #[serde(default)]
    pub framed: bool,
}

impl Options {
    /// Plain, unframed
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { delta: false, framed: false }
    }

    #[inline]
    #[must_use]
    pub const fn delta(mut self, delta: bool) -> Self {
        self.delta = delta;
        self
    }

    #[inline]
    #[must_use]
    pub const fn framed(mut self, framed: bool) -> Self {
        self.framed = framed;
        self
    }

    /// Layout `values` will be encoded with
    #[must_use]
    pub fn layout(&self, values: &[u64]) -> Layout {
        Layout::for_values(values, self.delta, self.framed)
    }

    /// Compress `values` with these options.
    ///
    /// # Errors
    /// Returns [`Error::Alloc`] if the output buffer cannot be allocated.
    pub fn compress(&self, values: &[u64]) -> Result<Compressed> {
        compress_with(values, self.delta, self.framed)
    }

    /// Decompress `buf` with these options.
    ///
    /// Framed buffers carry their own count and `n` is ignored; unframed ones
    /// need it.
    ///
    /// # Errors
    /// Returns [`Error::MissingLength`] when decoding an unframed buffer with
    /// `n` of `None`, otherwise the errors of [`decompress`] and
    /// [`decompress_framed`].
    pub fn decompress(&self, buf: &[u8], n: Option<usize>) -> Result<Vec<u64>> {
        if self.framed {
            decompress_framed(buf, self.delta)
        } else {
            let n = n.ok_or(Error::MissingLength)?;
            decompress(buf, n, self.delta)
        }
    }
}
