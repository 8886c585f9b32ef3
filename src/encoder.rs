//! Encoder for vbyte64 compression.
//!
//! The packing loop is written once against the [`Sink`] trait; the buffer
//! codec and the file codec only differ in where the key bytes and value bytes
//! end up.

use crate::compressed::Compressed;
use crate::constants::{write_u64_le, CODES_PER_KEY};
use crate::error::{Error, Result};
use crate::layout::Layout;
use crate::width::{transformed, width};

/// Destination of the two parallel output streams
pub trait Sink {
    /// Append the `width` low-order bytes of `value` to the data stream
    ///
    /// # Errors
    /// Returns an error if the destination cannot take the bytes.
    fn put_value(&mut self, value: u64, width: u8) -> Result<()>;

    /// Append one packed key byte (two width codes, low nibble first)
    ///
    /// # Errors
    /// Returns an error if the destination cannot take the byte.
    fn put_key(&mut self, key: u8) -> Result<()>;
}

/// Encode `values` into `sink`.
///
/// Each value (or its delta from the previous one) goes to the data stream as
/// its significant bytes; its width code fills the next nibble of the key
/// stream. A key byte is emitted after every second value, and once more for a
/// trailing odd value with the high nibble left zero.
///
/// Returns the number of data-stream bytes written.
///
/// # Errors
/// Propagates the first error reported by the sink.
pub fn pack<S: Sink>(values: &[u64], delta: bool, sink: &mut S) -> Result<usize> {
    let mut written = 0usize;
    let mut key = 0u8;

    for (i, v) in transformed(values, delta).enumerate() {
        let code = width(v);
        sink.put_value(v, code)?;
        written += usize::from(code);

        if i % CODES_PER_KEY == 0 {
            key = code;
        } else {
            sink.put_key(key | (code << 4))?;
        }
    }

    if values.len() % CODES_PER_KEY == 1 {
        sink.put_key(key)?;
    }

    Ok(written)
}

/// Sink over two disjoint regions of one allocation
pub struct BufferSink<'a> {
    keys: &'a mut [u8],
    data: &'a mut [u8],
    key_pos: usize,
    data_pos: usize,
}

impl<'a> BufferSink<'a> {
    /// Create a sink writing keys and data from the start of each region
    #[inline]
    pub fn new(keys: &'a mut [u8], data: &'a mut [u8]) -> Self {
        Self { keys, data, key_pos: 0, data_pos: 0 }
    }

    /// Data bytes written so far
    #[inline]
    #[must_use]
    pub fn data_written(&self) -> usize {
        self.data_pos
    }
}

impl Sink for BufferSink<'_> {
    #[inline]
    fn put_value(&mut self, value: u64, width: u8) -> Result<()> {
        let w = usize::from(width);
        let bytes = value.to_le_bytes();
        let pos = self.data_pos;

        // Whole-word copy when the region (or its margin) has room; the bytes
        // past `w` are overwritten by the next value.
        if let Some(word) = self.data.get_mut(pos..pos + bytes.len()) {
            word.copy_from_slice(&bytes);
        } else {
            let actual = self.data.len();
            let dst = self
                .data
                .get_mut(pos..pos + w)
                .ok_or(Error::BufferTooShort { expected: pos + w, actual })?;
            dst.copy_from_slice(&bytes[..w]);
        }

        self.data_pos += w;
        Ok(())
    }

    #[inline]
    fn put_key(&mut self, key: u8) -> Result<()> {
        let actual = self.keys.len();
        let slot = self
            .keys
            .get_mut(self.key_pos)
            .ok_or(Error::BufferTooShort { expected: self.key_pos + 1, actual })?;
        *slot = key;
        self.key_pos += 1;
        Ok(())
    }
}

/// Encode `values` into caller-provided key and data regions.
///
/// `keys` must hold at least `key_size(values.len())` bytes and `data` at
/// least `data_size(values, delta)` bytes; with [`PADDING`](crate::PADDING)
/// extra bytes in `data` the fast whole-word copy is used throughout.
///
/// Returns the number of data bytes written.
///
/// # Errors
/// Returns [`Error::BufferTooShort`] if either region is too small.
pub fn encode_into(values: &[u64], delta: bool, keys: &mut [u8], data: &mut [u8]) -> Result<usize> {
    let mut sink = BufferSink::new(keys, data);
    pack(values, delta, &mut sink)
}

/// Allocate a zeroed buffer of exactly `len` bytes, reporting failure instead of aborting
pub(crate) fn alloc_bytes(len: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).map_err(|source| Error::Alloc { requested: len, source })?;
    buf.resize(len, 0);
    Ok(buf)
}

pub(crate) fn compress_with(values: &[u64], delta: bool, framed: bool) -> Result<Compressed> {
    let layout = Layout::for_values(values, delta, framed);
    let mut buf = alloc_bytes(layout.alloc_len())?;

    if framed {
        write_u64_le(&mut buf, 0, values.len() as u64);
    }

    let (keys, data) = buf[layout.key_offset()..].split_at_mut(layout.key_len());
    let written = encode_into(values, delta, keys, data)?;
    debug_assert_eq!(written, layout.data_len, "estimate and packer disagree");

    Ok(Compressed {
        used: layout.data_offset() + written,
        buf,
        layout,
    })
}

/// Compress `values` into a new buffer: key region followed by data region.
///
/// The element count is not stored; pass it to [`decompress`](crate::decompress).
///
/// # Errors
/// Returns [`Error::Alloc`] if the output buffer cannot be allocated.
///
/// # Example
/// ```
/// let values = [3u64, 300, 70_000];
/// let compressed = vbyte64::compress(&values, false).unwrap();
/// // 2 key bytes + 1 + 2 + 3 data bytes
/// assert_eq!(compressed.len(), 8);
/// let decoded = vbyte64::decompress(compressed.as_bytes(), values.len(), false).unwrap();
/// assert_eq!(decoded, values);
/// ```
pub fn compress(values: &[u64], delta: bool) -> Result<Compressed> {
    compress_with(values, delta, false)
}

/// Compress `values` into a self-describing buffer whose first 8 bytes hold
/// the element count.
///
/// # Errors
/// Returns [`Error::Alloc`] if the output buffer cannot be allocated.
///
/// # Example
/// ```
/// let timestamps = [1_700_000_000u64, 1_700_000_060, 1_700_000_120];
/// let compressed = vbyte64::compress_framed(&timestamps, true).unwrap();
/// let decoded = vbyte64::decompress_framed(compressed.as_bytes(), true).unwrap();
/// assert_eq!(decoded, timestamps);
/// ```
pub fn compress_framed(values: &[u64], delta: bool) -> Result<Compressed> {
    compress_with(values, delta, true)
}
