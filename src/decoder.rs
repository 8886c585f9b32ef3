//! Decoding functionality for vbyte64 encoded data.

use crate::constants::{CODES_PER_KEY, HEADER_SIZE, MAX_WIDTH, NIBBLE_MASK};
use crate::error::{Error, Result, Stream};
use crate::layout::Layout;

/// Origin of the two parallel input streams
pub trait Source {
    /// Next packed key byte
    ///
    /// # Errors
    /// Returns an error if the key stream is exhausted or unreadable.
    fn next_key(&mut self) -> Result<u8>;

    /// Next `width` bytes of the data stream as a zero-extended little-endian `u64`
    ///
    /// # Errors
    /// Returns an error if the data stream is exhausted or unreadable.
    fn take_value(&mut self, width: u8) -> Result<u64>;
}

/// Decode `out.len()` values from `source`.
///
/// Width codes are read nibble by nibble, low nibble first; in delta mode each
/// decoded number is added (wrapping) to the previously reconstructed value.
///
/// # Errors
/// Returns [`Error::InvalidWidth`] for a nibble above 8 and propagates any
/// error reported by the source.
pub fn unpack<S: Source>(source: &mut S, delta: bool, out: &mut [u64]) -> Result<()> {
    let mut key = 0u8;
    let mut prev = 0u64;

    for (index, slot) in out.iter_mut().enumerate() {
        let code = if index % CODES_PER_KEY == 0 {
            key = source.next_key()?;
            key & NIBBLE_MASK
        } else {
            key >> 4
        };

        if code > MAX_WIDTH {
            return Err(Error::InvalidWidth { code, index });
        }

        let raw = source.take_value(code)?;
        let value = if delta { prev.wrapping_add(raw) } else { raw };
        *slot = value;
        prev = value;
    }

    Ok(())
}

/// Source over two byte slices, with every read bounds-checked
pub struct BufferSource<'a> {
    keys: &'a [u8],
    data: &'a [u8],
    key_pos: usize,
    data_pos: usize,
}

impl<'a> BufferSource<'a> {
    #[inline]
    pub fn new(keys: &'a [u8], data: &'a [u8]) -> Self {
        Self { keys, data, key_pos: 0, data_pos: 0 }
    }

    /// Data bytes consumed so far
    #[inline]
    #[must_use]
    pub fn data_consumed(&self) -> usize {
        self.data_pos
    }
}

impl Source for BufferSource<'_> {
    #[inline]
    fn next_key(&mut self) -> Result<u8> {
        let key = *self
            .keys
            .get(self.key_pos)
            .ok_or(Error::Truncated { stream: Stream::Key })?;
        self.key_pos += 1;
        Ok(key)
    }

    #[inline]
    fn take_value(&mut self, width: u8) -> Result<u64> {
        let w = usize::from(width);
        let bytes = self
            .data
            .get(self.data_pos..self.data_pos + w)
            .ok_or(Error::Truncated { stream: Stream::Data })?;
        self.data_pos += w;
        Ok(read_partial_le(bytes))
    }
}

/// Zero-extend up to 8 little-endian bytes into a u64
#[inline]
pub(crate) fn read_partial_le(bytes: &[u8]) -> u64 {
    let mut word = [0u8; 8];
    word[..bytes.len()].copy_from_slice(bytes);
    u64::from_le_bytes(word)
}

/// Read the element count stored in the first 8 bytes of a framed stream
///
/// # Errors
/// Returns [`Error::BufferTooShort`] if `buf` is shorter than the header and
/// [`Error::LengthOverflow`] if the count does not fit in `usize`.
pub fn read_count(buf: &[u8]) -> Result<usize> {
    let header: [u8; HEADER_SIZE] = buf
        .get(..HEADER_SIZE)
        .and_then(|h| h.try_into().ok())
        .ok_or(Error::BufferTooShort { expected: HEADER_SIZE, actual: buf.len() })?;
    let count = u64::from_le_bytes(header);
    usize::try_from(count).map_err(|_| Error::LengthOverflow(count))
}

/// Allocate the output array for `count` values, reporting failure instead of aborting
pub(crate) fn alloc_values(count: usize) -> Result<Vec<u64>> {
    let mut out = Vec::new();
    out.try_reserve_exact(count).map_err(|source| Error::Alloc {
        requested: count.saturating_mul(std::mem::size_of::<u64>()),
        source,
    })?;
    out.resize(count, 0);
    Ok(out)
}

/// Decode from caller-provided key and data regions into `out`.
///
/// Returns the number of data bytes consumed.
///
/// # Errors
/// Returns an error if either region ends early or holds an invalid width code.
pub fn decode_into(keys: &[u8], data: &[u8], delta: bool, out: &mut [u64]) -> Result<usize> {
    let mut source = BufferSource::new(keys, data);
    unpack(&mut source, delta, out)?;
    Ok(source.data_consumed())
}

fn decompress_layout(buf: &[u8], layout: Layout, delta: bool) -> Result<Vec<u64>> {
    let data_offset = layout.data_offset();
    if buf.len() < data_offset {
        return Err(Error::BufferTooShort { expected: data_offset, actual: buf.len() });
    }

    let keys = &buf[layout.key_offset()..data_offset];
    let data = &buf[data_offset..];
    let mut out = alloc_values(layout.count)?;
    decode_into(keys, data, delta, &mut out)?;
    Ok(out)
}

/// Decompress `n` values from an unframed buffer produced by [`compress`](crate::compress).
///
/// `delta` must match the flag used when compressing.
///
/// # Errors
/// Returns [`Error::BufferTooShort`] if `buf` cannot hold the key region for
/// `n` values, [`Error::Truncated`] or [`Error::InvalidWidth`] for corrupt
/// input, and [`Error::Alloc`] if the output cannot be allocated.
pub fn decompress(buf: &[u8], n: usize, delta: bool) -> Result<Vec<u64>> {
    decompress_layout(buf, Layout::for_count(n, false), delta)
}

/// Decompress a framed buffer produced by [`compress_framed`](crate::compress_framed),
/// recovering the element count from its header.
///
/// # Errors
/// As [`decompress`], plus [`Error::LengthOverflow`] for an unrepresentable count.
pub fn decompress_framed(buf: &[u8], delta: bool) -> Result<Vec<u64>> {
    let count = read_count(buf)?;
    decompress_layout(buf, Layout::for_count(count, true), delta)
}
