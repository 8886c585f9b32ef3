//! Structural summary of a framed stream, computed from its key region alone.

use std::path::Path;

use serde::Serialize;

use crate::constants::{CODES_PER_KEY, MAX_WIDTH, NIBBLE_MASK};
use crate::decoder::read_count;
use crate::error::{Error, Result, Stream};
use crate::layout::Layout;

/// What a framed buffer or compressed file contains
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Number of encoded values
    pub count: usize,
    /// Size of the key region in bytes
    pub key_len: usize,
    /// Size of the data region in bytes (sum of width codes)
    pub data_len: usize,
    /// `widths[w]` is the number of values stored in `w` bytes
    pub widths: [usize; 9],
}

impl Summary {
    /// Logical size of the stream, header included
    #[must_use]
    pub fn logical_len(&self) -> usize {
        Layout {
            count: self.count,
            framed: true,
            data_len: self.data_len,
        }
        .logical_len()
    }

    /// Uncompressed size (8 bytes per value) over compressed size
    #[must_use]
    pub fn ratio(&self) -> f64 {
        (self.count * 8) as f64 / self.logical_len() as f64
    }
}

/// Summarise a framed buffer without decoding its values.
///
/// # Errors
/// Returns a corrupt-input error if the header or key region is missing, a
/// width code is invalid, or the buffer is shorter than the data region the
/// key stream describes.
pub fn inspect_framed(buf: &[u8]) -> Result<Summary> {
    let count = read_count(buf)?;
    let layout = Layout::for_count(count, true);
    let keys = buf
        .get(layout.key_offset()..layout.data_offset())
        .ok_or(Error::BufferTooShort { expected: layout.data_offset(), actual: buf.len() })?;

    let mut widths = [0usize; 9];
    let mut data_len = 0usize;
    for index in 0..count {
        let key = keys[index / CODES_PER_KEY];
        let code = if index % CODES_PER_KEY == 0 { key & NIBBLE_MASK } else { key >> 4 };
        if code > MAX_WIDTH {
            return Err(Error::InvalidWidth { code, index });
        }
        widths[usize::from(code)] += 1;
        data_len += usize::from(code);
    }

    if buf.len() < layout.data_offset() + data_len {
        return Err(Error::Truncated { stream: Stream::Data });
    }

    Ok(Summary {
        count,
        key_len: layout.key_len(),
        data_len,
        widths,
    })
}

/// Summarise a file written by [`compress_to_file`](crate::compress_to_file).
///
/// # Errors
/// Returns [`Error::Io`] if the file cannot be read, otherwise as [`inspect_framed`].
pub fn inspect_file<P: AsRef<Path>>(path: P) -> Result<Summary> {
    let bytes = std::fs::read(path)?;
    inspect_framed(&bytes)
}
