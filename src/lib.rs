//! `vbyte64` - Variable-byte compression for 64-bit integer sequences
//!
//! Packs arrays of `u64` (sorted ID lists, timestamps, counters) so that each
//! value takes only as many bytes as its magnitude needs, instead of a fixed 8.
//! An optional delta transform stores the difference between consecutive
//! values, which keeps monotonic or clustered sequences in 1-2 bytes per value.
//!
//! # Features
//! - **Exact sizing**: the output size is computed before allocation; the
//!   buffer is allocated once and never grows
//! - **Two placements**: in-memory buffers, or direct-to-file streaming that
//!   never holds the compressed output in memory
//! - **Hardened decoding**: truncated or inconsistent input is reported as an
//!   error, never read out of bounds
//!
//! # Example
//! ```
//! use vbyte64::{compress_framed, decompress_framed};
//!
//! let ids = [0u64, 13, 16, 17, 20, 20];
//! let compressed = compress_framed(&ids, true).unwrap();
//! println!("Encoded size: {} bytes", compressed.len());
//!
//! let decoded = decompress_framed(compressed.as_bytes(), true).unwrap();
//! assert_eq!(decoded, ids);
//! ```
//!
//! # Wire Format (version 1)
//!
//! | Offset | Size | Field | Description |
//! |--------|------|-------|-------------|
//! | 0 | 8 | `count` | Number of values, u64 little-endian. Framed buffers and files only. |
//! | 0 or 8 | ceil(N/2) | keys | One 4-bit width code per value, two per byte, low nibble first. |
//! | after keys | sum(widths) | data | Each value's significant bytes, low-order byte first. |
//!
//! In-memory buffers are followed by [`PADDING`] bytes of undefined content
//! which are not part of the stream; [`Compressed::as_bytes`] excludes them.
//!
//! ## Width Codes
//!
//! | Code | Bytes | Value range |
//! |------|-------|-------------|
//! | 0 | 0 | exactly 0 |
//! | 1 | 1 | 1 ..= 2^8 - 1 |
//! | 2 | 2 | 2^8 ..= 2^16 - 1 |
//! | ... | ... | ... |
//! | 8 | 8 | 2^56 ..= 2^64 - 1 |
//!
//! Codes 9-15 never occur in a valid stream and are rejected when decoding.
//!
//! ## Delta Mode
//!
//! The first value is stored as-is, every later value as
//! `value[i].wrapping_sub(value[i - 1])`. Non-decreasing input gives the
//! smallest widths; decreasing pairs wrap around to large widths but still
//! decode exactly. Decoding is strictly sequential.
//!
//! # Internal Implementation
//!
//! ## Width Calculation
//!
//! By default the width is `(71 - leading_zeros) / 8`, which maps zero to 0
//! without a branch. The `no-clz` feature switches to a ladder of eight
//! magnitude comparisons; both are exposed as [`Clz`] and [`Ladder`].
//!
//! ## Two Cursors
//!
//! Encoding walks the input once and writes to two places at the same time:
//! the key region and the data region. Because the data region starts at
//! `header + ceil(N/2)`, its offset is known from N alone, so a file can be
//! written through two independent handles without buffering either stream.

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

mod compressed;
mod constants;
mod decoder;
mod encoder;
mod error;
mod file;
mod inspect;
mod layout;
mod options;
mod width;

#[cfg(test)]
mod tests;

// Re-export public API
pub use compressed::Compressed;
pub use constants::{key_size, FORMAT_VERSION, HEADER_SIZE, MAX_WIDTH, PADDING};
pub use decoder::{decode_into, decompress, decompress_framed, read_count, unpack, BufferSource, Source};
pub use encoder::{compress, compress_framed, encode_into, pack, BufferSink, Sink};
pub use error::{Error, Result, Stream};
pub use file::{compress_to_file, decompress_from_file, read_file_header};
pub use inspect::{inspect_file, inspect_framed, Summary};
pub use layout::{compressed_size, data_size, Layout};
pub use options::Options;
pub use width::{width, Clz, DefaultWidth, Ladder, WidthStrategy};
