//! Format constants and small helpers shared by the encoder, decoder and file codec.

/// Wire format version.
///
/// Version 1 assigns width code 0 to the value zero (no data bytes stored).
/// Streams produced with a "zero occupies one byte" convention are not
/// compatible and must not be fed to this decoder.
pub const FORMAT_VERSION: u8 = 1;

/// Extra bytes appended to every in-memory allocation beyond the logical stream.
///
/// The buffer packer copies whole 8-byte words and then advances by the
/// value's width, so up to 7 bytes past the logical end may be touched.
pub const PADDING: usize = 64;

/// Size of the element-count header of framed buffers and files (u64, little-endian).
pub const HEADER_SIZE: usize = 8;

/// Largest width code a valid stream can contain.
pub const MAX_WIDTH: u8 = 8;

/// Mask of one key nibble
pub(crate) const NIBBLE_MASK: u8 = 0x0F;

/// Number of width codes packed into one key byte
pub(crate) const CODES_PER_KEY: usize = 2;

// THRESHOLDS[k] is the largest value that fits in k bytes (256^k - 1)
pub(crate) const THRESHOLDS: [u64; 8] = [
    0,
    0x0000_0000_0000_00FF,
    0x0000_0000_0000_FFFF,
    0x0000_0000_00FF_FFFF,
    0x0000_0000_FFFF_FFFF,
    0x0000_00FF_FFFF_FFFF,
    0x0000_FFFF_FFFF_FFFF,
    0x00FF_FFFF_FFFF_FFFF,
];

/// Number of key bytes needed for `n` values (two nibbles per byte, rounded up)
#[inline]
#[must_use]
pub const fn key_size(n: usize) -> usize {
    n / CODES_PER_KEY + n % CODES_PER_KEY
}

/// Header length for a layout with or without the element-count header
#[inline]
#[must_use]
pub const fn header_len(framed: bool) -> usize {
    if framed {
        HEADER_SIZE
    } else {
        0
    }
}

/// Write a u64 into `buf` at `offset` in little-endian order
#[inline]
pub(crate) fn write_u64_le(buf: &mut [u8], offset: usize, value: u64) {
    buf[offset..offset + HEADER_SIZE].copy_from_slice(&value.to_le_bytes());
}
