//! Byte-width calculation for 64-bit values.
//!
//! Uses the sealed trait pattern so the set of strategies stays closed: both
//! implementations must agree bit-for-bit, and the codec picks one at compile
//! time through the `no-clz` feature.

use crate::constants::THRESHOLDS;

/// Private module to seal the trait - users cannot add width strategies
mod private {
    pub trait Sealed {}

    impl Sealed for super::Clz {}
    impl Sealed for super::Ladder {}
}

/// A way of computing the minimal number of bytes holding a `u64`.
///
/// Returns a code in `0..=8`; zero needs no bytes at all.
pub trait WidthStrategy: private::Sealed {
    /// Minimal byte count of `v`
    fn width(v: u64) -> u8;
}

/// Width from the leading-zero count.
///
/// `ceil(significant_bits / 8)` rewritten as `(71 - lzcnt) / 8`, so the zero
/// value (lzcnt = 64) maps to 0 without a branch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Clz;

/// Width from eight magnitude comparisons against the powers of 256.
///
/// For targets without a cheap leading-zero instruction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ladder;

impl WidthStrategy for Clz {
    #[inline]
    fn width(v: u64) -> u8 {
        ((71 - v.leading_zeros()) >> 3) as u8
    }
}

impl WidthStrategy for Ladder {
    #[inline]
    fn width(v: u64) -> u8 {
        THRESHOLDS.iter().map(|&t| u8::from(v > t)).sum()
    }
}

/// Strategy used by the codec
#[cfg(not(feature = "no-clz"))]
pub type DefaultWidth = Clz;

/// Strategy used by the codec
#[cfg(feature = "no-clz")]
pub type DefaultWidth = Ladder;

/// Minimal number of bytes needed to store `v` (0..=8)
///
/// ```
/// assert_eq!(vbyte64::width(0), 0);
/// assert_eq!(vbyte64::width(255), 1);
/// assert_eq!(vbyte64::width(256), 2);
/// assert_eq!(vbyte64::width(u64::MAX), 8);
/// ```
#[inline]
#[must_use]
pub fn width(v: u64) -> u8 {
    DefaultWidth::width(v)
}

/// Iterate `values` as they are width-coded: unchanged in plain mode, as
/// successive wrapping differences in delta mode.
///
/// The estimator and the packer both walk this iterator, which keeps the
/// precomputed size and the bytes produced in lockstep.
pub(crate) fn transformed(values: &[u64], delta: bool) -> impl Iterator<Item = u64> + '_ {
    let mut prev = 0u64;
    values.iter().map(move |&v| {
        let out = if delta { v.wrapping_sub(prev) } else { v };
        prev = v;
        out
    })
}
