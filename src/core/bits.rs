//! Fixed-width binary formatting.
//!
//! Stateless helpers for printing linear positions and checksums as
//! zero-padded bit strings whose width depends only on the board size.

/// Number of bits needed to address every cell of a `size` x `size` board.
///
/// `size` must be a power of two, so this is exactly `log2(size²)`.
#[inline]
pub fn bit_width(size: usize) -> usize {
    2 * size.trailing_zeros() as usize
}

/// Format `value` as a binary string padded with zeros to `width` bits.
#[inline]
pub fn bitstring(value: usize, width: usize) -> String {
    format!("{:0width$b}", value, width = width)
}
