//! Base-128 variable-length encoding for unsigned 64-bit integers.
//!
//! Each byte carries seven value bits, least significant group first. The
//! high bit of a byte is set iff another byte follows:
//!
//! ```text
//! 300 = 0b1_0010_1100
//!
//!   byte 0: 1 0101100   (continuation, low 7 bits)
//!   byte 1: 0 0000010   (last, next 7 bits)
//!
//! => [0xAC, 0x02]
//! ```
//!
//! A `u64` needs at most [`MAX_BYTES`] bytes. The tenth byte may only carry
//! the single remaining value bit; anything more is an [`Overflow`].
//!
//! Decoding accepts non-minimal encodings (e.g. `[0x80, 0x00]` for zero);
//! encoding always produces the minimal form.
//!
//! # Examples
//!
//! ```
//! let mut buf = Vec::new();
//! wirepb::varint::encode(300, &mut buf);
//! assert_eq!(buf, [0xAC, 0x02]);
//!
//! let (value, len) = wirepb::varint::decode(&buf).unwrap();
//! assert_eq!((value, len), (300, 2));
//! ```
//!
//! [`Overflow`]: DecodeError::Overflow

use alloc::vec::Vec;

/// Maximum number of bytes a varint-encoded `u64` can occupy.
pub const MAX_BYTES: usize = 10;

/// Continuation flag.
const MORE: u8 = 0x80;

/// Value bits of a single byte.
const VALUE_MASK: u8 = 0x7F;

/// Errors that can occur when decoding a varint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The input ended before a byte without the continuation bit.
    BufferTooShort,

    /// The encoding runs past [`MAX_BYTES`] or carries bits beyond 64.
    Overflow,
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BufferTooShort => f.write_str("buffer too short for varint"),
            Self::Overflow => f.write_str("varint overflows u64"),
        }
    }
}

impl core::error::Error for DecodeError {}

/// Returns the encoded length of `value` in bytes (1–10).
///
/// # Examples
///
/// ```
/// assert_eq!(wirepb::varint::encoded_len(0), 1);
/// assert_eq!(wirepb::varint::encoded_len(127), 1);
/// assert_eq!(wirepb::varint::encoded_len(128), 2);
/// assert_eq!(wirepb::varint::encoded_len(u64::MAX), 10);
/// ```
#[must_use]
pub const fn encoded_len(value: u64) -> usize {
    // One byte per started group of seven significant bits; zero still takes one.
    let bits = 64 - (value | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}

/// Encodes `value` as a varint, appending bytes to `buf`.
///
/// # Examples
///
/// ```
/// let mut buf = Vec::new();
/// wirepb::varint::encode(1, &mut buf);
/// wirepb::varint::encode(150, &mut buf);
/// assert_eq!(buf, [0x01, 0x96, 0x01]);
/// ```
pub fn encode(value: u64, buf: &mut Vec<u8>) {
    let (bytes, len) = encode_array(value);
    buf.extend(bytes.iter().take(len));
}

/// Encodes `value` as a varint into a fixed-size array.
///
/// Returns `(bytes, len)` where the encoding occupies `bytes[..len]`.
///
/// # Examples
///
/// ```
/// let (bytes, len) = wirepb::varint::encode_array(300);
/// assert_eq!(&bytes[..len], &[0xAC, 0x02]);
/// ```
#[must_use]
#[allow(clippy::indexing_slicing)] // i < encoded_len(value) <= MAX_BYTES
#[allow(clippy::cast_possible_truncation)] // masked to 7 bits
pub const fn encode_array(mut value: u64) -> ([u8; MAX_BYTES], usize) {
    let mut out = [0u8; MAX_BYTES];
    let mut i = 0;

    while value >= MORE as u64 {
        out[i] = (value as u8 & VALUE_MASK) | MORE;
        value >>= 7;
        i += 1;
    }
    out[i] = value as u8;

    (out, i + 1)
}

/// Decodes a varint from the front of `buf`.
///
/// Returns `(value, bytes_consumed)` on success. Bytes after the terminating
/// byte are not examined.
///
/// # Errors
///
/// - [`DecodeError::BufferTooShort`] if `buf` ends while the continuation
///   bit is still set (including an empty `buf`).
/// - [`DecodeError::Overflow`] if no terminator appears within
///   [`MAX_BYTES`] bytes, or the tenth byte carries more than one bit.
///
/// # Examples
///
/// ```
/// use wirepb::varint::{decode, DecodeError};
///
/// assert_eq!(decode(&[0x96, 0x01, 0xFF]), Ok((150, 2)));
/// assert_eq!(decode(&[0x96]), Err(DecodeError::BufferTooShort));
/// ```
#[allow(clippy::indexing_slicing)] // i < buf.len() checked by loop guard
pub const fn decode(buf: &[u8]) -> Result<(u64, usize), DecodeError> {
    let mut value = 0u64;
    let mut i = 0;

    while i < MAX_BYTES {
        if i >= buf.len() {
            return Err(DecodeError::BufferTooShort);
        }

        let byte = buf[i];
        if i == MAX_BYTES - 1 && byte > 1 {
            return Err(DecodeError::Overflow);
        }

        value |= ((byte & VALUE_MASK) as u64) << (7 * i);
        if byte & MORE == 0 {
            return Ok((value, i + 1));
        }
        i += 1;
    }

    Err(DecodeError::Overflow)
}

/// Whether `byte` is the last byte of a varint.
#[must_use]
pub const fn is_last(byte: u8) -> bool {
    byte & MORE == 0
}

// ============================================================
// Tests
// ============================================================
