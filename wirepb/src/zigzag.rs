//! Mapping between signed integers and the unsigned values put on the wire.
//!
//! Non-negative `n` maps to `2n`; negative `n` maps to `2|n| + 1`:
//!
//! ```text
//!  n:   0   1  -1   2  -2   3  -3  ...
//!  v:   0   2   3   4   5   6   7  ...
//! ```
//!
//! This is **not** the protobuf `sint` convention (which sends `-1` to `1`).
//! Both keep small magnitudes small, but the two are not interchangeable:
//! payloads written here decode to different numbers under `sint` rules.
//!
//! The odd value `1` is never produced by a nonzero magnitude, so it is used
//! for `i64::MIN`, whose `2|n| + 1` does not fit in 64 bits. Every `i64` thus
//! has exactly one encoding.

/// The wire value reserved for `i64::MIN`.
const I64_MIN_CODE: u64 = 1;

/// Map an `i64` to its unsigned wire value.
///
/// # Examples
///
/// ```
/// use wirepb::zigzag;
///
/// assert_eq!(zigzag::encode_i64(0), 0);
/// assert_eq!(zigzag::encode_i64(25), 50);
/// assert_eq!(zigzag::encode_i64(-25), 51);
/// assert_eq!(zigzag::encode_i64(i64::MIN), 1);
/// ```
#[must_use]
#[allow(clippy::cast_sign_loss)] // n >= 0 in that branch
pub const fn encode_i64(n: i64) -> u64 {
    if n >= 0 {
        (n as u64) << 1
    } else if n == i64::MIN {
        I64_MIN_CODE
    } else {
        (n.unsigned_abs() << 1) | 1
    }
}

/// Map an `i32` to its unsigned wire value.
///
/// The result is exact in 64 bits; `i32::MIN` encodes to `2^32 + 1`.
#[must_use]
pub const fn encode_i32(n: i32) -> u64 {
    encode_i64(n as i64)
}

/// Inverse of [`encode_i64`].
///
/// Total over `u64`: every wire value names exactly one `i64`.
///
/// # Examples
///
/// ```
/// use wirepb::zigzag;
///
/// assert_eq!(zigzag::decode_i64(50), 25);
/// assert_eq!(zigzag::decode_i64(51), -25);
/// assert_eq!(zigzag::decode_i64(1), i64::MIN);
/// ```
#[must_use]
#[allow(clippy::cast_possible_wrap)] // v >> 1 < 2^63
pub const fn decode_i64(v: u64) -> i64 {
    if v & 1 == 0 {
        (v >> 1) as i64
    } else if v == I64_MIN_CODE {
        i64::MIN
    } else {
        -((v >> 1) as i64)
    }
}

/// Inverse of [`encode_i32`].
///
/// Returns `None` when `v` names a value outside the `i32` range.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // range checked
pub const fn decode_i32(v: u64) -> Option<i32> {
    let n = decode_i64(v);
    if n < i32::MIN as i64 || n > i32::MAX as i64 {
        None
    } else {
        Some(n as i32)
    }
}
