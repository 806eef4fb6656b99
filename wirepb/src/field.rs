//! Typed views over a single scanned field.
//!
//! The scanner deliberately hands out raw payloads. A caller that knows what
//! a field id means picks the matching interpretation here:
//!
//! ```
//! use wirepb::{Builder, Scanner};
//!
//! let mut b = Builder::new();
//! b.append_int64(1, -7);
//! b.append_float32(2, 1.5);
//! b.append_message(3, |m| m.append_string(1, "inner"));
//!
//! let mut s = Scanner::new(b.bytes());
//! while s.advance() {
//!     let Some(field) = s.field() else { break };
//!     match field.id() {
//!         1 => assert_eq!(field.as_int64(), Ok(-7)),
//!         2 => assert_eq!(field.as_float32(), Ok(1.5)),
//!         3 => {
//!             let mut inner = field.message().unwrap();
//!             assert!(inner.advance());
//!             assert_eq!(inner.field().unwrap().as_str(), Ok("inner"));
//!         }
//!         _ => unreachable!(),
//!     }
//! }
//! ```

use crate::{error::FieldError, scanner::Scanner, varint, wire_type::WireType, zigzag};

/// One decoded record: id, wire type, and raw payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    id: u64,
    wire_type: WireType,
    data: &'a [u8],
}

impl<'a> Field<'a> {
    /// Assemble a field from its parts.
    ///
    /// `data` must be shaped as [`Scanner::data`] describes for `wire_type`.
    #[must_use]
    pub const fn new(id: u64, wire_type: WireType, data: &'a [u8]) -> Self {
        Self {
            id,
            wire_type,
            data,
        }
    }

    /// The field id.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// The wire type.
    #[must_use]
    pub const fn wire_type(&self) -> WireType {
        self.wire_type
    }

    /// The raw payload.
    #[must_use]
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Decode a `Varint` payload as an unsigned integer.
    ///
    /// # Errors
    ///
    /// [`FieldError::WrongWireType`] for non-varint fields,
    /// [`FieldError::Varint`] / [`FieldError::TrailingBytes`] if the payload
    /// is not exactly one varint.
    pub fn as_uint64(&self) -> Result<u64, FieldError> {
        self.expect(WireType::Varint)?;
        let (value, used) = varint::decode(self.data)?;
        if used != self.data.len() {
            return Err(FieldError::TrailingBytes {
                extra: self.data.len() - used,
            });
        }
        Ok(value)
    }

    /// Decode a `Varint` payload as a `u32`.
    ///
    /// # Errors
    ///
    /// As [`as_uint64`](Self::as_uint64), plus [`FieldError::OutOfRange`].
    pub fn as_uint32(&self) -> Result<u32, FieldError> {
        let value = self.as_uint64()?;
        u32::try_from(value).map_err(|_| FieldError::OutOfRange {
            value,
            target: "u32",
        })
    }

    /// Decode a zig-zag `Varint` payload as an `i64`.
    ///
    /// # Errors
    ///
    /// As [`as_uint64`](Self::as_uint64).
    pub fn as_int64(&self) -> Result<i64, FieldError> {
        self.as_uint64().map(zigzag::decode_i64)
    }

    /// Decode a zig-zag `Varint` payload as an `i32`.
    ///
    /// # Errors
    ///
    /// As [`as_uint64`](Self::as_uint64), plus [`FieldError::OutOfRange`].
    pub fn as_int32(&self) -> Result<i32, FieldError> {
        let value = self.as_uint64()?;
        zigzag::decode_i32(value).ok_or(FieldError::OutOfRange {
            value,
            target: "i32",
        })
    }

    /// Decode a `Varint` payload of `0` or `1` as a boolean.
    ///
    /// # Errors
    ///
    /// As [`as_uint64`](Self::as_uint64), plus [`FieldError::OutOfRange`]
    /// for any other value.
    pub fn as_bool(&self) -> Result<bool, FieldError> {
        match self.as_uint64()? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(FieldError::OutOfRange {
                value,
                target: "bool",
            }),
        }
    }

    /// Decode an `I32` payload.
    ///
    /// # Errors
    ///
    /// [`FieldError::WrongWireType`] or [`FieldError::BadLength`].
    pub fn as_fixed32(&self) -> Result<u32, FieldError> {
        self.fixed::<4>(WireType::I32).map(u32::from_le_bytes)
    }

    /// Decode an `I64` payload.
    ///
    /// # Errors
    ///
    /// [`FieldError::WrongWireType`] or [`FieldError::BadLength`].
    pub fn as_fixed64(&self) -> Result<u64, FieldError> {
        self.fixed::<8>(WireType::I64).map(u64::from_le_bytes)
    }

    /// Decode an `I32` payload as an IEEE-754 single.
    ///
    /// # Errors
    ///
    /// As [`as_fixed32`](Self::as_fixed32).
    pub fn as_float32(&self) -> Result<f32, FieldError> {
        self.as_fixed32().map(f32::from_bits)
    }

    /// Decode an `I64` payload as an IEEE-754 double.
    ///
    /// # Errors
    ///
    /// As [`as_fixed64`](Self::as_fixed64).
    pub fn as_float64(&self) -> Result<f64, FieldError> {
        self.as_fixed64().map(f64::from_bits)
    }

    /// The payload of a `Len` field.
    ///
    /// # Errors
    ///
    /// [`FieldError::WrongWireType`] for other fields.
    pub fn as_bytes(&self) -> Result<&'a [u8], FieldError> {
        self.expect(WireType::Len)?;
        Ok(self.data)
    }

    /// The payload of a `Len` field as UTF-8 text.
    ///
    /// # Errors
    ///
    /// [`FieldError::WrongWireType`] or [`FieldError::InvalidUtf8`].
    pub fn as_str(&self) -> Result<&'a str, FieldError> {
        Ok(core::str::from_utf8(self.as_bytes()?)?)
    }

    /// Scan the payload of a `Len` field as a nested message.
    ///
    /// # Errors
    ///
    /// [`FieldError::WrongWireType`] for other fields. Whether the payload
    /// really is a message only shows once the returned scanner runs.
    pub fn message(&self) -> Result<Scanner<&'a [u8]>, FieldError> {
        self.as_bytes().map(Scanner::new)
    }

    fn expect(&self, expected: WireType) -> Result<(), FieldError> {
        if self.wire_type == expected {
            Ok(())
        } else {
            Err(FieldError::WrongWireType {
                expected,
                found: self.wire_type,
            })
        }
    }

    fn fixed<const N: usize>(&self, expected: WireType) -> Result<[u8; N], FieldError> {
        self.expect(expected)?;
        self.data.try_into().map_err(|_| FieldError::BadLength {
            expected: N,
            actual: self.data.len(),
        })
    }
}
