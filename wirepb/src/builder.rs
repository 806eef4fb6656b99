//! Incremental, append-only message construction.
//!
//! A [`Builder`] grows a single byte buffer one field at a time. Fields may
//! be appended in any order and ids may repeat; the buffer records exactly
//! what was appended. No operation can fail.
//!
//! ```
//! use wirepb::Builder;
//!
//! let mut b = Builder::new();
//! b.append_bool(1, true);
//! b.append_int32(2, -25);
//! b.append_fixed32(7, 12_345_678);
//!
//! assert_eq!(
//!     b.bytes(),
//!     [0x08, 0x01, 0x10, 0x33, 0x3D, 0x4E, 0x61, 0xBC, 0x00]
//! );
//! ```

use alloc::vec::Vec;

use crate::{field::Field, varint, wire_type::WireType, zigzag};

/// Accumulates an encoded message.
///
/// # Field ids
///
/// Every `append_*` method masks `id` to its low 61 bits: ids above
/// [`MAX_FIELD_ID`](crate::MAX_FIELD_ID) do not fit in a tag and lose their
/// high bits, in debug and release builds alike.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Builder {
    buf: Vec<u8>,
}

impl Builder {
    /// An empty message.
    #[must_use]
    pub const fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// An empty message with room for `capacity` bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// The message encoded so far.
    ///
    /// The view borrows the builder, so it cannot outlive the next append.
    /// Use [`into_bytes`](Self::into_bytes) to take ownership instead.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the builder, returning the encoded message.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Length of the message so far, in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been appended yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Append a boolean as a `Varint` of `1` or `0`.
    ///
    /// `id` is masked to [`MAX_FIELD_ID`](crate::MAX_FIELD_ID).
    pub fn append_bool(&mut self, id: u64, value: bool) {
        self.append_varint(id, u64::from(value));
    }

    /// Append a signed 32-bit integer, zig-zag mapped.
    ///
    /// `id` is masked to [`MAX_FIELD_ID`](crate::MAX_FIELD_ID).
    pub fn append_int32(&mut self, id: u64, value: i32) {
        self.append_varint(id, zigzag::encode_i32(value));
    }

    /// Append a signed 64-bit integer, zig-zag mapped.
    ///
    /// `id` is masked to [`MAX_FIELD_ID`](crate::MAX_FIELD_ID).
    pub fn append_int64(&mut self, id: u64, value: i64) {
        self.append_varint(id, zigzag::encode_i64(value));
    }

    /// Append an unsigned 32-bit integer.
    ///
    /// `id` is masked to [`MAX_FIELD_ID`](crate::MAX_FIELD_ID).
    pub fn append_uint32(&mut self, id: u64, value: u32) {
        self.append_varint(id, u64::from(value));
    }

    /// Append an unsigned 64-bit integer.
    ///
    /// `id` is masked to [`MAX_FIELD_ID`](crate::MAX_FIELD_ID).
    pub fn append_uint64(&mut self, id: u64, value: u64) {
        self.append_varint(id, value);
    }

    /// Append a 32-bit value as four little-endian bytes.
    ///
    /// `id` is masked to [`MAX_FIELD_ID`](crate::MAX_FIELD_ID).
    pub fn append_fixed32(&mut self, id: u64, value: u32) {
        self.tag(id, WireType::I32);
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Append a 64-bit value as eight little-endian bytes.
    ///
    /// `id` is masked to [`MAX_FIELD_ID`](crate::MAX_FIELD_ID).
    pub fn append_fixed64(&mut self, id: u64, value: u64) {
        self.tag(id, WireType::I64);
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Append an `f32` by its IEEE-754 bit pattern.
    ///
    /// `id` is masked to [`MAX_FIELD_ID`](crate::MAX_FIELD_ID).
    pub fn append_float32(&mut self, id: u64, value: f32) {
        self.append_fixed32(id, value.to_bits());
    }

    /// Append an `f64` by its IEEE-754 bit pattern.
    ///
    /// `id` is masked to [`MAX_FIELD_ID`](crate::MAX_FIELD_ID).
    pub fn append_float64(&mut self, id: u64, value: f64) {
        self.append_fixed64(id, value.to_bits());
    }

    /// Append raw bytes as a `Len` field.
    ///
    /// `id` is masked to [`MAX_FIELD_ID`](crate::MAX_FIELD_ID).
    pub fn append_bytes(&mut self, id: u64, data: &[u8]) {
        self.tag(id, WireType::Len);
        self.len_prefixed(data);
    }

    /// Append text as a `Len` field.
    ///
    /// `id` is masked to [`MAX_FIELD_ID`](crate::MAX_FIELD_ID).
    pub fn append_string(&mut self, id: u64, text: &str) {
        self.append_bytes(id, text.as_bytes());
    }

    /// Append a nested message.
    ///
    /// `build` is called once with a fresh, empty builder; whatever it
    /// appends becomes the payload of a `Len` field with the given id.
    /// `id` is masked to [`MAX_FIELD_ID`](crate::MAX_FIELD_ID).
    ///
    /// ```
    /// use wirepb::Builder;
    ///
    /// let mut b = Builder::new();
    /// b.append_message(4, |m| {
    ///     m.append_uint32(5, 100);
    /// });
    /// assert_eq!(b.bytes(), [0x22, 0x02, 0x28, 0x64]);
    /// ```
    pub fn append_message<F: FnOnce(&mut Builder)>(&mut self, id: u64, build: F) {
        let mut sub = Builder::new();
        build(&mut sub);
        tracing::trace!(id, len = sub.len(), "embedding nested message");
        self.append_bytes(id, &sub.buf);
    }

    /// Re-emit a scanned field unchanged.
    ///
    /// The payload is copied verbatim, so a message can be filtered or
    /// rewritten without interpreting fields it does not care about.
    pub fn append_field(&mut self, field: &Field<'_>) {
        self.tag(field.id(), field.wire_type());
        match field.wire_type() {
            WireType::Len => self.len_prefixed(field.data()),
            WireType::Varint | WireType::I32 | WireType::I64 => {
                self.buf.extend_from_slice(field.data());
            }
        }
    }

    fn append_varint(&mut self, id: u64, value: u64) {
        self.tag(id, WireType::Varint);
        varint::encode(value, &mut self.buf);
    }

    fn tag(&mut self, id: u64, wire_type: WireType) {
        varint::encode(wire_type.tag(id & crate::MAX_FIELD_ID), &mut self.buf);
    }

    fn len_prefixed(&mut self, data: &[u8]) {
        varint::encode(data.len() as u64, &mut self.buf);
        self.buf.extend_from_slice(data);
    }
}

impl AsRef<[u8]> for Builder {
    fn as_ref(&self) -> &[u8] {
        &self.buf
    }
}

impl From<Builder> for Vec<u8> {
    fn from(builder: Builder) -> Self {
        builder.buf
    }
}
