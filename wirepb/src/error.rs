//! Error types for scanning and interpreting fields.

use thiserror::Error;

use crate::{varint, wire_type::WireType};

/// What the scanner was reading when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reading {
    /// A field tag.
    Tag,
    /// The payload of a `Varint` field.
    Varint,
    /// The length prefix of a `Len` field.
    Length,
    /// The payload of an `I32` field.
    Fixed32,
    /// The payload of an `I64` field.
    Fixed64,
    /// The payload of a `Len` field.
    Payload {
        /// Declared payload length.
        len: usize,
    },
}

impl core::fmt::Display for Reading {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Tag => f.write_str("tag"),
            Self::Varint => f.write_str("varint"),
            Self::Length => f.write_str("length prefix"),
            Self::Fixed32 => f.write_str("fixed32"),
            Self::Fixed64 => f.write_str("fixed64"),
            Self::Payload { len } => write!(f, "{len}-byte payload"),
        }
    }
}

/// A terminal failure while scanning a message.
///
/// `offset` is always the source offset of the tag that starts the failing
/// field, so callers can report where the corrupt record begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScanError {
    /// The input ended part way through a field.
    ///
    /// In-memory sources report a `Len` payload longer than the rest of the
    /// input here as soon as its length prefix is read.
    #[error("truncated {reading} in field at offset {offset}")]
    Truncated {
        /// What was being read.
        reading: Reading,
        /// Offset of the field's tag.
        offset: usize,
    },

    /// A varint did not terminate within ten bytes or overflowed 64 bits.
    #[error("malformed {reading} in field at offset {offset}")]
    MalformedVarint {
        /// Which varint was being read.
        reading: Reading,
        /// Offset of the field's tag.
        offset: usize,
    },

    /// The tag's low bits do not name a known wire type.
    #[error("unknown wire type {code} in tag at offset {offset}")]
    UnknownWireType {
        /// The offending code (`tag & 7`).
        code: u8,
        /// Offset of the tag.
        offset: usize,
    },

    /// A length prefix exceeds the scanner's configured maximum, or does not
    /// fit in `usize` (reported with `max == usize::MAX`).
    #[error("length {declared} at offset {offset} exceeds limit of {max} bytes")]
    LengthLimit {
        /// Declared payload length.
        declared: u64,
        /// Configured maximum.
        max: usize,
        /// Offset of the field's tag.
        offset: usize,
    },

    /// The underlying reader failed.
    #[cfg(feature = "std")]
    #[error("I/O error ({kind}) in field at offset {offset}")]
    Io {
        /// The reader's error kind.
        kind: std::io::ErrorKind,
        /// Offset of the field's tag.
        offset: usize,
    },
}

impl ScanError {
    /// Offset of the tag of the field that failed.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::Truncated { offset, .. }
            | Self::MalformedVarint { offset, .. }
            | Self::UnknownWireType { offset, .. }
            | Self::LengthLimit { offset, .. } => *offset,
            #[cfg(feature = "std")]
            Self::Io { offset, .. } => *offset,
        }
    }

    /// Whether the input simply ran out (as opposed to being malformed).
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        matches!(self, Self::Truncated { .. })
    }
}

/// A field whose payload does not fit the requested interpretation.
///
/// These never affect the [`Scanner`](crate::Scanner) that produced the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The field has a different wire type.
    #[error("expected {expected} field, found {found}")]
    WrongWireType {
        /// Wire type the interpretation needs.
        expected: WireType,
        /// Wire type of the field.
        found: WireType,
    },

    /// The payload is not a valid varint.
    #[error("invalid varint payload: {0}")]
    Varint(varint::DecodeError),

    /// The payload holds more than one varint.
    #[error("{extra} trailing bytes after varint payload")]
    TrailingBytes {
        /// Number of unexpected bytes.
        extra: usize,
    },

    /// The decoded value does not fit the target type.
    #[error("value {value} out of range for {target}")]
    OutOfRange {
        /// Raw wire value.
        value: u64,
        /// Name of the target type.
        target: &'static str,
    },

    /// A fixed-width payload has the wrong size.
    #[error("expected {expected}-byte payload, found {actual}")]
    BadLength {
        /// Required size.
        expected: usize,
        /// Actual size.
        actual: usize,
    },

    /// A `Len` payload is not UTF-8.
    #[error("invalid UTF-8 payload: {0}")]
    InvalidUtf8(#[from] core::str::Utf8Error),
}

impl From<varint::DecodeError> for FieldError {
    fn from(err: varint::DecodeError) -> Self {
        Self::Varint(err)
    }
}
