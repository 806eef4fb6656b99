//! The wire type carried in the low bits of every tag.

/// How the payload following a tag is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WireType {
    /// A base-128 varint.
    Varint,

    /// Eight little-endian bytes.
    I64,

    /// A varint byte length followed by that many bytes.
    Len,

    /// Four little-endian bytes.
    I32,
}

impl WireType {
    /// Number of tag bits reserved for the wire type.
    pub const BITS: u32 = 3;

    /// Mask selecting the wire type from a tag.
    pub const MASK: u64 = (1 << Self::BITS) - 1;

    /// The numeric code stored in the tag.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Varint => 0,
            Self::I64 => 1,
            Self::Len => 2,
            Self::I32 => 5,
        }
    }

    /// Look up a wire type by its tag code.
    ///
    /// Codes 3 and 4 (the deprecated group markers) and 6–7 are not part of
    /// this format and return `None`.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Varint),
            1 => Some(Self::I64),
            2 => Some(Self::Len),
            5 => Some(Self::I32),
            _ => None,
        }
    }

    /// Size of the payload for fixed-width types.
    #[must_use]
    pub const fn fixed_size(self) -> Option<usize> {
        match self {
            Self::I64 => Some(8),
            Self::I32 => Some(4),
            Self::Varint | Self::Len => None,
        }
    }

    /// Combine a field id with this wire type into a tag value.
    ///
    /// Bits of `id` above [`MAX_FIELD_ID`](crate::MAX_FIELD_ID) are lost.
    #[must_use]
    pub const fn tag(self, id: u64) -> u64 {
        (id << Self::BITS) | self.code() as u64
    }
}

/// A tag code that does not name a [`WireType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown wire type code {0}")]
pub struct UnknownWireType(pub u8);

impl TryFrom<u8> for WireType {
    type Error = UnknownWireType;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(UnknownWireType(code))
    }
}

impl From<WireType> for u8 {
    fn from(wire_type: WireType) -> Self {
        wire_type.code()
    }
}

impl core::fmt::Display for WireType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Varint => f.write_str("Varint"),
            Self::I64 => f.write_str("I64"),
            Self::Len => f.write_str("Len"),
            Self::I32 => f.write_str("I32"),
        }
    }
}
