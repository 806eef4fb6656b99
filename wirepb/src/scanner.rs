//! Streaming, schema-less field-by-field decoding.
//!
//! A [`Scanner`] walks a message one record at a time. Each successful
//! [`advance`](Scanner::advance) exposes the record's id, wire type, and raw
//! payload; interpretation is left to the caller (see [`Field`]).
//!
//! ```text
//!            advance()                  advance()
//!   Ready ──────────────▶ Positioned ──────────────▶ Positioned ...
//!     │                       │
//!     │ no bytes left         │ no bytes left at a field boundary
//!     ▼                       ▼
//!  Exhausted (clean end, err() == None)
//!
//!  any decode error ──▶ Failed (err() == Some(..), terminal)
//! ```
//!
//! The iteration protocol is "boolean step + separate error accessor":
//!
//! ```
//! use wirepb::{Builder, Scanner};
//!
//! let mut b = Builder::new();
//! b.append_uint32(1, 150);
//! b.append_string(2, "hi");
//!
//! let mut s = Scanner::new(b.bytes());
//! let mut ids = Vec::new();
//! while s.advance() {
//!     ids.push(s.id());
//! }
//! assert_eq!(s.err(), None);
//! assert_eq!(ids, [1, 2]);
//! ```

pub mod source;

use alloc::vec::Vec;

use crate::{
    error::{Reading, ScanError},
    field::Field,
    varint,
    wire_type::WireType,
};
use source::{ReadError, Source};

#[cfg(feature = "std")]
use source::Reader;

/// Scanner settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    max_field_len: Option<usize>,
}

impl Config {
    /// No limits.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_field_len: None,
        }
    }

    /// Reject `Len` fields whose declared length exceeds `max` bytes.
    ///
    /// Useful for stream sources, where the remaining input size is unknown
    /// and a corrupt prefix would otherwise only be caught at end of input.
    #[must_use]
    pub const fn with_max_field_len(mut self, max: usize) -> Self {
        self.max_field_len = Some(max);
        self
    }

    /// The configured `Len` payload limit, if any.
    #[must_use]
    pub const fn max_field_len(&self) -> Option<usize> {
        self.max_field_len
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ready,
    Positioned,
    Exhausted,
    Failed(ScanError),
}

/// Decodes a message one field at a time.
///
/// The scanner holds one field of lookahead: the payload of the current
/// field is copied into an internal buffer that is reused by the next
/// [`advance`](Self::advance).
#[derive(Debug)]
pub struct Scanner<S> {
    source: S,
    config: Config,
    state: State,
    offset: usize,
    id: u64,
    wire_type: WireType,
    data: Vec<u8>,
}

impl<'a> Scanner<&'a [u8]> {
    /// Scan an in-memory message.
    #[must_use]
    pub const fn new(buf: &'a [u8]) -> Self {
        Self::with_config(buf, Config::new())
    }
}

#[cfg(feature = "std")]
impl<R: std::io::Read> Scanner<Reader<R>> {
    /// Scan a message from a reader.
    ///
    /// Reads are issued a byte at a time for varints; wrap unbuffered
    /// readers in a [`BufReader`](std::io::BufReader).
    #[must_use]
    pub const fn from_reader(reader: R) -> Self {
        Self::with_config(Reader::new(reader), Config::new())
    }
}

impl<S> Scanner<S> {
    /// Scan an arbitrary [`Source`] with the given settings.
    #[must_use]
    pub const fn with_config(source: S, config: Config) -> Self {
        Self {
            source,
            config,
            state: State::Ready,
            offset: 0,
            id: 0,
            wire_type: WireType::Varint,
            data: Vec::new(),
        }
    }

    /// Field id of the current field.
    ///
    /// Id `0` is passed through as read; check for it if ids must be positive.
    ///
    /// # Panics
    ///
    /// Panics unless the last [`advance`](Self::advance) returned `true`.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.assert_positioned();
        self.id
    }

    /// Wire type of the current field.
    ///
    /// # Panics
    ///
    /// Panics unless the last [`advance`](Self::advance) returned `true`.
    #[must_use]
    pub fn wire_type(&self) -> WireType {
        self.assert_positioned();
        self.wire_type
    }

    /// Raw payload of the current field.
    ///
    /// - `Varint`: the minimal base-128 encoding of the value.
    /// - `I32` / `I64`: the 4 / 8 little-endian bytes.
    /// - `Len`: the payload bytes, without the length prefix.
    ///
    /// # Panics
    ///
    /// Panics unless the last [`advance`](Self::advance) returned `true`.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.assert_positioned();
        &self.data
    }

    /// The current field, or `None` if the scanner is not positioned on one.
    #[must_use]
    pub fn field(&self) -> Option<Field<'_>> {
        (self.state == State::Positioned).then(|| Field::new(self.id, self.wire_type, &self.data))
    }

    /// The error that stopped the scanner, if any.
    ///
    /// `None` while scanning and after a clean end of input.
    #[must_use]
    pub const fn err(&self) -> Option<ScanError> {
        match self.state {
            State::Failed(err) => Some(err),
            State::Ready | State::Positioned | State::Exhausted => None,
        }
    }

    /// Whether the input ended cleanly at a field boundary.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self.state, State::Exhausted)
    }

    /// Number of bytes consumed from the source.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.offset
    }

    /// Settings this scanner was built with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Recover the source, positioned after the last byte consumed.
    pub fn into_inner(self) -> S {
        self.source
    }

    fn assert_positioned(&self) {
        assert!(
            self.state == State::Positioned,
            "scanner is not positioned on a field (state: {:?})",
            self.state
        );
    }
}

impl<S: Source> Scanner<S> {
    /// Scan any [`Source`] with default settings.
    #[must_use]
    pub const fn with_source(source: S) -> Self {
        Self::with_config(source, Config::new())
    }

    /// Decode the next field.
    ///
    /// Returns `true` if a field is now available through [`id`](Self::id),
    /// [`wire_type`](Self::wire_type), and [`data`](Self::data). Returns
    /// `false` at the end of input or on error; use [`err`](Self::err) to
    /// tell the two apart. Once `false` has been returned, every later call
    /// returns `false` without touching the source.
    pub fn advance(&mut self) -> bool {
        if matches!(self.state, State::Exhausted | State::Failed(_)) {
            return false;
        }

        match self.scan_field() {
            Ok(true) => {
                tracing::trace!(
                    id = self.id,
                    wire_type = %self.wire_type,
                    len = self.data.len(),
                    "scanned field"
                );
                self.state = State::Positioned;
                true
            }
            Ok(false) => {
                self.state = State::Exhausted;
                false
            }
            Err(err) => {
                tracing::debug!(offset = err.offset(), error = %err, "wire scan failed");
                self.state = State::Failed(err);
                false
            }
        }
    }

    /// Read one record into `id`/`wire_type`/`data`.
    ///
    /// `Ok(false)` means the source was empty at the field boundary.
    fn scan_field(&mut self) -> Result<bool, ScanError> {
        let start = self.offset;
        self.data.clear();

        let Some(tag) = self.read_varint(Reading::Tag, start)? else {
            return Ok(false);
        };

        #[allow(clippy::cast_possible_truncation)] // masked to 3 bits
        let code = (tag & WireType::MASK) as u8;
        let wire_type =
            WireType::from_code(code).ok_or(ScanError::UnknownWireType { code, offset: start })?;

        match wire_type {
            WireType::Varint => {
                let value = self.require_varint(Reading::Varint, start)?;
                varint::encode(value, &mut self.data);
            }
            WireType::I32 => self.read_exact(4, Reading::Fixed32, start)?,
            WireType::I64 => self.read_exact(8, Reading::Fixed64, start)?,
            WireType::Len => {
                let declared = self.require_varint(Reading::Length, start)?;
                let len = self.check_len(declared, start)?;
                self.read_exact(len, Reading::Payload { len }, start)?;
            }
        }

        self.id = tag >> WireType::BITS;
        self.wire_type = wire_type;
        Ok(true)
    }

    /// Validate a `Len` prefix against `usize`, the configured limit, and
    /// the bytes a sized source has left.
    fn check_len(&self, declared: u64, start: usize) -> Result<usize, ScanError> {
        let Ok(len) = usize::try_from(declared) else {
            return Err(ScanError::LengthLimit {
                declared,
                max: usize::MAX,
                offset: start,
            });
        };

        if let Some(max) = self.config.max_field_len {
            if len > max {
                return Err(ScanError::LengthLimit {
                    declared,
                    max,
                    offset: start,
                });
            }
        }

        // Sized sources fail before copying a payload that cannot complete.
        if self.source.remaining().is_some_and(|remaining| len > remaining) {
            return Err(ScanError::Truncated {
                reading: Reading::Payload { len },
                offset: start,
            });
        }

        Ok(len)
    }

    /// Read a varint, or `Ok(None)` if the source is already empty.
    fn read_varint(&mut self, reading: Reading, start: usize) -> Result<Option<u64>, ScanError> {
        let mut raw = [0u8; varint::MAX_BYTES];
        let mut terminated = false;

        for (i, slot) in raw.iter_mut().enumerate() {
            match self.read_byte(reading, start)? {
                Some(byte) => {
                    *slot = byte;
                    if varint::is_last(byte) {
                        terminated = true;
                        break;
                    }
                }
                None if i == 0 => return Ok(None),
                None => {
                    return Err(ScanError::Truncated {
                        reading,
                        offset: start,
                    });
                }
            }
        }

        if !terminated {
            return Err(ScanError::MalformedVarint {
                reading,
                offset: start,
            });
        }

        varint::decode(&raw)
            .map(|(value, _)| Some(value))
            .map_err(|_| ScanError::MalformedVarint {
                reading,
                offset: start,
            })
    }

    /// Read a varint that must be present.
    fn require_varint(&mut self, reading: Reading, start: usize) -> Result<u64, ScanError> {
        self.read_varint(reading, start)?.ok_or(ScanError::Truncated {
            reading,
            offset: start,
        })
    }

    fn read_byte(&mut self, reading: Reading, start: usize) -> Result<Option<u8>, ScanError> {
        let byte = self
            .source
            .read_byte()
            .map_err(|e| read_failure(e, reading, start))?;
        if byte.is_some() {
            self.offset += 1;
        }
        Ok(byte)
    }

    /// Append exactly `len` bytes from the source to `data`.
    fn read_exact(&mut self, len: usize, reading: Reading, start: usize) -> Result<(), ScanError> {
        let before = self.data.len();
        let result = self.source.read_into(len, &mut self.data);
        self.offset += self.data.len() - before;
        result.map_err(|e| read_failure(e, reading, start))
    }
}

fn read_failure(err: ReadError, reading: Reading, offset: usize) -> ScanError {
    match err {
        ReadError::Eof => ScanError::Truncated { reading, offset },
        #[cfg(feature = "std")]
        ReadError::Io(kind) => ScanError::Io { kind, offset },
    }
}
