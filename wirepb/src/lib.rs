//! Schema-less encoding and decoding of the protobuf wire format.
//!
//! A message on the wire is a flat sequence of field records. Each record is
//! a varint _tag_ followed by a payload whose shape is selected by the tag's
//! low three bits:
//!
//! ```text
//! ┌──────────────────────────────┬──────────────────────────────────────┐
//! │ tag = (id << 3) | wire type  │ payload                              │
//! ├──────────────────────────────┼──────────────────────────────────────┤
//! │ 0  Varint                    │ 1–10 bytes, base-128, little-endian  │
//! │ 1  I64                       │ 8 bytes, little-endian               │
//! │ 2  Len                       │ varint length `n`, then `n` bytes    │
//! │ 5  I32                       │ 4 bytes, little-endian               │
//! └──────────────────────────────┴──────────────────────────────────────┘
//! ```
//!
//! Fields may repeat and appear in any order. Nothing here knows about
//! schemas: the [`Builder`] appends records, the [`Scanner`] walks them one
//! at a time, and [`Field`] offers typed views over a single record for
//! callers that know what a given id means.
//!
//! # Examples
//!
//! ```
//! use wirepb::{Builder, Scanner, WireType};
//!
//! let mut b = Builder::new();
//! b.append_bool(1, true);
//! b.append_int32(2, -25);
//! b.append_message(4, |sub| sub.append_string(1, "nested"));
//!
//! let mut s = Scanner::new(b.bytes());
//! assert!(s.advance());
//! assert_eq!((s.id(), s.wire_type(), s.data()), (1, WireType::Varint, &[0x01][..]));
//!
//! assert!(s.advance());
//! assert_eq!(s.field().map(|f| f.as_int32()), Some(Ok(-25)));
//!
//! assert!(s.advance());
//! let inner = s.field().map(|f| f.message());
//! assert!(inner.is_some());
//!
//! assert!(!s.advance());
//! assert!(s.err().is_none());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

pub mod builder;
pub mod error;
pub mod field;
pub mod scanner;
pub mod varint;
pub mod wire_type;
pub mod zigzag;

pub use builder::Builder;
pub use error::{FieldError, Reading, ScanError};
pub use field::Field;
pub use scanner::{Config, Scanner, source::Source};
pub use wire_type::WireType;

#[cfg(feature = "std")]
pub use scanner::source::Reader;

/// Largest field id whose tag fits in a `u64` varint.
pub const MAX_FIELD_ID: u64 = u64::MAX >> 3;
