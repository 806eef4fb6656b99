//! End-to-end tests: messages built with [`Builder`] and read back with
//! [`Scanner`], through both slice and reader sources.

#![allow(clippy::float_cmp, clippy::indexing_slicing)]

use std::io::Cursor;

use testresult::TestResult;
use wirepb::{Builder, Field, Scanner, Source, WireType};

/// The reference message: repeated and out-of-order ids, plus a nested message.
fn reference_message() -> Builder {
    let mut b = Builder::new();
    b.append_bool(1, true);
    b.append_int32(2, -25);
    b.append_string(3, "hello");
    b.append_message(4, |m| {
        m.append_uint32(5, 100);
        m.append_float64(6, 3.14159);
    });
    b.append_fixed32(7, 12_345_678);
    b.append_string(3, "world");
    b
}

fn fields<S: Source>(mut s: Scanner<S>) -> Result<Vec<(u64, WireType, Vec<u8>)>, wirepb::ScanError> {
    let mut out = Vec::new();
    while s.advance() {
        out.push((s.id(), s.wire_type(), s.data().to_vec()));
    }
    match s.err() {
        Some(err) => Err(err),
        None => Ok(out),
    }
}

#[test]
fn reference_message_preserves_order_and_duplicates() -> TestResult {
    let b = reference_message();
    let got = fields(Scanner::new(b.bytes()))?;

    let ids: Vec<_> = got.iter().map(|(id, ty, _)| (*id, *ty)).collect();
    assert_eq!(
        ids,
        [
            (1, WireType::Varint),
            (2, WireType::Varint),
            (3, WireType::Len),
            (4, WireType::Len),
            (7, WireType::I32),
            (3, WireType::Len),
        ]
    );

    assert_eq!(got[0].2, [0x01]);
    assert_eq!(got[1].2, [0x33]); // -25 zig-zags to 51
    assert_eq!(got[2].2, b"hello");
    assert_eq!(got[4].2, [0x4E, 0x61, 0xBC, 0x00]);
    assert_eq!(got[5].2, b"world");
    Ok(())
}

#[test]
fn nested_message_is_isolated() -> TestResult {
    let b = reference_message();
    let mut s = Scanner::new(b.bytes());

    let mut nested = None;
    while s.advance() {
        if s.id() == 4 {
            nested = Some(s.data().to_vec());
        }
    }
    assert_eq!(s.err(), None);

    let nested = nested.ok_or("field 4 missing")?;
    let inner = fields(Scanner::new(&nested))?;
    assert_eq!(inner.len(), 2);
    assert_eq!(inner[0], (5, WireType::Varint, vec![100]));
    assert_eq!(
        inner[1],
        (6, WireType::I64, 3.14159f64.to_bits().to_le_bytes().to_vec())
    );
    Ok(())
}

#[test]
fn nested_message_through_field_view() -> TestResult {
    let b = reference_message();
    let mut s = Scanner::new(b.bytes());

    while s.advance() {
        let field = s.field().ok_or("positioned scanner has no field")?;
        if field.id() != 4 {
            continue;
        }

        let mut inner = field.message()?;
        assert!(inner.advance());
        assert_eq!(inner.field().ok_or("no field")?.as_uint32()?, 100);
        assert!(inner.advance());
        assert_eq!(inner.field().ok_or("no field")?.as_float64()?, 3.14159);
        assert!(!inner.advance());
        assert_eq!(inner.err(), None);
    }
    assert_eq!(s.err(), None);
    Ok(())
}

#[test]
fn scalar_round_trips() -> TestResult {
    let bools = [false, true];
    let i32s = [0, 1, -1, 25, -25, i32::MAX, i32::MIN];
    let i64s = [0, -1, i64::from(i32::MIN) - 1, i64::MAX, i64::MIN, i64::MIN + 1];
    let u32s = [0, 127, 128, u32::MAX];
    let u64s = [0, 300, 1 << 63, u64::MAX];
    let f32s = [0.0, -0.0, 1.5, f32::MAX, f32::MIN_POSITIVE, f32::INFINITY];
    let f64s = [0.0, -2.5, 3.14159, f64::MAX, f64::NEG_INFINITY];
    let blobs: [&[u8]; 3] = [b"", b"hello", &[0xFF; 300]];

    let mut b = Builder::new();
    for v in bools {
        b.append_bool(1, v);
    }
    for v in i32s {
        b.append_int32(2, v);
    }
    for v in i64s {
        b.append_int64(3, v);
    }
    for v in u32s {
        b.append_uint32(4, v);
        b.append_fixed32(5, v);
    }
    for v in u64s {
        b.append_uint64(6, v);
        b.append_fixed64(7, v);
    }
    for v in f32s {
        b.append_float32(8, v);
    }
    for v in f64s {
        b.append_float64(9, v);
    }
    for v in blobs {
        b.append_bytes(10, v);
    }

    let mut got_bools = Vec::new();
    let mut got_i32s = Vec::new();
    let mut got_i64s = Vec::new();
    let mut got_u32s = Vec::new();
    let mut got_fixed32s = Vec::new();
    let mut got_u64s = Vec::new();
    let mut got_fixed64s = Vec::new();
    let mut got_f32s = Vec::new();
    let mut got_f64s = Vec::new();
    let mut got_blobs = Vec::new();

    let mut s = Scanner::new(b.bytes());
    while s.advance() {
        let f: Field<'_> = s.field().ok_or("no field")?;
        match f.id() {
            1 => got_bools.push(f.as_bool()?),
            2 => got_i32s.push(f.as_int32()?),
            3 => got_i64s.push(f.as_int64()?),
            4 => got_u32s.push(f.as_uint32()?),
            5 => got_fixed32s.push(f.as_fixed32()?),
            6 => got_u64s.push(f.as_uint64()?),
            7 => got_fixed64s.push(f.as_fixed64()?),
            8 => got_f32s.push(f.as_float32()?.to_bits()),
            9 => got_f64s.push(f.as_float64()?.to_bits()),
            10 => got_blobs.push(f.as_bytes()?.to_vec()),
            other => return Err(format!("unexpected field {other}").into()),
        }
    }
    assert_eq!(s.err(), None);

    assert_eq!(got_bools, bools);
    assert_eq!(got_i32s, i32s);
    assert_eq!(got_i64s, i64s);
    assert_eq!(got_u32s, u32s);
    assert_eq!(got_fixed32s, u32s);
    assert_eq!(got_u64s, u64s);
    assert_eq!(got_fixed64s, u64s);
    assert_eq!(got_f32s, f32s.map(f32::to_bits));
    assert_eq!(got_f64s, f64s.map(f64::to_bits));
    assert_eq!(got_blobs, blobs.map(<[u8]>::to_vec));
    Ok(())
}

#[test]
fn nan_bit_patterns_survive() -> TestResult {
    let quiet = f64::from_bits(0x7FF8_0000_0000_0001);
    let mut b = Builder::new();
    b.append_float64(1, quiet);

    let mut s = Scanner::new(b.bytes());
    assert!(s.advance());
    let got = s.field().ok_or("no field")?.as_float64()?;
    assert_eq!(got.to_bits(), quiet.to_bits());
    Ok(())
}

#[test]
fn empty_input_is_clean_end() {
    let mut s = Scanner::new(&[]);
    assert!(!s.advance());
    assert!(s.is_exhausted());
    assert_eq!(s.err(), None);

    let mut s = Scanner::from_reader(Cursor::new(Vec::new()));
    assert!(!s.advance());
    assert!(s.is_exhausted());
    assert_eq!(s.err(), None);
}

#[test]
fn every_truncation_is_an_error() -> TestResult {
    let b = reference_message();
    let full = b.bytes();

    // Offsets where a field ends; cutting there is a clean, shorter message.
    let mut boundaries = vec![0];
    let mut s = Scanner::new(full);
    while s.advance() {
        boundaries.push(s.position());
    }
    assert_eq!(boundaries.last(), Some(&full.len()));

    for cut in 0..full.len() {
        let mut s = Scanner::new(&full[..cut]);
        while s.advance() {}

        if boundaries.contains(&cut) {
            assert_eq!(s.err(), None, "cut at field boundary {cut}");
            assert!(s.is_exhausted());
        } else {
            let err = s.err().ok_or(format!("cut at {cut} scanned cleanly"))?;
            assert!(err.is_truncated(), "cut at {cut}: {err:?}");

            let mut r = Scanner::from_reader(Cursor::new(full[..cut].to_vec()));
            while r.advance() {}
            assert_eq!(r.err(), Some(err), "reader disagrees at cut {cut}");
        }
    }
    Ok(())
}

#[test]
fn cut_payload_reads_the_same_from_slice_and_reader() {
    let mut b = Builder::new();
    b.append_bool(1, true);
    b.append_string(3, "hello");
    let cut = &b.bytes()[..6];

    let want = Some(wirepb::ScanError::Truncated {
        reading: wirepb::Reading::Payload { len: 5 },
        offset: 2,
    });

    let mut s = Scanner::new(cut);
    while s.advance() {}
    assert_eq!(s.err(), want);

    let mut r = Scanner::from_reader(Cursor::new(cut.to_vec()));
    while r.advance() {}
    assert_eq!(r.err(), want);
}

#[test]
fn stream_truncation_is_truncated() {
    let b = reference_message();
    let full = b.bytes();

    // Cut inside the "hello" payload: tag(1) + bool(1) + tag(1) + int(1) + tag(1) + len(1) + 2
    let cut = full[..8].to_vec();
    let mut s = Scanner::from_reader(Cursor::new(cut));
    assert!(s.advance());
    assert!(s.advance());
    assert!(!s.advance());
    assert!(matches!(
        s.err(),
        Some(wirepb::ScanError::Truncated {
            reading: wirepb::Reading::Payload { len: 5 },
            offset: 4
        })
    ));
}

#[test]
fn reader_and_slice_agree() -> TestResult {
    let b = reference_message();
    let from_slice = fields(Scanner::new(b.bytes()))?;
    let from_reader = fields(Scanner::from_reader(Cursor::new(b.bytes().to_vec())))?;
    assert_eq!(from_slice, from_reader);
    Ok(())
}

#[test]
fn filtering_with_append_field() -> TestResult {
    let b = reference_message();

    let mut kept = Builder::new();
    let mut s = Scanner::new(b.bytes());
    while s.advance() {
        let field = s.field().ok_or("no field")?;
        if field.id() != 3 {
            kept.append_field(&field);
        }
    }
    assert_eq!(s.err(), None);

    let ids: Vec<u64> = fields(Scanner::new(kept.bytes()))?
        .into_iter()
        .map(|(id, _, _)| id)
        .collect();
    assert_eq!(ids, [1, 2, 4, 7]);
    Ok(())
}
