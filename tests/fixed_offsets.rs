//! Tests for saving with records kept at their original offsets.

mod common;

use common::{build_container, build_lz11_container, open_bytes, payload, sample_data, save_to_vec};
use dslz::{CodecMethod, Error, WriteOptions};
use std::io::Cursor;

fn fixed() -> WriteOptions {
    WriteOptions::new().fixed_offsets(true)
}

#[test]
fn test_unmodified_fixed_save_reproduces_input() {
    let a = sample_data(700, 5);
    let b = sample_data(90, 6);
    let data = build_lz11_container(&[a.as_slice(), b.as_slice()]);
    let mut archive = open_bytes(data.clone());
    assert_eq!(save_to_vec(&mut archive, &fixed()), data);
}

#[test]
fn test_smaller_replacement_keeps_offsets() {
    let big = sample_data(8000, 1);
    let data = build_lz11_container(&[big.as_slice(), b"middle record", b"last record"]);
    let mut archive = open_bytes(data);
    let offsets = archive.offsets().to_vec();

    archive.replace(0, b"tiny".repeat(4)).unwrap();
    let out = save_to_vec(&mut archive, &fixed());

    let mut reopened = open_bytes(out);
    assert_eq!(reopened.offsets(), offsets.as_slice());
    let codec = CodecMethod::Lz11.codec();
    assert_eq!(reopened.decompress_entry(0, &*codec).unwrap(), b"tiny".repeat(4));
    assert_eq!(
        reopened.decompress_entry(2, &*codec).unwrap(),
        b"last record"
    );
}

#[test]
fn test_larger_replacement_is_rejected_before_writing() {
    let data = build_container(&[payload(b"AAAA", &[0; 4]), payload(b"BBBB", &[0; 4])], 0);
    let mut archive = open_bytes(data);
    archive.replace(0, sample_data(10_000, 42)).unwrap();

    let mut out = Cursor::new(Vec::new());
    let err = archive.save_with_options(&mut out, &fixed()).unwrap_err();
    assert!(matches!(
        err,
        Error::EntryOverflow {
            index: 0,
            available: 64,
            ..
        }
    ));
    assert!(out.into_inner().is_empty());
}

#[test]
fn test_last_entry_may_grow() {
    let data = build_container(&[payload(b"AAAA", &[0; 4]), payload(b"BBBB", &[0; 4])], 0);
    let mut archive = open_bytes(data);
    let grown = sample_data(10_000, 7);
    archive.replace(1, grown.clone()).unwrap();

    let out = save_to_vec(&mut archive, &fixed());
    let mut reopened = open_bytes(out);
    assert_eq!(reopened.offsets(), &[8, 72]);
    let codec = CodecMethod::Lz11.codec();
    assert_eq!(reopened.decompress_entry(1, &*codec).unwrap(), grown);
}

#[test]
fn test_unverified_overflow_still_writes() {
    let data = build_container(&[payload(b"AAAA", &[0; 4]), payload(b"BBBB", &[0; 4])], 0);
    let mut archive = open_bytes(data);
    archive.replace(0, sample_data(10_000, 42)).unwrap();

    let options = fixed().verify_fixed_layout(false);
    let mut out = Cursor::new(Vec::new());
    let result = archive.save_with_options(&mut out, &options).unwrap();
    assert_eq!(result.entries_written, 2);
    assert!(result.bytes_written > 64);
}

#[test]
fn test_shrunk_record_is_filled_to_boundary() {
    let data = build_container(&[payload(b"AAAA", &[0; 100]), payload(b"BBBB", &[0; 4])], 0);
    let mut archive = open_bytes(data.clone());
    assert_eq!(archive.offsets(), &[8, 136]);
    archive.replace(0, b"tiny".to_vec()).unwrap();

    let mut out = Cursor::new(vec![0xAA; data.len()]);
    archive
        .save_with_options(&mut out, &fixed().padding_byte(0x5C))
        .unwrap();
    let bytes = out.into_inner();

    // Marker plus a 9-byte LZ11 stream, then fill up to the next boundary.
    assert!(bytes[17..64].iter().all(|&b| b == 0x5C));
    // The rest of the old slot is left to the destination.
    assert!(bytes[64..128].iter().all(|&b| b == 0xAA));
    assert_eq!(&bytes[128..136], dslz::format::MAGIC);
    assert_eq!(bytes.len(), data.len());
}
