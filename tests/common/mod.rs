//! Shared test utilities for integration tests.
//!
//! Container builders are consolidated here to avoid duplication.
//!
//! Note: `#![allow(dead_code)]` is required because each integration test file
//! compiles as a separate crate and may only use a subset of these helpers.

#![allow(dead_code)]

use std::io::Cursor;

use dslz::Archive;
use dslz::codec::lz11;
use dslz::format::{ALIGNMENT, MAGIC};

/// Builds a record payload: five reserved bytes, the extension hint, then
/// the body.
pub fn payload(hint: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut data = vec![0u8; 5];
    data.extend_from_slice(hint);
    data.extend_from_slice(body);
    data
}

/// Builds a payload the way real containers store it: an LZ11 stream whose
/// extension hint is the first bytes of the compressed data.
pub fn lz11_payload(content: &[u8]) -> Vec<u8> {
    lz11::compress(content).expect("failed to compress")
}

/// Concatenates payloads into a container, putting each marker on a 64-byte
/// boundary and filling gaps with `fill`.
///
/// # Example
///
/// ```ignore
/// let data = build_container(&[payload(b"CGFX", b"model"), payload(b"\0\0\0\0", b"raw")], 0);
/// ```
pub fn build_container(payloads: &[Vec<u8>], fill: u8) -> Vec<u8> {
    let mut data = Vec::new();
    for (i, body) in payloads.iter().enumerate() {
        data.extend_from_slice(MAGIC);
        data.extend_from_slice(body);
        if i + 1 != payloads.len() {
            let aligned = (data.len() as u64).div_ceil(ALIGNMENT) * ALIGNMENT;
            data.resize(aligned as usize, fill);
        }
    }
    data
}

/// Builds a container holding LZ11-compressed copies of `contents`.
pub fn build_lz11_container(contents: &[&[u8]]) -> Vec<u8> {
    let payloads: Vec<Vec<u8>> = contents.iter().map(|c| lz11_payload(c)).collect();
    build_container(&payloads, 0)
}

/// Opens an in-memory container with default scan options.
pub fn open_bytes(data: Vec<u8>) -> Archive<Cursor<Vec<u8>>> {
    Archive::open(Cursor::new(data)).expect("failed to open container")
}

/// Saves an archive to memory and returns the written bytes.
pub fn save_to_vec<R: std::io::Read + std::io::Seek>(
    archive: &mut Archive<R>,
    options: &dslz::WriteOptions,
) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    archive
        .save_with_options(&mut out, options)
        .expect("failed to save archive");
    out.into_inner()
}

/// Generates deterministic, moderately compressible test data.
pub fn sample_data(len: usize, seed: u8) -> Vec<u8> {
    (0..len)
        .map(|i| (i / 7) as u8 ^ seed.wrapping_mul(31))
        .collect()
}
