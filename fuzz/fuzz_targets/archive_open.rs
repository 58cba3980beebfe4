//! Fuzz target for Archive::open with arbitrary byte input.
//!
//! Exercises the record scanner and the save path with malformed or
//! adversarial containers, looking for panics and hangs.
//!
//! Run with: cargo +nightly fuzz run archive_open

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    let options = dslz::ScanOptions::new().strict_probe(data.first().is_some_and(|b| b & 1 == 0));
    let Ok(mut archive) = dslz::Archive::open_with_options(Cursor::new(data), options) else {
        return;
    };

    for index in 0..archive.len() {
        let _ = archive.read_entry(index);
    }

    // An untouched archive whose first record starts the stream must save
    // back to the bytes it was opened from
    let starts_at_zero = archive.offsets().first() == Some(&8);
    let mut out = Cursor::new(Vec::new());
    if archive.save(&mut out).is_ok() && starts_at_zero {
        assert_eq!(out.into_inner(), data);
    }
});
