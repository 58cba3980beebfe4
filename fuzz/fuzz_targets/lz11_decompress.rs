//! Fuzz target for the LZ11 decoder.
//!
//! Arbitrary input must either decode or fail with an error, never panic.
//! Successfully decoded output is recompressed and checked for identity.
//!
//! Run with: cargo +nightly fuzz run lz11_decompress

#![no_main]

use dslz::codec::lz11;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(decoded) = lz11::decompress(data) {
        let Ok(recompressed) = lz11::compress(&decoded) else {
            return;
        };
        assert_eq!(lz11::decompress(&recompressed).ok(), Some(decoded));
    }
});
