//! LZ11 compression codec (pure Rust implementation).
//!
//! LZ11 is the LZ77 variant used throughout Nintendo handheld titles. It
//! uses a 4 KiB sliding window and a byte-oriented token stream.
//!
//! # Format
//!
//! - Header: tag byte `0x11` followed by the decompressed size as a 24-bit
//!   little-endian integer. A zero size means the real size follows as a
//!   32-bit little-endian integer (used for payloads of 16 MiB and more).
//! - Body: groups of up to eight tokens, each group preceded by a flag byte
//!   read MSB first. A clear bit is a literal byte, a set bit a back-reference.
//! - Back-references come in three widths, selected by the high nibble of
//!   their first byte:
//!
//! | High nibble | Width | Length range        | Displacement |
//! |-------------|-------|---------------------|--------------|
//! | `0`         | 3     | `0x11..=0x110`      | 12 bits + 1  |
//! | `1`         | 4     | `0x111..=0x10110`   | 12 bits + 1  |
//! | `2..=F`     | 2     | `3..=16`            | 12 bits + 1  |

use super::{Codec, CodecMethod, method};
use crate::{Error, Result};

/// Minimum match length in LZ11.
const MIN_MATCH: usize = 3;

/// Maximum match length in LZ11 (4-byte token).
const MAX_MATCH: usize = 0x10110;

/// Sliding window size (maximum displacement).
const WINDOW_SIZE: usize = 0x1000;

/// Largest size that fits in the short header.
const MAX_SHORT_SIZE: usize = 0xFF_FFFF;

/// Number of bits in the match-finder hash.
const HASH_BITS: u32 = 15;

/// Sentinel for an empty hash bucket or chain link.
const NO_POS: usize = usize::MAX;

/// Upper bound for speculative output preallocation during decompression.
const MAX_PREALLOC: usize = 16 * 1024 * 1024;

/// Largest input the header can describe.
const MAX_INPUT_SIZE: usize = u32::MAX as usize;

/// Default ceiling on the declared decompressed size (256 MiB).
pub const DEFAULT_MAX_OUTPUT: u64 = 256 * 1024 * 1024;

/// Options for the LZ11 codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lz11Options {
    /// Maximum number of hash-chain candidates examined per position.
    ///
    /// Higher values find longer matches at the cost of speed.
    pub max_chain: usize,
    /// Largest decompressed size accepted from a stream header.
    ///
    /// The header alone can claim up to 4 GiB, so streams declaring more
    /// than this are rejected before any output is produced.
    pub max_output: u64,
}

impl Default for Lz11Options {
    fn default() -> Self {
        Self {
            max_chain: 128,
            max_output: DEFAULT_MAX_OUTPUT,
        }
    }
}

/// LZ11 codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lz11Codec {
    options: Lz11Options,
}

impl Lz11Codec {
    /// Creates a codec with default encoder options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a codec with custom options.
    pub fn with_options(options: Lz11Options) -> Self {
        Self { options }
    }
}

impl Codec for Lz11Codec {
    fn method(&self) -> CodecMethod {
        CodecMethod::Lz11
    }

    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        compress_with(data, self.options)
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        decompress_with(data, self.options)
    }
}

/// Compresses `data` with default options.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    compress_with(data, Lz11Options::default())
}

/// Hash-chain match finder over the whole input.
struct MatchFinder {
    head: Vec<usize>,
    prev: Vec<usize>,
    max_chain: usize,
}

impl MatchFinder {
    fn new(len: usize, max_chain: usize) -> Self {
        Self {
            head: vec![NO_POS; 1 << HASH_BITS],
            prev: vec![NO_POS; len],
            max_chain: max_chain.max(1),
        }
    }

    fn hash3(data: &[u8], pos: usize) -> usize {
        let v = u32::from(data[pos]) << 16 | u32::from(data[pos + 1]) << 8 | u32::from(data[pos + 2]);
        (v.wrapping_mul(2654435761) >> (32 - HASH_BITS)) as usize
    }

    /// Records `pos` as a match candidate for later positions.
    fn insert(&mut self, data: &[u8], pos: usize) {
        if pos + MIN_MATCH > data.len() {
            return;
        }
        let hash = Self::hash3(data, pos);
        self.prev[pos] = self.head[hash];
        self.head[hash] = pos;
    }

    /// Returns `(length, displacement)` of the longest match at `pos`.
    fn longest_match(&self, data: &[u8], pos: usize) -> Option<(usize, usize)> {
        if pos + MIN_MATCH > data.len() {
            return None;
        }

        let max_len = (data.len() - pos).min(MAX_MATCH);
        let mut best: Option<(usize, usize)> = None;
        let mut candidate = self.head[Self::hash3(data, pos)];
        let mut steps = 0;

        while candidate != NO_POS && steps < self.max_chain {
            let disp = pos - candidate;
            if disp > WINDOW_SIZE {
                break;
            }

            let len = data[candidate..]
                .iter()
                .zip(&data[pos..pos + max_len])
                .take_while(|(a, b)| a == b)
                .count();

            if len >= MIN_MATCH && best.is_none_or(|(best_len, _)| len > best_len) {
                best = Some((len, disp));
                if len == max_len {
                    break;
                }
            }

            candidate = self.prev[candidate];
            steps += 1;
        }

        best
    }
}

/// Compresses `data` into an LZ11 stream.
///
/// # Errors
///
/// Returns [`Error::ResourceLimitExceeded`] if `data` is 4 GiB or larger,
/// which the header cannot describe.
pub fn compress_with(data: &[u8], options: Lz11Options) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(data.len() / 2 + 16);
    write_header(&mut output, data.len())?;

    let mut finder = MatchFinder::new(data.len(), options.max_chain);
    let mut pos = 0;

    while pos < data.len() {
        let flag_pos = output.len();
        output.push(0);

        for bit in 0..8 {
            if pos >= data.len() {
                break;
            }

            match finder.longest_match(data, pos) {
                Some((len, disp)) => {
                    output[flag_pos] |= 0x80 >> bit;
                    encode_match(&mut output, len, disp);
                    for p in pos..pos + len {
                        finder.insert(data, p);
                    }
                    pos += len;
                }
                None => {
                    output.push(data[pos]);
                    finder.insert(data, pos);
                    pos += 1;
                }
            }
        }
    }

    Ok(output)
}

fn write_header(output: &mut Vec<u8>, size: usize) -> Result<()> {
    if size > MAX_INPUT_SIZE {
        return Err(Error::ResourceLimitExceeded(format!(
            "LZ11 input of {} bytes exceeds the {} byte header limit",
            size, MAX_INPUT_SIZE
        )));
    }

    output.push(method::LZ11);
    if size <= MAX_SHORT_SIZE && size != 0 {
        output.extend_from_slice(&(size as u32).to_le_bytes()[..3]);
    } else {
        output.extend_from_slice(&[0, 0, 0]);
        output.extend_from_slice(&(size as u32).to_le_bytes());
    }
    Ok(())
}

fn encode_match(output: &mut Vec<u8>, len: usize, disp: usize) {
    let d = disp - 1;
    if len <= 0x10 {
        let l = len - 1;
        output.push(((l << 4) | (d >> 8)) as u8);
        output.push(d as u8);
    } else if len <= 0x110 {
        let l = len - 0x11;
        output.push((l >> 4) as u8);
        output.push((((l & 0x0F) << 4) | (d >> 8)) as u8);
        output.push(d as u8);
    } else {
        let l = len - 0x111;
        output.push((0x10 | (l >> 12)) as u8);
        output.push((l >> 4) as u8);
        output.push((((l & 0x0F) << 4) | (d >> 8)) as u8);
        output.push(d as u8);
    }
}

/// Byte cursor over the compressed input.
struct Input<'a> {
    data: &'a [u8],
    pos: usize,
}

impl Input<'_> {
    fn next(&mut self) -> Result<u8> {
        let byte = self
            .data
            .get(self.pos)
            .copied()
            .ok_or_else(|| Error::Decompression(format!("LZ11 stream truncated at byte {}", self.pos)))?;
        self.pos += 1;
        Ok(byte)
    }
}

/// Decompresses an LZ11 stream with default options.
///
/// Decoding stops once the size declared in the header has been produced;
/// any trailing bytes are ignored.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    decompress_with(data, Lz11Options::default())
}

/// Decompresses an LZ11 stream.
///
/// # Errors
///
/// Returns [`Error::ResourceLimitExceeded`] if the declared size exceeds
/// [`Lz11Options::max_output`], and [`Error::Decompression`] for malformed
/// streams.
pub fn decompress_with(data: &[u8], options: Lz11Options) -> Result<Vec<u8>> {
    if data.len() < 4 {
        return Err(Error::Decompression("LZ11 header truncated".into()));
    }
    if data[0] != method::LZ11 {
        return Err(Error::Decompression(format!(
            "invalid LZ11 tag {:#04x}",
            data[0]
        )));
    }

    let mut input = Input { data, pos: 4 };
    let mut size = u32::from_le_bytes([data[1], data[2], data[3], 0]) as usize;
    if size == 0 {
        let mut ext = [0u8; 4];
        for byte in &mut ext {
            *byte = input.next()?;
        }
        size = u32::from_le_bytes(ext) as usize;
    }
    if size as u64 > options.max_output {
        return Err(Error::ResourceLimitExceeded(format!(
            "LZ11 stream declares {} bytes, limit is {}",
            size, options.max_output
        )));
    }

    let mut output = Vec::with_capacity(size.min(MAX_PREALLOC));

    while output.len() < size {
        let flags = input.next()?;

        for bit in 0..8 {
            if output.len() >= size {
                break;
            }

            if flags & (0x80 >> bit) == 0 {
                output.push(input.next()?);
                continue;
            }

            let b0 = usize::from(input.next()?);
            let (len, disp) = match b0 >> 4 {
                0 => {
                    let b1 = usize::from(input.next()?);
                    let b2 = usize::from(input.next()?);
                    let len = (((b0 & 0x0F) << 4) | (b1 >> 4)) + 0x11;
                    let disp = (((b1 & 0x0F) << 8) | b2) + 1;
                    (len, disp)
                }
                1 => {
                    let b1 = usize::from(input.next()?);
                    let b2 = usize::from(input.next()?);
                    let b3 = usize::from(input.next()?);
                    let len = (((b0 & 0x0F) << 12) | (b1 << 4) | (b2 >> 4)) + 0x111;
                    let disp = (((b2 & 0x0F) << 8) | b3) + 1;
                    (len, disp)
                }
                n => {
                    let b1 = usize::from(input.next()?);
                    let len = n + 1;
                    let disp = (((b0 & 0x0F) << 8) | b1) + 1;
                    (len, disp)
                }
            };

            if disp > output.len() {
                return Err(Error::Decompression(format!(
                    "LZ11 back-reference displacement {} exceeds {} decoded bytes",
                    disp,
                    output.len()
                )));
            }

            let len = len.min(size - output.len());
            let start = output.len() - disp;
            for i in 0..len {
                let byte = output[start + i];
                output.push(byte);
            }
        }
    }

    Ok(output)
}
