//! Compression codec infrastructure for 3DS-LZ records.
//!
//! The container itself is codec-agnostic: archived records are copied
//! through byte-for-byte, and only modified records are compressed on save.
//! This module provides the [`Codec`] abstraction used for that step, along
//! with the LZ11 implementation the format ships with.

mod copy;
pub mod lz11;

use crate::Result;

pub use copy::CopyCodec;
pub use lz11::Lz11Codec;

/// Header tags that identify compressed payloads.
pub mod method {
    /// LZ11 (LZ77 variant with extended match lengths).
    pub const LZ11: u8 = 0x11;

    /// Returns a human-readable name for a header tag.
    pub fn name(tag: u8) -> &'static str {
        match tag {
            LZ11 => "LZ11",
            _ => "Unknown",
        }
    }
}

/// A whole-buffer compressor and decompressor.
///
/// Records are small and always handled in full, so codecs work on byte
/// slices instead of streams.
pub trait Codec: Send + Sync {
    /// Returns the method implemented by this codec.
    fn method(&self) -> CodecMethod;

    /// Compresses `data` into a freshly allocated buffer.
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Decompresses `data` into a freshly allocated buffer.
    ///
    /// Bytes past the end of the compressed stream (such as record padding)
    /// are ignored.
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>>;
}

/// Codec method types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum CodecMethod {
    /// LZ11 compression (the format's native codec).
    #[default]
    Lz11,
    /// No compression; data is stored as-is.
    Copy,
}

impl CodecMethod {
    /// Returns a human-readable name for this method.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Lz11 => "LZ11",
            Self::Copy => "Copy",
        }
    }

    /// Returns a codec instance implementing this method.
    pub fn codec(&self) -> Box<dyn Codec> {
        match self {
            Self::Lz11 => Box::new(Lz11Codec::new()),
            Self::Copy => Box::new(CopyCodec),
        }
    }

    /// Guesses the method from the first byte of a payload.
    ///
    /// Returns `None` when the payload does not start with a known tag.
    /// Uncompressed payloads carry no tag and can never be detected.
    pub fn detect(payload: &[u8]) -> Option<Self> {
        match payload.first() {
            Some(&method::LZ11) => Some(Self::Lz11),
            _ => None,
        }
    }
}

impl std::fmt::Display for CodecMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
