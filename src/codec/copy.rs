//! Copy codec (no compression).

use super::{Codec, CodecMethod};
use crate::Result;

/// A codec that passes data through unchanged.
///
/// Useful for containers whose records are stored raw, and for tests that
/// need the written bytes to match the input exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyCodec;

impl Codec for CopyCodec {
    fn method(&self) -> CodecMethod {
        CodecMethod::Copy
    }

    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(data.to_vec())
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(data.to_vec())
    }
}
