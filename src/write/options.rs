//! Write options and configuration for saving archives.

use crate::codec::CodecMethod;

/// Options for saving archives.
///
/// # Example
///
/// ```rust
/// use dslz::write::WriteOptions;
///
/// // Rewrite records at their original offsets, refusing to save if a
/// // modified record no longer fits.
/// let options = WriteOptions::new()
///     .fixed_offsets(true)
///     .verify_fixed_layout(true);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    /// Whether records are written at their original offsets (default: false).
    ///
    /// When disabled, records are written back to back, each starting on the
    /// next 64-byte boundary, which compacts the layout.
    pub fixed_offsets: bool,
    /// Codec used to compress modified entries (default: LZ11).
    pub codec: CodecMethod,
    /// Byte used to fill alignment gaps (default: 0).
    pub padding_byte: u8,
    /// Whether fixed-offset saves reject records that would overrun the next
    /// record (default: true).
    ///
    /// When disabled, an overrun is only logged and the next record's marker
    /// is overwritten, producing a corrupt container.
    pub verify_fixed_layout: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            fixed_offsets: false,
            codec: CodecMethod::Lz11,
            padding_byte: 0,
            verify_fixed_layout: true,
        }
    }
}

impl WriteOptions {
    /// Creates new write options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether records keep their original offsets.
    pub fn fixed_offsets(mut self, fixed: bool) -> Self {
        self.fixed_offsets = fixed;
        self
    }

    /// Sets the codec used for modified entries.
    pub fn codec(mut self, codec: CodecMethod) -> Self {
        self.codec = codec;
        self
    }

    /// Sets the alignment fill byte.
    pub fn padding_byte(mut self, byte: u8) -> Self {
        self.padding_byte = byte;
        self
    }

    /// Sets whether fixed-offset layouts are verified before writing.
    pub fn verify_fixed_layout(mut self, verify: bool) -> Self {
        self.verify_fixed_layout = verify;
        self
    }
}

/// Result of a save operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteResult {
    /// Number of records written.
    pub entries_written: usize,
    /// Number of records compressed from modified content.
    pub entries_compressed: usize,
    /// Number of records copied through unchanged.
    pub entries_passed_through: usize,
    /// Extent of the written container, from the starting position to the
    /// furthest byte written.
    pub bytes_written: u64,
}
