//! Scan and extraction options.

use crate::codec::CodecMethod;

/// Options controlling how a stream is indexed.
///
/// # Example
///
/// ```rust
/// use dslz::read::ScanOptions;
///
/// let options = ScanOptions::new()
///     .strict_probe(true)
///     .max_entries(Some(10_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Whether an extension probe that runs past the end of the stream is
    /// an error (default: false).
    ///
    /// When disabled, the probe uses whatever bytes remain, which may be
    /// none at all; an empty probe yields the default extension. A short
    /// last record is legitimate: saving writes no fill after it.
    pub strict_probe: bool,
    /// Maximum number of records to index (default: unlimited).
    pub max_entries: Option<usize>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            strict_probe: false,
            max_entries: None,
        }
    }
}

impl ScanOptions {
    /// Creates new scan options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether truncated extension probes are rejected.
    pub fn strict_probe(mut self, strict: bool) -> Self {
        self.strict_probe = strict;
        self
    }

    /// Sets the maximum number of records to index.
    pub fn max_entries(mut self, max: Option<usize>) -> Self {
        self.max_entries = max;
        self
    }
}

/// Policy for handling existing files during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwritePolicy {
    /// Return an error if the file exists.
    #[default]
    Error,
    /// Skip files that already exist.
    Skip,
    /// Overwrite existing files.
    Overwrite,
}

/// Options for extracting entries to a directory.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// How to handle files that already exist.
    pub overwrite: OverwritePolicy,
    /// Codec used to decompress archived payloads before writing.
    ///
    /// `None` writes payloads exactly as stored. Modified entries are always
    /// written as their uncompressed in-memory content.
    pub decompress: Option<CodecMethod>,
}

impl ExtractOptions {
    /// Creates new extract options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the overwrite policy.
    pub fn overwrite(mut self, policy: OverwritePolicy) -> Self {
        self.overwrite = policy;
        self
    }

    /// Sets the codec used to decompress archived payloads.
    pub fn decompress(mut self, method: Option<CodecMethod>) -> Self {
        self.decompress = method;
        self
    }
}
