//! Error types for 3DS-LZ archive operations.
//!
//! This module provides the [`Error`] enum which represents all possible
//! failure modes when indexing, reading, or writing 3DS-LZ containers, along
//! with a convenient [`Result<T>`] type alias.
//!
//! # Error Handling
//!
//! All fallible operations in this crate return `Result<T, Error>`:
//!
//! ```rust,no_run
//! use dslz::{Archive, Error};
//!
//! fn first_entry(path: &str) -> dslz::Result<Vec<u8>> {
//!     let mut archive = Archive::open_path(path)?;
//!     match archive.read_entry(0) {
//!         Ok(data) => Ok(data),
//!         Err(Error::EntryNotFound { .. }) => Ok(Vec::new()),
//!         Err(e) => Err(e),
//!     }
//! }
//! ```

use std::io;

/// The main error type for 3DS-LZ archive operations.
///
/// | Category | Variants | Typical Cause |
/// |----------|----------|---------------|
/// | I/O | [`Io`][Self::Io] | Underlying stream failures |
/// | Format | [`CorruptHeader`][Self::CorruptHeader], [`Decompression`][Self::Decompression] | Truncated or malformed data |
/// | Lifecycle | [`StreamClosed`][Self::StreamClosed] | Reading an archived entry after `close` |
/// | Layout | [`EntryOverflow`][Self::EntryOverflow] | Fixed-offset save with a grown entry |
/// | Lookup | [`EntryNotFound`][Self::EntryNotFound], [`EntryExists`][Self::EntryExists], [`InvalidEntryName`][Self::InvalidEntryName] | Bad indices or names |
/// | Resources | [`ResourceLimitExceeded`][Self::ResourceLimitExceeded] | Scan limits |
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An I/O error occurred on the underlying stream.
    ///
    /// Stream failures are never retried or recovered internally; they are
    /// propagated to the caller as-is.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A record header is truncated or malformed.
    ///
    /// Raised during scanning when the extension probe of a detected marker
    /// would read past the end of the stream.
    #[error("Corrupt header at offset {offset:#x}: {reason}")]
    CorruptHeader {
        /// The byte offset of the offending marker.
        offset: u64,
        /// A description of the corruption.
        reason: String,
    },

    /// The source stream has been closed.
    ///
    /// Archived entries are views into the source stream; once
    /// [`Archive::close`](crate::Archive::close) has run they can no longer
    /// be read or passed through by the writer.
    #[error("Source stream is closed")]
    StreamClosed,

    /// No entry exists at the requested index.
    #[error("Entry not found: index {index}")]
    EntryNotFound {
        /// The requested index.
        index: usize,
    },

    /// An encoded record does not fit in its original slot.
    ///
    /// Only reported when saving with fixed offsets and layout verification
    /// enabled. Writing the record would overwrite the next record's marker.
    #[error("Entry {index} needs {needed} bytes but only {available} are available before the next record")]
    EntryOverflow {
        /// Index of the entry that does not fit.
        index: usize,
        /// Encoded record length (marker included).
        needed: u64,
        /// Bytes available before the next recorded marker.
        available: u64,
    },

    /// An extraction target already exists.
    #[error("Entry already exists: {path}")]
    EntryExists {
        /// The path that already exists.
        path: String,
    },

    /// An entry name cannot be used as a file name.
    #[error("Invalid entry name '{name}': {reason}")]
    InvalidEntryName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// A configured resource limit was exceeded.
    #[error("Resource limit exceeded: {0}")]
    ResourceLimitExceeded(String),

    /// Compressed data could not be decoded.
    #[error("Decompression failed: {0}")]
    Decompression(String),
}

impl Error {
    /// Returns `true` if this is a data corruption error.
    pub fn is_corruption(&self) -> bool {
        matches!(self, Error::CorruptHeader { .. } | Error::Decompression(_))
    }

    /// Returns `true` if this error might be recoverable.
    ///
    /// Only transient I/O errors qualify. Every other failure reflects the
    /// archive contents or the caller's usage and will not change on retry.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::Io(e) => matches!(
                e.kind(),
                io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted | io::ErrorKind::TimedOut
            ),
            _ => false,
        }
    }
}

/// A specialized Result type for 3DS-LZ operations.
pub type Result<T> = std::result::Result<T, Error>;
